use crate::agent::{AgentState, Body, LifeStatus};
use crate::species::{profile, AgingPolicy, DiseasePolicy, HungerPolicy};
use crate::Simulation;
use eco_types::{AgentId, Location, Sex, Species};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// Seeded by `reset`: random starting age.
    Populated,
    /// Born during a tick: age zero.
    Newborn,
}

impl Simulation {
    /// Clears the grid and draws every cell independently. The first species in
    /// priority order whose draw succeeds takes the cell; a cell may stay empty.
    pub(crate) fn populate(&mut self) {
        self.grid.clear();
        self.population.clear();

        let spawn = &self.config.spawn;
        let priority = [
            (Species::Plant, spawn.plant),
            (Species::Iguana, spawn.iguana),
            (Species::Orca, spawn.orca),
            (Species::Turtle, spawn.turtle),
            (Species::Shark, spawn.shark),
            (Species::Manatee, spawn.manatee),
            (Species::Crocodile, spawn.crocodile),
        ];

        for row in 0..self.grid.depth() {
            for col in 0..self.grid.width() {
                let chosen = priority
                    .iter()
                    .find(|(_, probability)| self.rng.random::<f32>() <= *probability)
                    .map(|(species, _)| *species);
                if let Some(species) = chosen {
                    let location = Location::new(row, col);
                    let id = self.create_agent(species, location, Origin::Populated);
                    self.grid.place(id, location);
                }
            }
        }
    }

    /// Creates a newborn in the population. The caller places it.
    pub(crate) fn spawn_newborn(&mut self, species: Species, location: Location) -> AgentId {
        self.create_agent(species, location, Origin::Newborn)
    }

    pub(crate) fn create_agent(
        &mut self,
        species: Species,
        location: Location,
        origin: Origin,
    ) -> AgentId {
        let profile = profile(species);
        let id = self.population.alloc_agent_id();
        let sex = if self.rng.random::<bool>() {
            Sex::Male
        } else {
            Sex::Female
        };

        let (age, max_age) = match profile.aging {
            AgingPolicy::Ageless => (0, u32::MAX),
            AgingPolicy::Mortal { max_age } => match origin {
                Origin::Populated => (self.rng.random_range(0..max_age.max(1)), max_age),
                Origin::Newborn => (0, max_age),
            },
        };

        let (body, life_expectancy) = match profile.hunger {
            // Seedlings start at a random height as well.
            HungerPolicy::Photosynthetic => {
                let height = self.rng.random_range(0..self.config.plant.max_height);
                (Body::Producer { height }, max_age)
            }
            HungerPolicy::Hungry { starting_food } => {
                let food_level = self.rng.random_range(starting_food.0..=starting_food.1);
                let infected = profile.disease == DiseasePolicy::Susceptible
                    && self.rng.random::<f32>() < self.config.disease.initial_infection_chance;
                let life_expectancy = if infected {
                    max_age.min(age.saturating_add(self.config.disease.grace_period))
                } else {
                    max_age
                };
                (
                    Body::Consumer {
                        food_level,
                        infected,
                    },
                    life_expectancy,
                )
            }
        };

        self.population.insert(AgentState {
            id,
            species,
            sex,
            age,
            life_expectancy,
            status: LifeStatus::Alive(location),
            body,
        });
        id
    }
}
