use crate::clock::Environment;
use crate::grid::Grid;
use crate::species::{profile, BreedingPolicy, Diet, DiseasePolicy};
use crate::Simulation;
use eco_types::{AgentId, DeathCause, Location, SpeciesFamily, TickMetrics};
use rand::Rng;
use tracing::trace;

impl Simulation {
    /// One agent's turn. `current` is the generation being read; `self.grid` is the
    /// generation being written.
    pub(crate) fn act(
        &mut self,
        id: AgentId,
        current: &Grid,
        env: Environment,
        metrics: &mut TickMetrics,
    ) {
        metrics.visited += 1;
        let Some(agent) = self.population.get(id) else {
            return;
        };
        // Eaten earlier in this tick.
        let Some(location) = agent.location() else {
            return;
        };

        match agent.species().family() {
            SpeciesFamily::Producer => self.act_producer(id, location, env, metrics),
            SpeciesFamily::Grazer | SpeciesFamily::Hunter => {
                self.act_consumer(id, location, current, env, metrics)
            }
        }
    }

    fn act_producer(
        &mut self,
        id: AgentId,
        location: Location,
        env: Environment,
        metrics: &mut TickMetrics,
    ) {
        let plant = self.config.plant.clone();
        let Some(agent) = self.population.get_mut(id) else {
            return;
        };
        let species = agent.species();
        agent.grow(plant.growth_rate, plant.max_height);
        self.place(id, location, metrics);

        let profile = profile(species);
        if profile.breeding != BreedingPolicy::Asexual || !profile.breeding_gate.allows(env) {
            return;
        }
        let free = self
            .grid
            .free_adjacent_locations(location, &self.population, &mut self.rng);
        let Some(&seedling_at) = free.first() else {
            return;
        };
        if self.rng.random::<f32>() < plant.spread_probability {
            let seedling = self.spawn_newborn(species, seedling_at);
            self.place(seedling, seedling_at, metrics);
            metrics.births += 1;
        }
    }

    fn act_consumer(
        &mut self,
        id: AgentId,
        location: Location,
        current: &Grid,
        env: Environment,
        metrics: &mut TickMetrics,
    ) {
        let Some(agent) = self.population.get_mut(id) else {
            return;
        };
        let profile = profile(agent.species());

        if !agent.increment_age() {
            metrics.record_death(DeathCause::OldAge);
            trace!(?id, %location, "died of old age");
            return;
        }
        if !agent.increment_hunger() {
            metrics.record_death(DeathCause::Starvation);
            trace!(?id, %location, "starved");
            return;
        }
        if !profile.activity.allows(env) {
            self.place(id, location, metrics);
            return;
        }

        let mut free = self
            .grid
            .free_adjacent_locations(location, &self.population, &mut self.rng);
        if !free.is_empty() && profile.breeding_gate.allows(env) {
            self.give_birth(id, location, &mut free, metrics);
        }

        let destination = self
            .forage(id, location, profile.diet, current, metrics)
            .or_else(|| (!free.is_empty()).then(|| free.remove(0)));

        let Some(agent) = self.population.get_mut(id) else {
            return;
        };
        match destination {
            Some(cell) => {
                agent.set_location(cell);
                self.place(id, cell, metrics);
            }
            None => {
                agent.set_dead();
                metrics.record_death(DeathCause::Overcrowding);
                trace!(?id, %location, "no room to move");
            }
        }
    }

    /// A live female past breeding age litters once per live male of her species in
    /// the already-written neighbourhood, capped by litter size and the free cells
    /// left. Mating is also how disease spreads. Returns the number of births.
    pub(crate) fn give_birth(
        &mut self,
        mother_id: AgentId,
        location: Location,
        free: &mut Vec<Location>,
        metrics: &mut TickMetrics,
    ) -> u32 {
        let Some(mother) = self.population.get(mother_id) else {
            return 0;
        };
        let species = mother.species();
        let profile = profile(species);
        let BreedingPolicy::Sexual {
            breeding_age,
            max_litter_size,
        } = profile.breeding
        else {
            return 0;
        };
        if !mother.is_alive() || mother.is_male() || mother.age() < breeding_age {
            return 0;
        }

        let susceptible = profile.disease == DiseasePolicy::Susceptible;
        let transmission_chance = self.config.disease.transmission_chance;
        let mut mother_infected = mother.is_infected();
        let mut newly_infected = Vec::new();
        let mut males = 0_u32;

        for cell in self.grid.adjacent_locations(location, &mut self.rng) {
            let Some(mate_id) = self.grid.occupant_at(cell) else {
                continue;
            };
            let Some(mate) = self.population.get(mate_id) else {
                continue;
            };
            if !mate.is_alive() || mate.species() != species || !mate.is_male() {
                continue;
            }
            males += 1;

            if susceptible
                && (mother_infected || mate.is_infected())
                && self.rng.random::<f32>() < transmission_chance
            {
                if !mother_infected {
                    newly_infected.push(mother_id);
                    mother_infected = true;
                }
                if !mate.is_infected() {
                    newly_infected.push(mate_id);
                }
            }
        }

        let grace_period = self.config.disease.grace_period;
        for infected_id in newly_infected {
            if let Some(agent) = self.population.get_mut(infected_id) {
                agent.infect(grace_period);
            }
        }

        let births = males
            .min(max_litter_size)
            .min(u32::try_from(free.len()).unwrap_or(u32::MAX));
        for _ in 0..births {
            let cell = free.remove(0);
            let child = self.spawn_newborn(species, cell);
            self.place(child, cell, metrics);
        }
        metrics.births += u64::from(births);
        births
    }

    /// Looks for something on the menu in the generation being read and returns the
    /// cell of the first meal, which becomes the forager's destination. A surviving
    /// plant keeps its cell only if it places itself after the grazer. A target is only
    /// claimable while no other live agent has taken its cell in the generation being
    /// written.
    fn forage(
        &mut self,
        id: AgentId,
        location: Location,
        diet: Diet,
        current: &Grid,
        metrics: &mut TickMetrics,
    ) -> Option<Location> {
        for cell in current.adjacent_locations(location, &mut self.rng) {
            let Some(target_id) = current.occupant_at(cell) else {
                continue;
            };
            let Some(target) = self.population.get(target_id) else {
                continue;
            };
            // Agents that already moved away this tick are no longer there to eat.
            if target.location() != Some(cell) {
                continue;
            }
            let Some(food_value) = diet.value_of(target.species()) else {
                continue;
            };
            let claimable = self
                .grid
                .occupant_at(cell)
                .map_or(true, |occupant| {
                    occupant == target_id || !self.population.is_alive(occupant)
                });
            if !claimable {
                continue;
            }

            let Some(target) = self.population.get_mut(target_id) else {
                continue;
            };
            let meal = match diet {
                Diet::Plants { bite } => {
                    let eaten = target.eaten(bite);
                    metrics.plants_bitten += 1;
                    if !target.is_alive() {
                        metrics.record_death(DeathCause::GrazedOut);
                    }
                    i32::try_from(eaten).unwrap_or(i32::MAX)
                }
                Diet::Prey(_) => {
                    target.set_dead();
                    metrics.record_death(DeathCause::Predation);
                    trace!(hunter = ?id, prey = ?target_id, %cell, "prey caught");
                    food_value
                }
                Diet::None => continue,
            };

            if let Some(forager) = self.population.get_mut(id) {
                forager.feed(meal);
            }
            return Some(cell);
        }

        None
    }
}

