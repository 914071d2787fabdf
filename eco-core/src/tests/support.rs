use super::*;

/// Nothing spawns, the sky never clouds over, plants never spread, and disease never
/// starts or spreads on its own. The first step lands on hour 10.
pub(super) fn test_config(depth: i32, width: i32) -> WorldConfig {
    WorldConfig {
        depth,
        width,
        start_hour: 9,
        step_delay_ms: 0,
        spawn: SpawnConfig {
            plant: 0.0,
            iguana: 0.0,
            orca: 0.0,
            turtle: 0.0,
            shark: 0.0,
            manatee: 0.0,
            crocodile: 0.0,
        },
        weather: WeatherConfig {
            sunny_to_sunny: 1.0,
            cloudy_to_sunny: 1.0,
        },
        plant: PlantConfig {
            growth_rate: 5,
            max_height: 500,
            spread_probability: 0.0,
        },
        disease: DiseaseConfig {
            initial_infection_chance: 0.0,
            transmission_chance: 0.0,
            grace_period: 5,
        },
    }
}

pub(super) fn empty_sim(cfg: WorldConfig, seed: u64) -> Simulation {
    let mut sim = Simulation::new(cfg, seed).expect("simulation should initialize");
    sim.grid.clear();
    sim.population.clear();
    sim
}

/// Puts a healthy agent with a known sex and age on the grid. Agents act in the
/// order they were added.
pub(super) fn add_agent(
    sim: &mut Simulation,
    species: Species,
    location: Location,
    sex: Sex,
    age: u32,
) -> AgentId {
    let id = sim.create_agent(species, location, Origin::Newborn);
    let agent = sim.population.get_mut(id).expect("agent was just created");
    agent.sex = sex;
    agent.age = age;
    agent.life_expectancy = match profile(species).aging {
        AgingPolicy::Ageless => u32::MAX,
        AgingPolicy::Mortal { max_age } => max_age,
    };
    if let Body::Consumer { infected, .. } = &mut agent.body {
        *infected = false;
    }
    sim.grid.place(id, location);
    id
}

pub(super) fn add_plant(sim: &mut Simulation, location: Location, height: u32) -> AgentId {
    let id = add_agent(sim, Species::Plant, location, Sex::Female, 0);
    set_body(sim, id, Body::Producer { height });
    id
}

pub(super) fn set_food(sim: &mut Simulation, id: AgentId, food: i32) {
    let infected = sim.population.get(id).is_some_and(AgentState::is_infected);
    set_body(
        sim,
        id,
        Body::Consumer {
            food_level: food,
            infected,
        },
    );
}

pub(super) fn set_body(sim: &mut Simulation, id: AgentId, body: Body) {
    sim.population
        .get_mut(id)
        .expect("agent should exist")
        .body = body;
}

pub(super) fn agent(sim: &Simulation, id: AgentId) -> &AgentState {
    sim.agent(id).expect("agent should still be tracked")
}

pub(super) fn loc(row: i32, col: i32) -> Location {
    Location::new(row, col)
}
