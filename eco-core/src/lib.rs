use eco_config::{validate_world_config, WorldConfig, DEFAULT_DEPTH, DEFAULT_WIDTH};
use eco_types::{
    AgentId, CellView, Census, Location, StepReport, TickMetrics, Weather, WorldSnapshot,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

mod agent;
mod clock;
mod grid;
mod spawn;
mod species;
mod turn;

#[cfg(test)]
mod tests;

pub use agent::{AgentState, Body, LifeStatus, Population};
pub use clock::{clock_label, is_daytime, next_weather, Environment};
pub use grid::{adjacent_locations, Grid};
pub use species::{
    profile, AgingPolicy, BreedingPolicy, Diet, DiseasePolicy, HungerPolicy, SpeciesProfile,
    TimeGate,
};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid world config: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SimulationPhase {
    Idle,
    Populated,
    Running,
    Terminated,
}

/// Owns the current grid generation and advances it one tick at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: WorldConfig,
    seed: u64,
    rng: ChaCha8Rng,
    step: u64,
    hour: u8,
    weather: Weather,
    phase: SimulationPhase,
    grid: Grid,
    population: Population,
    metrics: TickMetrics,
}

impl Simulation {
    /// Builds a simulation and populates it.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, SimError> {
        let mut sim = Self::idle(config, seed)?;
        sim.reset();
        Ok(sim)
    }

    /// Default configuration with the given dimensions. Non-positive values fall back
    /// to the defaults.
    pub fn with_dimensions(depth: i32, width: i32, seed: u64) -> Result<Self, SimError> {
        let config = WorldConfig {
            depth,
            width,
            ..WorldConfig::default()
        };
        Self::new(config, seed)
    }

    /// Builds a simulation with an empty grid.
    pub fn idle(mut config: WorldConfig, seed: u64) -> Result<Self, SimError> {
        validate_world_config(&config).map_err(SimError::InvalidConfig)?;

        if config.depth <= 0 || config.width <= 0 {
            warn!(
                depth = config.depth,
                width = config.width,
                "grid dimensions must be positive; using {DEFAULT_DEPTH}x{DEFAULT_WIDTH}",
            );
            config.depth = DEFAULT_DEPTH;
            config.width = DEFAULT_WIDTH;
        }

        Ok(Self {
            grid: Grid::new(config.depth, config.width),
            hour: config.start_hour,
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            step: 0,
            weather: Weather::Sunny,
            phase: SimulationPhase::Idle,
            population: Population::default(),
            metrics: TickMetrics::default(),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.population.get(id)
    }

    /// Metrics of the most recent step.
    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }

    pub fn environment(&self) -> Environment {
        Environment {
            hour: self.hour,
            weather: self.weather,
        }
    }

    pub fn census(&self) -> Census {
        self.grid.census(&self.population)
    }

    pub fn is_viable(&self) -> bool {
        self.census().is_viable()
    }

    /// Reseeds the random source from the construction seed and repopulates the grid.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.step = 0;
        self.hour = self.config.start_hour;
        self.weather = Weather::Sunny;
        self.metrics = TickMetrics::default();
        self.populate();
        self.phase = SimulationPhase::Populated;
        self.debug_assert_consistent_state();
        info!(seed = self.seed, census = %self.census(), "simulation populated");
    }

    /// Advances the clock and weather, lets every agent of the current grid act once
    /// against a fresh next grid, then commits the next grid.
    pub fn step(&mut self) -> StepReport {
        self.step = self.step.saturating_add(1);
        self.hour = clock::advance_hour(self.hour);
        let roll: f32 = self.rng.random();
        self.weather = next_weather(self.weather, roll, &self.config.weather);
        self.phase = SimulationPhase::Running;

        let env = self.environment();
        let mut metrics = TickMetrics::default();
        let next = Grid::new(self.grid.depth(), self.grid.width());
        let current = std::mem::replace(&mut self.grid, next);
        for id in current.agents() {
            self.act(id, &current, env, &mut metrics);
        }
        drop(current);

        self.population.retain_placed(&self.grid);
        self.debug_assert_consistent_state();

        let census = self.census();
        let viable = census.is_viable();
        debug!(
            step = self.step,
            hour = self.hour,
            weather = ?self.weather,
            births = metrics.births,
            deaths = metrics.total_deaths(),
            census = %census,
            "step complete",
        );
        if !viable {
            self.phase = SimulationPhase::Terminated;
            info!(step = self.step, census = %census, "ecosystem is no longer viable");
        }

        self.metrics = metrics.clone();
        StepReport {
            step: self.step,
            hour: self.hour,
            weather: self.weather,
            census,
            metrics,
            viable,
        }
    }

    /// Runs up to `steps` ticks, checking viability before each one.
    pub fn run_for(&mut self, steps: u32) -> Vec<StepReport> {
        let mut reports = Vec::new();
        for _ in 0..steps {
            if !self.is_viable() {
                self.phase = SimulationPhase::Terminated;
                break;
            }
            reports.push(self.step());
        }
        reports
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut cells: Vec<CellView> = self
            .grid
            .occupied_cells()
            .filter_map(|(location, id)| {
                let agent = self.population.get(id).filter(|agent| agent.is_alive())?;
                Some(CellView {
                    location,
                    species: agent.species(),
                })
            })
            .collect();
        cells.sort_by_key(|cell| cell.location);

        let env = self.environment();
        WorldSnapshot {
            step: self.step,
            depth: self.grid.depth(),
            width: self.grid.width(),
            hour: self.hour,
            clock_label: clock_label(self.hour),
            weather: self.weather,
            weather_label: env.weather_label().to_owned(),
            cells,
            census: self.census(),
        }
    }

    fn debug_assert_consistent_state(&self) {
        if cfg!(debug_assertions) {
            debug_assert_eq!(
                self.grid.len(),
                self.grid.occupied_cells().count(),
                "every occupied cell must be tracked exactly once",
            );
            debug_assert_eq!(
                self.population.len(),
                self.grid.len(),
                "population must only hold agents of the current generation",
            );
            for (location, id) in self.grid.occupied_cells() {
                let agent = self
                    .population
                    .get(id)
                    .expect("placed agent must exist in the population");
                debug_assert_eq!(
                    agent.location(),
                    Some(location),
                    "committed agents are alive and sit where the grid places them",
                );
            }
        }
    }

    fn place(&mut self, id: AgentId, location: Location, metrics: &mut TickMetrics) {
        if let Some(evicted) = self.grid.place(id, location) {
            if self.population.is_alive(evicted) {
                metrics.evictions += 1;
                debug!(?evicted, by = ?id, %location, "live agent evicted");
            }
        }
    }
}
