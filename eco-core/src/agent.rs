use crate::grid::Grid;
use eco_types::{AgentId, Location, Sex, Species};
use std::collections::HashMap;

/// Whether an agent is still part of the simulation. The location only exists while alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStatus {
    Alive(Location),
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Producer { height: u32 },
    Consumer { food_level: i32, infected: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentState {
    pub(crate) id: AgentId,
    pub(crate) species: Species,
    pub(crate) sex: Sex,
    pub(crate) age: u32,
    pub(crate) life_expectancy: u32,
    pub(crate) status: LifeStatus,
    pub(crate) body: Body,
}

impl AgentState {
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn life_expectancy(&self) -> u32 {
        self.life_expectancy
    }

    pub fn status(&self) -> LifeStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.status, LifeStatus::Alive(_))
    }

    pub fn location(&self) -> Option<Location> {
        match self.status {
            LifeStatus::Alive(location) => Some(location),
            LifeStatus::Dead => None,
        }
    }

    pub fn height(&self) -> Option<u32> {
        match self.body {
            Body::Producer { height } => Some(height),
            Body::Consumer { .. } => None,
        }
    }

    pub fn food_level(&self) -> Option<i32> {
        match self.body {
            Body::Consumer { food_level, .. } => Some(food_level),
            Body::Producer { .. } => None,
        }
    }

    pub fn is_infected(&self) -> bool {
        matches!(self.body, Body::Consumer { infected: true, .. })
    }

    pub(crate) fn set_dead(&mut self) {
        self.status = LifeStatus::Dead;
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        debug_assert!(self.is_alive(), "dead agents are never relocated");
        if self.is_alive() {
            self.status = LifeStatus::Alive(location);
        }
    }

    /// Returns `false` when the agent outlived its life expectancy and died.
    pub(crate) fn increment_age(&mut self) -> bool {
        self.age = self.age.saturating_add(1);
        if self.age > self.life_expectancy {
            self.set_dead();
            return false;
        }
        true
    }

    /// Returns `false` when the agent starved. Producers never go hungry.
    pub(crate) fn increment_hunger(&mut self) -> bool {
        let Body::Consumer { food_level, .. } = &mut self.body else {
            return true;
        };
        *food_level -= 1;
        if *food_level <= 0 {
            self.set_dead();
            return false;
        }
        true
    }

    /// A meal resets the food level to what the meal was worth.
    pub(crate) fn feed(&mut self, amount: i32) {
        if let Body::Consumer { food_level, .. } = &mut self.body {
            *food_level = amount;
        }
    }

    pub(crate) fn grow(&mut self, growth_rate: u32, max_height: u32) {
        if let Body::Producer { height } = &mut self.body {
            *height = height.saturating_add(growth_rate).min(max_height);
        }
    }

    /// Bites `amount` off a producer and returns what was actually available.
    /// A producer that is bitten down to nothing dies.
    pub fn eaten(&mut self, amount: u32) -> u32 {
        let Body::Producer { height } = &mut self.body else {
            return 0;
        };
        if amount >= *height {
            let given = *height;
            *height = 0;
            self.set_dead();
            given
        } else {
            *height -= amount;
            amount
        }
    }

    /// Infection only ever tightens the life expectancy, to `age + grace_period`.
    pub(crate) fn infect(&mut self, grace_period: u32) {
        let Body::Consumer { infected, .. } = &mut self.body else {
            return;
        };
        if *infected {
            return;
        }
        *infected = true;
        self.life_expectancy = self
            .life_expectancy
            .min(self.age.saturating_add(grace_period));
    }
}

/// Owns every agent referenced by either grid generation.
#[derive(Debug, Clone, Default)]
pub struct Population {
    agents: HashMap<AgentId, AgentState>,
    next_agent_id: u64,
}

impl Population {
    pub fn get(&self, id: AgentId) -> Option<&AgentState> {
        self.agents.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: AgentId) -> Option<&mut AgentState> {
        self.agents.get_mut(&id)
    }

    pub fn is_alive(&self, id: AgentId) -> bool {
        self.agents.get(&id).is_some_and(AgentState::is_alive)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub(crate) fn alloc_agent_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        id
    }

    pub(crate) fn insert(&mut self, agent: AgentState) {
        let previous = self.agents.insert(agent.id, agent);
        debug_assert!(previous.is_none(), "agent ids are never reused");
    }

    pub(crate) fn clear(&mut self) {
        self.agents.clear();
        self.next_agent_id = 0;
    }

    /// Drops every agent the grid no longer tracks. Returns how many were dropped.
    pub(crate) fn retain_placed(&mut self, grid: &Grid) -> usize {
        let before = self.agents.len();
        self.agents.retain(|id, _| grid.contains(*id));
        before - self.agents.len()
    }
}
