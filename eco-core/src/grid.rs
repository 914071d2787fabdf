use crate::agent::Population;
use eco_types::{AgentId, Census, Location};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// One grid generation: at most one agent per cell plus the list of agents placed into it.
///
/// Evicted agents leave a `None` tombstone in `slots` so placement order survives.
#[derive(Debug, Clone)]
pub struct Grid {
    depth: i32,
    width: i32,
    occupant: HashMap<Location, AgentId>,
    slots: Vec<Option<AgentId>>,
    slot_of: HashMap<AgentId, usize>,
}

impl Grid {
    pub fn new(depth: i32, width: i32) -> Self {
        Self {
            depth,
            width,
            occupant: HashMap::new(),
            slots: Vec::new(),
            slot_of: HashMap::new(),
        }
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        location.row >= 0
            && location.col >= 0
            && location.row < self.depth
            && location.col < self.width
    }

    /// Puts `agent` at `location`, overwriting whatever was there.
    ///
    /// A previous occupant is evicted from the tracking list as well and is simply no
    /// longer part of this generation; it is not marked dead. Predation and crowding
    /// both rely on this. Returns the evicted agent, if any.
    ///
    /// # Panics
    ///
    /// Panics when `location` lies outside the grid.
    pub fn place(&mut self, agent: AgentId, location: Location) -> Option<AgentId> {
        assert!(
            self.in_bounds(location),
            "cannot place {agent:?} outside a {}x{} grid at {location}",
            self.depth,
            self.width,
        );

        let evicted = self.occupant.insert(location, agent);
        if evicted == Some(agent) {
            return None;
        }
        if let Some(previous) = evicted {
            if let Some(slot) = self.slot_of.remove(&previous) {
                self.slots[slot] = None;
            }
        }
        debug_assert!(
            !self.slot_of.contains_key(&agent),
            "an agent is placed at most once per generation",
        );
        self.slot_of.insert(agent, self.slots.len());
        self.slots.push(Some(agent));
        evicted
    }

    pub fn occupant_at(&self, location: Location) -> Option<AgentId> {
        self.occupant.get(&location).copied()
    }

    /// Agents in placement order, evicted ones skipped.
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.slot_of.contains_key(&agent)
    }

    pub fn len(&self) -> usize {
        self.slot_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slot_of.is_empty()
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = (Location, AgentId)> + '_ {
        self.occupant.iter().map(|(location, id)| (*location, *id))
    }

    pub fn clear(&mut self) {
        self.occupant.clear();
        self.slots.clear();
        self.slot_of.clear();
    }

    pub fn adjacent_locations<R: Rng + ?Sized>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Vec<Location> {
        adjacent_locations(location, self.depth, self.width, rng)
    }

    /// Shuffled neighbours that are empty or hold an agent that is no longer alive.
    pub fn free_adjacent_locations<R: Rng + ?Sized>(
        &self,
        location: Location,
        population: &Population,
        rng: &mut R,
    ) -> Vec<Location> {
        let mut free = self.adjacent_locations(location, rng);
        free.retain(|cell| self.is_vacant(*cell, population));
        free
    }

    /// No live agent holds `location`.
    pub fn is_vacant(&self, location: Location, population: &Population) -> bool {
        self.occupant_at(location)
            .map_or(true, |id| !population.is_alive(id))
    }

    pub fn census(&self, population: &Population) -> Census {
        let mut census = Census::default();
        for id in self.agents() {
            if let Some(agent) = population.get(id).filter(|agent| agent.is_alive()) {
                census.record(agent.species());
            }
        }
        census
    }
}

/// The up-to-eight Moore neighbours of `location` inside a `depth` x `width` grid,
/// excluding `location` itself, in a fresh random order on every call.
pub fn adjacent_locations<R: Rng + ?Sized>(
    location: Location,
    depth: i32,
    width: i32,
    rng: &mut R,
) -> Vec<Location> {
    let mut locations = Vec::with_capacity(8);
    for row_offset in -1..=1 {
        let row = location.row + row_offset;
        if row < 0 || row >= depth {
            continue;
        }
        for col_offset in -1..=1 {
            let col = location.col + col_offset;
            if col < 0 || col >= width || (row_offset == 0 && col_offset == 0) {
                continue;
            }
            locations.push(Location::new(row, col));
        }
    }
    locations.shuffle(rng);
    locations
}
