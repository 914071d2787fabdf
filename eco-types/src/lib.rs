use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

/// A cell coordinate. Rows grow downwards, columns grow to the right.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpeciesFamily {
    Producer,
    Grazer,
    Hunter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    Plant,
    Turtle,
    Iguana,
    Manatee,
    Shark,
    Orca,
    Crocodile,
}

impl Species {
    pub const ALL: [Species; 7] = [
        Species::Plant,
        Species::Turtle,
        Species::Iguana,
        Species::Manatee,
        Species::Shark,
        Species::Orca,
        Species::Crocodile,
    ];

    pub fn family(self) -> SpeciesFamily {
        match self {
            Species::Plant => SpeciesFamily::Producer,
            Species::Turtle | Species::Iguana | Species::Manatee => SpeciesFamily::Grazer,
            Species::Shark | Species::Orca | Species::Crocodile => SpeciesFamily::Hunter,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Plant => "Plant",
            Species::Turtle => "Turtle",
            Species::Iguana => "Iguana",
            Species::Manatee => "Manatee",
            Species::Shark => "Shark",
            Species::Orca => "Orca",
            Species::Crocodile => "Crocodile",
        }
    }

    /// Single-character legend used by text renderers.
    pub fn glyph(self) -> char {
        match self {
            Species::Plant => '*',
            Species::Turtle => 't',
            Species::Iguana => 'i',
            Species::Manatee => 'm',
            Species::Shark => 'S',
            Species::Orca => 'O',
            Species::Crocodile => 'C',
        }
    }

    /// RGB legend colour for graphical renderers.
    pub fn color(self) -> [u8; 3] {
        match self {
            Species::Plant => [0, 200, 0],
            Species::Turtle => [139, 69, 19],
            Species::Iguana => [34, 139, 100],
            Species::Manatee => [102, 153, 255],
            Species::Shark => [169, 169, 169],
            Species::Orca => [50, 50, 50],
            Species::Crocodile => [85, 107, 47],
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Weather {
    #[default]
    Sunny,
    Cloudy,
}

impl Weather {
    pub fn is_sunny(self) -> bool {
        matches!(self, Weather::Sunny)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Overcrowding,
    Predation,
    GrazedOut,
}

impl DeathCause {
    pub const ALL: [DeathCause; 5] = [
        DeathCause::OldAge,
        DeathCause::Starvation,
        DeathCause::Overcrowding,
        DeathCause::Predation,
        DeathCause::GrazedOut,
    ];
}

/// Live members per species in one grid generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Census {
    pub counts: BTreeMap<Species, u32>,
}

impl Census {
    pub fn record(&mut self, species: Species) {
        *self.counts.entry(species).or_insert(0) += 1;
    }

    pub fn count(&self, species: Species) -> u32 {
        self.counts.get(&species).copied().unwrap_or(0)
    }

    pub fn family_count(&self, family: SpeciesFamily) -> u32 {
        self.counts
            .iter()
            .filter(|(species, _)| species.family() == family)
            .map(|(_, count)| *count)
            .sum()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// At least one producer or grazer and at least one hunter are alive.
    pub fn is_viable(&self) -> bool {
        let forage = self.family_count(SpeciesFamily::Producer)
            + self.family_count(SpeciesFamily::Grazer);
        forage > 0 && self.family_count(SpeciesFamily::Hunter) > 0
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for species in Species::ALL {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}: {}", species.name(), self.count(species))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TickMetrics {
    /// Agents of the starting generation visited by the tick, including ones already eaten.
    pub visited: u64,
    pub births: u64,
    pub deaths: BTreeMap<DeathCause, u64>,
    pub plants_bitten: u64,
    pub evictions: u64,
}

impl TickMetrics {
    pub fn record_death(&mut self, cause: DeathCause) {
        *self.deaths.entry(cause).or_insert(0) += 1;
    }

    pub fn deaths_by(&self, cause: DeathCause) -> u64 {
        self.deaths.get(&cause).copied().unwrap_or(0)
    }

    pub fn total_deaths(&self) -> u64 {
        self.deaths.values().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepReport {
    pub step: u64,
    pub hour: u8,
    pub weather: Weather,
    pub census: Census,
    pub metrics: TickMetrics,
    pub viable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellView {
    pub location: Location,
    pub species: Species,
}

/// Read-only picture of one grid generation for renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorldSnapshot {
    pub step: u64,
    pub depth: i32,
    pub width: i32,
    pub hour: u8,
    pub clock_label: String,
    pub weather: Weather,
    pub weather_label: String,
    pub cells: Vec<CellView>,
    pub census: Census,
}

impl WorldSnapshot {
    pub fn species_at(&self, location: Location) -> Option<Species> {
        self.cells
            .iter()
            .find(|cell| cell.location == location)
            .map(|cell| cell.species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viability_requires_forage_and_hunter() {
        let mut census = Census::default();
        assert!(!census.is_viable());

        census.record(Species::Plant);
        assert!(!census.is_viable());

        census.record(Species::Crocodile);
        assert!(census.is_viable());

        let mut grazers_only = Census::default();
        grazers_only.record(Species::Turtle);
        grazers_only.record(Species::Manatee);
        assert!(!grazers_only.is_viable());
        assert_eq!(grazers_only.family_count(SpeciesFamily::Grazer), 2);
    }

    #[test]
    fn census_serializes_species_keys_as_names() {
        let mut census = Census::default();
        census.record(Species::Orca);
        census.record(Species::Orca);
        let json = serde_json::to_string(&census).expect("serialize census");
        assert_eq!(json, r#"{"counts":{"Orca":2}}"#);
    }

    #[test]
    fn every_species_has_a_distinct_glyph() {
        let mut glyphs: Vec<char> = Species::ALL.iter().map(|s| s.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), Species::ALL.len());
    }
}
