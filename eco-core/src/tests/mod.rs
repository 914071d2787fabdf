pub(super) use super::*;
pub(super) use crate::spawn::Origin;
pub(super) use eco_config::{DiseaseConfig, PlantConfig, SpawnConfig, WeatherConfig};
pub(super) use eco_types::{DeathCause, Sex, Species};
pub(super) use std::collections::HashSet;

mod config_and_seed;
mod foraging;
mod support;
