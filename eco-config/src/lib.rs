use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_WORLD_CONFIG_REL_PATH: &str = "default.toml";

pub const DEFAULT_DEPTH: i32 = 85;
pub const DEFAULT_WIDTH: i32 = 130;

/// Per-cell creation probabilities used when the grid is populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub plant: f32,
    pub iguana: f32,
    pub orca: f32,
    pub turtle: f32,
    pub shark: f32,
    pub manatee: f32,
    pub crocodile: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            plant: 0.21,
            iguana: 0.25,
            orca: 0.04,
            turtle: 0.15,
            shark: 0.05,
            manatee: 0.17,
            crocodile: 0.03,
        }
    }
}

/// Two-state weather chain. Each value is the chance of the next hour being sunny.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    pub sunny_to_sunny: f32,
    pub cloudy_to_sunny: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            sunny_to_sunny: 0.9,
            cloudy_to_sunny: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlantConfig {
    pub growth_rate: u32,
    pub max_height: u32,
    pub spread_probability: f32,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            growth_rate: 5,
            max_height: 500,
            spread_probability: 0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiseaseConfig {
    pub initial_infection_chance: f32,
    pub transmission_chance: f32,
    /// Steps an infected agent has left once infected.
    pub grace_period: u32,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            initial_infection_chance: 0.1,
            transmission_chance: 0.5,
            grace_period: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    #[serde(default = "default_depth")]
    pub depth: i32,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_start_hour")]
    pub start_hour: u8,
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub plant: PlantConfig,
    #[serde(default)]
    pub disease: DiseaseConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        default_world_config()
    }
}

pub fn world_config_from_toml_str(raw: &str) -> Result<WorldConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn default_world_config() -> WorldConfig {
    world_config_from_toml_str(include_str!("../default.toml"))
        .expect("default world config TOML must deserialize")
}

pub fn default_world_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_WORLD_CONFIG_REL_PATH)
}

pub fn load_default_world_config() -> Result<WorldConfig> {
    load_world_config_from_path(&default_world_config_path())
}

pub fn load_world_config_from_path(path: &Path) -> Result<WorldConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read world config from {}", path.display()))?;
    world_config_from_toml_str(&raw)
        .context("world config TOML failed schema deserialization")
        .with_context(|| format!("failed to parse world config from {}", path.display()))
}

/// Dimensions are not checked here: non-positive values are corrected, not rejected.
pub fn validate_world_config(config: &WorldConfig) -> Result<(), String> {
    if config.start_hour >= 24 {
        return Err("start_hour must be within [0, 23]".to_owned());
    }

    let spawn = &config.spawn;
    for (name, value) in [
        ("spawn.plant", spawn.plant),
        ("spawn.iguana", spawn.iguana),
        ("spawn.orca", spawn.orca),
        ("spawn.turtle", spawn.turtle),
        ("spawn.shark", spawn.shark),
        ("spawn.manatee", spawn.manatee),
        ("spawn.crocodile", spawn.crocodile),
        ("weather.sunny_to_sunny", config.weather.sunny_to_sunny),
        ("weather.cloudy_to_sunny", config.weather.cloudy_to_sunny),
        ("plant.spread_probability", config.plant.spread_probability),
        (
            "disease.initial_infection_chance",
            config.disease.initial_infection_chance,
        ),
        (
            "disease.transmission_chance",
            config.disease.transmission_chance,
        ),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(format!("{name} must be within [0, 1]"));
        }
    }

    if config.plant.max_height == 0 {
        return Err("plant.max_height must be greater than zero".to_owned());
    }
    Ok(())
}

fn default_depth() -> i32 {
    DEFAULT_DEPTH
}

fn default_width() -> i32 {
    DEFAULT_WIDTH
}

fn default_start_hour() -> u8 {
    1
}

fn default_step_delay_ms() -> u64 {
    100
}
