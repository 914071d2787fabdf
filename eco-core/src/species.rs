use crate::clock::Environment;
use eco_types::Species;

/// When a species is allowed to do something this hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGate {
    Always,
    Daytime,
    Night,
    DaytimeAndSunny,
}

impl TimeGate {
    pub fn allows(self, env: Environment) -> bool {
        match self {
            TimeGate::Always => true,
            TimeGate::Daytime => env.is_daytime(),
            TimeGate::Night => !env.is_daytime(),
            TimeGate::DaytimeAndSunny => env.is_daytime() && env.weather.is_sunny(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgingPolicy {
    Ageless,
    Mortal { max_age: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HungerPolicy {
    Photosynthetic,
    /// Starting food is drawn from the inclusive `starting_food` range.
    Hungry { starting_food: (i32, i32) },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedingPolicy {
    /// Spreads into one free neighbour with the configured plant spread probability.
    Asexual,
    /// A female past `breeding_age` litters once per adjacent male, up to `max_litter_size`.
    Sexual {
        breeding_age: u32,
        max_litter_size: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    None,
    Plants { bite: u32 },
    Prey(&'static [(Species, i32)]),
}

impl Diet {
    /// Food credited for eating `species`, if it is on the menu at all.
    pub fn value_of(self, species: Species) -> Option<i32> {
        match self {
            Diet::None => None,
            Diet::Plants { bite } => (species == Species::Plant).then_some(bite as i32),
            Diet::Prey(menu) => menu
                .iter()
                .find(|(prey, _)| *prey == species)
                .map(|(_, value)| *value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiseasePolicy {
    Immune,
    Susceptible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesProfile {
    pub species: Species,
    pub aging: AgingPolicy,
    pub hunger: HungerPolicy,
    pub activity: TimeGate,
    pub breeding: BreedingPolicy,
    pub breeding_gate: TimeGate,
    pub diet: Diet,
    pub disease: DiseasePolicy,
}

const SHARK_MENU: &[(Species, i32)] = &[
    (Species::Turtle, 11),
    (Species::Iguana, 14),
    (Species::Manatee, 16),
];
const ORCA_MENU: &[(Species, i32)] = &[
    (Species::Turtle, 8),
    (Species::Crocodile, 10),
    (Species::Manatee, 12),
];
const CROCODILE_MENU: &[(Species, i32)] = &[(Species::Iguana, 12), (Species::Turtle, 9)];

const PLANT: SpeciesProfile = SpeciesProfile {
    species: Species::Plant,
    aging: AgingPolicy::Ageless,
    hunger: HungerPolicy::Photosynthetic,
    activity: TimeGate::Always,
    breeding: BreedingPolicy::Asexual,
    breeding_gate: TimeGate::DaytimeAndSunny,
    diet: Diet::None,
    disease: DiseasePolicy::Immune,
};

const TURTLE: SpeciesProfile = SpeciesProfile {
    species: Species::Turtle,
    aging: AgingPolicy::Mortal { max_age: 40 },
    hunger: HungerPolicy::Hungry {
        starting_food: (50, 50),
    },
    activity: TimeGate::Always,
    breeding: BreedingPolicy::Sexual {
        breeding_age: 3,
        max_litter_size: 4,
    },
    breeding_gate: TimeGate::Daytime,
    diet: Diet::Plants { bite: 5 },
    disease: DiseasePolicy::Susceptible,
};

// Iguanas only breed in the cold night water.
const IGUANA: SpeciesProfile = SpeciesProfile {
    species: Species::Iguana,
    aging: AgingPolicy::Mortal { max_age: 60 },
    hunger: HungerPolicy::Hungry {
        starting_food: (50, 50),
    },
    activity: TimeGate::Always,
    breeding: BreedingPolicy::Sexual {
        breeding_age: 2,
        max_litter_size: 4,
    },
    breeding_gate: TimeGate::Night,
    diet: Diet::Plants { bite: 9 },
    disease: DiseasePolicy::Immune,
};

const MANATEE: SpeciesProfile = SpeciesProfile {
    species: Species::Manatee,
    aging: AgingPolicy::Mortal { max_age: 25 },
    hunger: HungerPolicy::Hungry {
        starting_food: (70, 70),
    },
    activity: TimeGate::Always,
    breeding: BreedingPolicy::Sexual {
        breeding_age: 4,
        max_litter_size: 2,
    },
    breeding_gate: TimeGate::Always,
    diet: Diet::Plants { bite: 10 },
    disease: DiseasePolicy::Immune,
};

const SHARK: SpeciesProfile = SpeciesProfile {
    species: Species::Shark,
    aging: AgingPolicy::Mortal { max_age: 150 },
    hunger: HungerPolicy::Hungry {
        starting_food: (10, 20),
    },
    activity: TimeGate::DaytimeAndSunny,
    breeding: BreedingPolicy::Sexual {
        breeding_age: 2,
        max_litter_size: 5,
    },
    breeding_gate: TimeGate::Always,
    diet: Diet::Prey(SHARK_MENU),
    disease: DiseasePolicy::Immune,
};

const ORCA: SpeciesProfile = SpeciesProfile {
    species: Species::Orca,
    aging: AgingPolicy::Mortal { max_age: 200 },
    hunger: HungerPolicy::Hungry {
        starting_food: (30, 37),
    },
    activity: TimeGate::Daytime,
    breeding: BreedingPolicy::Sexual {
        breeding_age: 4,
        max_litter_size: 2,
    },
    breeding_gate: TimeGate::Always,
    diet: Diet::Prey(ORCA_MENU),
    disease: DiseasePolicy::Immune,
};

// Amphibious: hunts around the clock, breeds by day.
const CROCODILE: SpeciesProfile = SpeciesProfile {
    species: Species::Crocodile,
    aging: AgingPolicy::Mortal { max_age: 45 },
    hunger: HungerPolicy::Hungry {
        starting_food: (20, 30),
    },
    activity: TimeGate::Always,
    breeding: BreedingPolicy::Sexual {
        breeding_age: 5,
        max_litter_size: 2,
    },
    breeding_gate: TimeGate::Daytime,
    diet: Diet::Prey(CROCODILE_MENU),
    disease: DiseasePolicy::Immune,
};

pub fn profile(species: Species) -> &'static SpeciesProfile {
    match species {
        Species::Plant => &PLANT,
        Species::Turtle => &TURTLE,
        Species::Iguana => &IGUANA,
        Species::Manatee => &MANATEE,
        Species::Shark => &SHARK,
        Species::Orca => &ORCA,
        Species::Crocodile => &CROCODILE,
    }
}
