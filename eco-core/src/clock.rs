use eco_config::WeatherConfig;
use eco_types::Weather;

pub const HOURS_PER_DAY: u8 = 24;

/// Daytime is strictly between these hours.
const DAWN_HOUR: u8 = 6;
const DUSK_HOUR: u8 = 19;

pub fn is_daytime(hour: u8) -> bool {
    hour > DAWN_HOUR && hour < DUSK_HOUR
}

/// What every agent sees for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub hour: u8,
    pub weather: Weather,
}

impl Environment {
    pub fn is_daytime(self) -> bool {
        is_daytime(self.hour)
    }

    pub fn weather_label(self) -> &'static str {
        if !self.is_daytime() {
            return "Night";
        }
        match self.weather {
            Weather::Sunny => "Sunny",
            Weather::Cloudy => "Cloudy",
        }
    }
}

pub fn advance_hour(hour: u8) -> u8 {
    (hour + 1) % HOURS_PER_DAY
}

/// 12-hour rendering of `hour`, e.g. `"12 am"`, `"7 pm"`.
pub fn clock_label(hour: u8) -> String {
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour < 12 { "am" } else { "pm" };
    format!("{display} {period}")
}

/// One transition of the weather chain. `roll` is a uniform draw from `[0, 1)`;
/// the next hour is sunny when it falls below the transition probability.
pub fn next_weather(current: Weather, roll: f32, config: &WeatherConfig) -> Weather {
    let stay_or_turn_sunny = match current {
        Weather::Sunny => config.sunny_to_sunny,
        Weather::Cloudy => config.cloudy_to_sunny,
    };
    if roll < stay_or_turn_sunny {
        Weather::Sunny
    } else {
        Weather::Cloudy
    }
}
