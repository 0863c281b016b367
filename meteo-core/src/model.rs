use serde::{Deserialize, Serialize};
use std::fmt;

/// A place returned by the geocoding search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    /// First-level administrative region (e.g. "Île-de-France").
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    /// "Name, Region, Country", or "Name, Country" when the region is absent or blank.
    pub fn display_name(&self) -> String {
        match self.region.as_deref().map(str::trim) {
            Some(region) if !region.is_empty() => {
                format!("{}, {}, {}", self.name, region, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// A weather snapshot for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Display label supplied by the caller, never by the provider.
    pub city: String,
    pub temperature_c: i32,
    pub description: String,
    /// Raw WMO code, `-1` when the provider sent none.
    pub weather_code: i32,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
}

impl Weather {
    pub fn kind(&self) -> WeatherKind {
        WeatherKind::from_code(self.weather_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// "HH:mm"
    pub hour: String,
    pub temperature_c: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub day: String,
    pub max_c: i32,
    pub min_c: i32,
}

/// Condition classes derived from WMO weather codes.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    Clear,
    Cloudy,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 | 3 | 45 | 48 => Self::Cloudy,
            51 | 53 | 55 => Self::Drizzle,
            61 | 63 | 65 => Self::Rain,
            71 | 73 | 75 => Self::Snow,
            95 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::Cloudy => "Cloudy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}
