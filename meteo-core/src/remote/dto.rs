//! Exact JSON shapes returned by Open-Meteo. Every field is optional so partial
//! payloads still decode; the mappers decide what to keep.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeocodingResponseDto {
    pub results: Option<Vec<GeocodingCityDto>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeocodingCityDto {
    pub name: Option<String>,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherDto {
    pub current: Option<CurrentDto>,
    pub hourly: Option<HourlyDto>,
    pub daily: Option<DailyDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentDto {
    pub temperature_2m: Option<f64>,
    pub weather_code: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlyDto {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyDto {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, rename = "temperature_2m_max")]
    pub max: Vec<f64>,
    #[serde(default, rename = "temperature_2m_min")]
    pub min: Vec<f64>,
}
