use reqwest::Client;

use crate::error::AppResult;

use super::{dto::WeatherDto, get_json};

const CURRENT_FIELDS: &str = "temperature_2m,weather_code";
const HOURLY_FIELDS: &str = "temperature_2m";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min";

/// Open-Meteo forecast endpoint. Knows coordinates only, never city names.
#[derive(Debug, Clone)]
pub struct WeatherApi {
    http: Client,
    url: String,
}

impl WeatherApi {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    pub async fn fetch_weather(&self, latitude: f64, longitude: f64) -> AppResult<WeatherDto> {
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];

        get_json(&self.http, &self.url, &query, "forecast").await
    }
}
