use reqwest::Client;

use crate::error::AppResult;

use super::{dto::GeocodingResponseDto, get_json};

/// Open-Meteo geocoding search, e.g. `/v1/search?name=paris`.
#[derive(Debug, Clone)]
pub struct GeocodingApi {
    http: Client,
    url: String,
    language: String,
    count: u32,
}

impl GeocodingApi {
    pub fn new(
        http: Client,
        url: impl Into<String>,
        language: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            language: language.into(),
            count,
        }
    }

    pub async fn search_city(&self, name: &str) -> AppResult<GeocodingResponseDto> {
        let query = [
            ("name", name.to_string()),
            ("count", self.count.to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ];

        get_json(&self.http, &self.url, &query, "geocoding").await
    }
}
