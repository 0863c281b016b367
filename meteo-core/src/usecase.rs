use std::sync::Arc;

use crate::{
    error::AppResult,
    model::{City, Weather},
    repository::{CityRepository, WeatherRepository},
};

/// Queries shorter than this (after trimming) never reach the network.
pub const MIN_QUERY_LEN: usize = 2;

/// Trimmed query if it is long enough to be searched.
pub fn searchable_query(query: &str) -> Option<&str> {
    let cleaned = query.trim();
    (cleaned.chars().count() >= MIN_QUERY_LEN).then_some(cleaned)
}

/// Find cities matching free text.
#[derive(Debug, Clone)]
pub struct SearchCityUseCase {
    repository: Arc<dyn CityRepository>,
}

impl SearchCityUseCase {
    pub fn new(repository: Arc<dyn CityRepository>) -> Self {
        Self { repository }
    }

    /// Empty or single-character queries succeed with no matches and no request.
    pub async fn execute(&self, query: &str) -> AppResult<Vec<City>> {
        match searchable_query(query) {
            Some(cleaned) => self.repository.search_city(cleaned).await,
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetWeatherUseCase {
    repository: Arc<dyn WeatherRepository>,
}

impl GetWeatherUseCase {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        latitude: f64,
        longitude: f64,
        city_name: &str,
    ) -> AppResult<Weather> {
        self.repository.get_weather(latitude, longitude, city_name).await
    }
}
