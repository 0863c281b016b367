//! Contracts between the use cases and the concrete data sources.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::AppResult,
    mapper,
    model::{City, Weather},
    remote::{GeocodingApi, WeatherApi},
};

#[async_trait]
pub trait CityRepository: Send + Sync + Debug {
    async fn search_city(&self, query: &str) -> AppResult<Vec<City>>;
}

#[async_trait]
pub trait WeatherRepository: Send + Sync + Debug {
    async fn get_weather(&self, latitude: f64, longitude: f64, city_name: &str)
    -> AppResult<Weather>;
}

#[derive(Debug, Clone)]
pub struct OpenMeteoCityRepository {
    api: GeocodingApi,
}

impl OpenMeteoCityRepository {
    pub fn new(api: GeocodingApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CityRepository for OpenMeteoCityRepository {
    async fn search_city(&self, query: &str) -> AppResult<Vec<City>> {
        self.api
            .search_city(query)
            .await
            .map(|dto| mapper::cities_from_dto(&dto))
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoWeatherRepository {
    api: WeatherApi,
}

impl OpenMeteoWeatherRepository {
    pub fn new(api: WeatherApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl WeatherRepository for OpenMeteoWeatherRepository {
    async fn get_weather(
        &self,
        latitude: f64,
        longitude: f64,
        city_name: &str,
    ) -> AppResult<Weather> {
        self.api
            .fetch_weather(latitude, longitude)
            .await
            .map(|dto| mapper::weather_from_dto(&dto, city_name))
    }
}
