use anyhow::{Context, Result};
use std::sync::Arc;

use crate::{
    config::Config,
    presentation::{CitySearchViewModel, WeatherRequest, WeatherViewModel},
    remote::{self, GeocodingApi, WeatherApi},
    repository::{OpenMeteoCityRepository, OpenMeteoWeatherRepository},
    usecase::{GetWeatherUseCase, SearchCityUseCase},
};

/// Everything the presentation layer needs, built from one [`Config`] and one HTTP client.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub search_city: SearchCityUseCase,
    pub get_weather: GetWeatherUseCase,
    config: Config,
}

impl AppServices {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = remote::http_client(config.request_timeout(), &config.user_agent)
            .context("Failed to build HTTP client")?;

        let geocoding = GeocodingApi::new(
            http.clone(),
            config.geocoding_url.as_str(),
            config.language.as_str(),
            config.result_count,
        );
        let forecast = WeatherApi::new(http, config.forecast_url.as_str());

        let cities = Arc::new(OpenMeteoCityRepository::new(geocoding));
        let weather = Arc::new(OpenMeteoWeatherRepository::new(forecast));

        Ok(Self {
            search_city: SearchCityUseCase::new(cities),
            get_weather: GetWeatherUseCase::new(weather),
            config: config.clone(),
        })
    }

    pub fn search_view_model(&self) -> CitySearchViewModel {
        CitySearchViewModel::new(self.search_city.clone(), self.config.debounce())
    }

    pub fn weather_view_model(&self) -> WeatherViewModel {
        WeatherViewModel::new(
            self.get_weather.clone(),
            WeatherRequest::from(&self.config.default_city),
        )
    }

    pub fn default_location(&self) -> WeatherRequest {
        WeatherRequest::from(&self.config.default_city)
    }
}
