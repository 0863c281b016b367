//! Core library for the `meteo` client.
//!
//! This crate defines:
//! - Domain models and the pipeline error taxonomy
//! - Open-Meteo geocoding and forecast clients, plus DTO -> domain mappers
//! - Repositories and use cases sitting between transport and presentation
//! - State holders for city search (debounced) and weather loading (with retry)
//!
//! It is used by `meteo-cli`, but any presentation layer can drive the state holders.

pub mod app;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod presentation;
pub mod remote;
pub mod repository;
pub mod usecase;

pub use app::AppServices;
pub use config::{Config, DefaultCity};
pub use error::{AppError, AppResult};
pub use model::{City, DailyForecast, HourlyForecast, Weather, WeatherKind};
pub use presentation::{
    CitySearchUiState, CitySearchViewModel, SearchPhase, WeatherRequest, WeatherUiState,
    WeatherViewModel,
};
pub use repository::{CityRepository, WeatherRepository};
pub use usecase::{GetWeatherUseCase, SearchCityUseCase};
