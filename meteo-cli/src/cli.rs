use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use meteo_core::{AppError, AppServices, Config, WeatherRequest};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "City search and weather forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List cities matching a name.
    Search {
        /// City name, at least two characters.
        query: String,
    },

    /// Show weather for the best match of a city name.
    Show {
        /// City name; if absent, the configured default city is used.
        query: Option<String>,
    },

    /// Set the search language and the default city.
    Configure,

    /// Search, pick a city and browse its weather.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        tracing::debug!(?config, "configuration loaded");

        match self.command {
            Command::Search { query } => search(&AppServices::from_config(&config)?, &query).await,
            Command::Show { query } => {
                show(&AppServices::from_config(&config)?, query.as_deref()).await
            }
            Command::Configure => interactive::configure(config).await,
            Command::Interactive => interactive::run(&AppServices::from_config(&config)?).await,
        }
    }
}

pub fn user_error(error: AppError) -> anyhow::Error {
    anyhow!(error.user_message())
}

async fn search(services: &AppServices, query: &str) -> Result<()> {
    let cities = services.search_city.execute(query).await.map_err(user_error)?;

    if cities.is_empty() {
        println!("No matching city.");
    }
    for city in &cities {
        println!("{}", render::city_line(city));
    }

    Ok(())
}

async fn show(services: &AppServices, query: Option<&str>) -> Result<()> {
    let request = match query {
        Some(query) => {
            let city = services
                .search_city
                .execute(query)
                .await
                .and_then(|cities| cities.into_iter().next().ok_or(AppError::NotFound))
                .map_err(user_error)?;
            WeatherRequest::from(&city)
        }
        None => services.default_location(),
    };

    let weather = services
        .get_weather
        .execute(request.latitude, request.longitude, &request.label)
        .await
        .map_err(user_error)?;

    print!("{}", render::weather(&weather));
    Ok(())
}
