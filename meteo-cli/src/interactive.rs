//! Prompt-driven frontend over the search and weather state holders.

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};
use meteo_core::{
    AppServices, City, CitySearchViewModel, Config, SearchPhase, WeatherUiState, WeatherViewModel,
    usecase::searchable_query,
};

use crate::{cli::user_error, render};

/// Run a blocking prompt off the async workers. `None` when the user cancels.
async fn prompt<T, F>(ask: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    match tokio::task::spawn_blocking(ask).await? {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn pick(cities: Vec<City>) -> Result<Option<City>> {
    prompt(move || Select::new("Pick a city:", cities).prompt()).await
}

pub async fn run(services: &AppServices) -> Result<()> {
    let search = services.search_view_model();
    let weather = services.weather_view_model();

    loop {
        let Some(query) =
            prompt(|| Text::new("City:").with_help_message("Esc to quit").prompt()).await?
        else {
            return Ok(());
        };

        let Some(city) = find_city(&search, &query).await? else {
            continue;
        };

        let city = search.select_city(city);
        weather.load_city(&city);
        follow_weather(&weather).await?;
    }
}

async fn find_city(search: &CitySearchViewModel, query: &str) -> Result<Option<City>> {
    if searchable_query(query).is_none() {
        println!("Type at least two characters.");
        return Ok(None);
    }

    let mut rx = search.subscribe();
    search.clear_results();
    search.on_query_change(query);
    search.search();

    let state = rx
        .wait_for(|s| {
            matches!(s.phase(), SearchPhase::Results | SearchPhase::NoResults | SearchPhase::Failed)
        })
        .await?
        .clone();

    match state.phase() {
        SearchPhase::Results => pick(state.results).await,
        SearchPhase::Failed => {
            eprintln!("{}", state.error_message.unwrap_or_default());
            Ok(None)
        }
        _ => {
            println!("No matching city.");
            Ok(None)
        }
    }
}

async fn follow_weather(weather: &WeatherViewModel) -> Result<()> {
    let mut rx = weather.subscribe();

    loop {
        let state = rx.wait_for(|s| !s.is_loading()).await?.clone();

        match state {
            WeatherUiState::Success(loaded) => {
                print!("{}", render::weather(&loaded));
                return Ok(());
            }
            WeatherUiState::Error(message) => {
                eprintln!("{message}");
                let again = prompt(|| Confirm::new("Retry?").with_default(true).prompt())
                    .await?
                    .unwrap_or(false);
                if !again {
                    return Ok(());
                }
                weather.retry();
            }
            WeatherUiState::Loading => {}
        }
    }
}

pub async fn configure(mut config: Config) -> Result<()> {
    let current = config.language.clone();
    if let Some(language) = prompt(move || {
        Text::new("Search language:")
            .with_default(&current)
            .prompt()
    })
    .await?
    {
        config.set_language(&language)?;
    }

    let services = AppServices::from_config(&config)?;
    let Some(query) = prompt(|| {
        Text::new("Default city:")
            .with_help_message("Esc to keep the current one")
            .prompt()
    })
    .await?
    else {
        return save(&config);
    };

    let cities = services.search_city.execute(&query).await.map_err(user_error)?;
    if cities.is_empty() {
        println!("No matching city; default city unchanged.");
    } else if let Some(city) = pick(cities).await? {
        config.set_default_city(&city);
    }

    save(&config)
}

fn save(config: &Config) -> Result<()> {
    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
