//! HTTP clients for the Open-Meteo geocoding and forecast endpoints.
//!
//! Clients only speak DTOs; every failure leaves this module as [`AppError::Network`].

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub mod dto;
pub mod forecast;
pub mod geocoding;

pub use forecast::WeatherApi;
pub use geocoding::GeocodingApi;

/// Build the HTTP client shared by both remote clients.
pub fn http_client(timeout: Duration, user_agent: &str) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).user_agent(user_agent).build()
}

/// GET `url` with `query` and decode the JSON body.
///
/// Send errors, timeouts, non-2xx statuses and undecodable bodies all map to `Network`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
    endpoint: &'static str,
) -> AppResult<T> {
    tracing::debug!(endpoint, url, ?query, "sending request");

    let res = http.get(url).query(query).send().await.map_err(|e| {
        tracing::warn!(endpoint, error = %e, timeout = e.is_timeout(), "request failed");
        AppError::Network
    })?;

    let status = res.status();
    let body = res.text().await.map_err(|e| {
        tracing::warn!(endpoint, error = %e, "failed to read response body");
        AppError::Network
    })?;

    if !status.is_success() {
        tracing::warn!(endpoint, %status, body = %truncate_body(&body), "unexpected status");
        return Err(AppError::Network);
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(endpoint, error = %e, "failed to parse response JSON");
        AppError::Network
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
