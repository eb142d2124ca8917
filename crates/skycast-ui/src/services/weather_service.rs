//! Weather screen backend: current conditions plus forecast for one city.
//! Network work runs on the tokio runtime; results are sent via mpsc.

use std::sync::Arc;

use skycast_core::{AppError, Loadable};
use skycast_weather::{CityReport, WeatherProvider, WeatherSnapshot};

/// Error type for weather operations
#[derive(Debug, Clone)]
pub enum WeatherError {
    /// No city entered
    EmptyCity,
    /// Provider did not recognise the city; carries its message
    CityNotFound(String),
    InvalidApiKey,
    Network(String),
    Api(String),
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::EmptyCity => write!(f, "No city entered"),
            WeatherError::CityNotFound(s) => write!(f, "City not found: {}", s),
            WeatherError::InvalidApiKey => write!(f, "Invalid weather API key"),
            WeatherError::Network(s) => write!(f, "Weather network error: {}", s),
            WeatherError::Api(s) => write!(f, "Weather error: {}", s),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<skycast_weather::WeatherError> for WeatherError {
    fn from(e: skycast_weather::WeatherError) -> Self {
        match e {
            skycast_weather::WeatherError::CityNotFound(s) => WeatherError::CityNotFound(s),
            skycast_weather::WeatherError::InvalidApiKey => WeatherError::InvalidApiKey,
            skycast_weather::WeatherError::Network(e) => WeatherError::Network(e.to_string()),
            other => WeatherError::Api(other.to_string()),
        }
    }
}

/// Messages sent from async operations back to the screen
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of a city query
    ReportDone {
        city: String,
        report: Loadable<CityReport>,
    },
}

/// Fetch current weather and forecast for `city`, keeping `window` forecast rows.
///
/// Either call failing fails the whole report; there is no partial weather view.
pub async fn load_report(
    provider: &WeatherProvider,
    city: &str,
    window: usize,
) -> Loadable<CityReport> {
    let city = city.trim();
    let result = if city.is_empty() {
        Err(WeatherError::EmptyCity)
    } else {
        provider
            .city_report(city, window)
            .await
            .map_err(WeatherError::from)
    };

    if let Err(e) = &result {
        tracing::warn!("Weather query for {:?} failed: {}", city, e);
    }
    Loadable::from_result(result, |e| AppError::from(e.clone()).user_message())
}

/// Current conditions at a coordinate; no forecast.
pub async fn load_current_at(
    provider: &WeatherProvider,
    latitude: f64,
    longitude: f64,
) -> Loadable<WeatherSnapshot> {
    let result = provider
        .current_weather_at(latitude, longitude)
        .await
        .map_err(WeatherError::from);

    if let Err(e) = &result {
        tracing::warn!("Weather query at ({}, {}) failed: {}", latitude, longitude, e);
    }
    Loadable::from_result(result, |e| AppError::from(e.clone()).user_message())
}

/// Request a city report asynchronously.
/// Sends `ReportDone` on the channel when complete.
pub fn request_report(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    runtime: &tokio::runtime::Handle,
    provider: Arc<WeatherProvider>,
    city: String,
    window: usize,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let report = load_report(&provider, &city, window).await;
        let _ = tx.send(WeatherServiceMessage::ReportDone { city, report });
    });
}
