//! OpenWeatherMap client for current conditions and forecasts by city.

use crate::types::{CityReport, Forecast, WeatherError, WeatherSnapshot};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use skycast_core::WeatherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    name: String,
    dt: i64,
    #[serde(default)]
    timezone: i32,
    main: OwmMain,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastEntry {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwmForecast {
    list: Vec<OwmForecastEntry>,
    city: OwmCity,
}

#[derive(Debug, Deserialize)]
struct OwmErrorBody {
    message: Option<String>,
}

fn snapshot(
    city: &str,
    dt: i64,
    utc_offset_secs: i32,
    main: OwmMain,
    weather: Vec<OwmCondition>,
) -> Result<WeatherSnapshot, WeatherError> {
    let timestamp: DateTime<Utc> = DateTime::from_timestamp(dt, 0)
        .ok_or_else(|| WeatherError::Parse(format!("invalid timestamp {}", dt)))?;
    let condition = weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Parse("missing weather condition".to_string()))?;

    Ok(WeatherSnapshot {
        city: city.to_string(),
        timestamp,
        utc_offset_secs,
        temperature: main.temp,
        description: condition.description,
        icon_code: condition.icon,
    })
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    units: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    /// Current conditions for `city`.
    #[instrument(skip(self), level = "info")]
    pub async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let body: OwmCurrent = self.get("weather", &[("q", city)]).await?;
        snapshot(&body.name, body.dt, body.timezone, body.main, body.weather)
    }

    /// Current conditions at a coordinate.
    #[instrument(skip(self), level = "info")]
    pub async fn current_weather_at(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let body: OwmCurrent = self.get("weather", &[("lat", &lat), ("lon", &lon)]).await?;
        snapshot(&body.name, body.dt, body.timezone, body.main, body.weather)
    }

    /// Full provider forecast for `city`, in provider order.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let body: OwmForecast = self.get("forecast", &[("q", city)]).await?;
        let name = body.city.name;
        let offset = body.city.timezone;

        let entries = body
            .list
            .into_iter()
            .map(|e| snapshot(&name, e.dt, offset, e.main, e.weather))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Forecast for {} has {} entries", name, entries.len());
        Ok(Forecast {
            city: name,
            entries,
        })
    }

    /// Current conditions and forecast, fetched concurrently.
    ///
    /// Fails if either call fails; the forecast is truncated to `window`.
    pub async fn city_report(&self, city: &str, window: usize) -> Result<CityReport, WeatherError> {
        let (current, forecast) = tokio::join!(self.current_weather(city), self.forecast(city));
        Ok(CityReport {
            current: current?,
            forecast: forecast?.truncated(window),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", self.units.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| WeatherError::Parse(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<OwmErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(text);

        tracing::warn!("Weather provider returned {} for {}: {}", status, endpoint, message);

        match status {
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound(message)),
            StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidApiKey),
            _ => Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}
