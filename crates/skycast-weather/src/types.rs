use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Number of forecast entries a screen shows by default
pub const FORECAST_WINDOW: usize = 10;

const ICON_URL_BASE: &str = "http://openweathermap.org/img/wn";

/// Weather at one point in time for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub timestamp: DateTime<Utc>,
    /// Offset of the city's local time from UTC, in seconds
    pub utc_offset_secs: i32,
    pub temperature: f64,
    pub description: String,
    pub icon_code: String,
}

impl WeatherSnapshot {
    /// Timestamp in the city's local time, `YYYY-MM-DD HH:MM:SS`
    pub fn local_time(&self) -> String {
        let offset = FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix());
        self.timestamp
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon_code)
    }
}

/// Provider forecast in provider order (one entry per interval)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub entries: Vec<WeatherSnapshot>,
}

impl Forecast {
    /// First `window` entries, order untouched
    pub fn truncated(mut self, window: usize) -> Self {
        self.entries.truncate(window);
        self
    }
}

/// Current conditions plus forecast for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityReport {
    pub current: WeatherSnapshot,
    pub forecast: Forecast,
}

/// Icon image URL for a provider icon code such as `04d`
pub fn icon_url(icon_code: &str) -> String {
    format!("{}/{}@2x.png", ICON_URL_BASE, icon_code)
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Provider message, verbatim
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Weather API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(offset: i32) -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Paris".to_string(),
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            utc_offset_secs: offset,
            temperature: 12.5,
            description: "light rain".to_string(),
            icon_code: "10d".to_string(),
        }
    }

    #[test]
    fn test_local_time_utc() {
        assert_eq!(snapshot(0).local_time(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_local_time_applies_offset() {
        assert_eq!(snapshot(3600).local_time(), "2023-11-14 23:13:20");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            snapshot(0).icon_url(),
            "http://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn test_truncate_keeps_order() {
        let entries: Vec<_> = (0..15)
            .map(|i| WeatherSnapshot {
                temperature: i as f64,
                ..snapshot(0)
            })
            .collect();
        let forecast = Forecast {
            city: "Paris".to_string(),
            entries,
        }
        .truncated(FORECAST_WINDOW);

        assert_eq!(forecast.entries.len(), 10);
        let temps: Vec<f64> = forecast.entries.iter().map(|e| e.temperature).collect();
        assert_eq!(temps, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_truncate_shorter_than_window() {
        let forecast = Forecast {
            city: "Paris".to_string(),
            entries: vec![snapshot(0)],
        }
        .truncated(FORECAST_WINDOW);
        assert_eq!(forecast.entries.len(), 1);
    }
}
