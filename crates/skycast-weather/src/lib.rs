//! Weather service for SkyCast
//!
//! Current conditions and forecasts by city from OpenWeatherMap. Results are
//! never cached; every query goes to the provider.

pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::*;
