pub mod config;
pub mod error;
pub mod loadable;

pub use config::{BackendConfig, Config, Platform, PushConfig, WeatherConfig};
pub use error::{AppError, BackendError, NetworkError, PushError, StorageError, WeatherError};
pub use loadable::Loadable;

use anyhow::Result;

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("SkyCast core initialized");
    Ok(())
}
