use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use skycast_backend::BackendClient;
use skycast_core::{AppError, Config};
use skycast_profile::{
    FileProfileStore, ProfileOrchestrator, ProfileStore, ProvisionedNotificationService,
    PushRegistrar,
};
use skycast_ui::{services, views};
use skycast_weather::WeatherProvider;

#[derive(Parser)]
#[command(name = "skycast", version, about = "City weather, cloud classification and weather facts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Current weather and forecast for a city, or current weather at a coordinate
    Weather {
        #[arg(required_unless_present = "lat")]
        city: Option<String>,
        #[arg(long, requires = "lon", conflicts_with = "city", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Classify the clouds in a photo
    Classify { image: PathBuf },

    /// Generated weather fact and illustration
    Fact {
        /// Write the generated image here
        #[arg(long)]
        save_image: Option<PathBuf>,
    },

    /// View or edit the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored profile
    Show,

    /// Edit fields and save the profile
    Save {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long, value_enum)]
        push: Option<Toggle>,
    },

    /// Print the backend id of a user
    Lookup { username: String },

    /// Forget the locally stored profile
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    skycast_core::init()?;

    let cli = Cli::parse();
    let (config, _) = Config::load_validated()?;
    tracing::debug!("Config directory: {}", config.config_dir.display());

    match cli.command {
        Command::Weather { city, lat, lon } => match (city, lat, lon) {
            (_, Some(lat), Some(lon)) => weather_at(&config, lat, lon).await,
            (city, _, _) => weather(&config, city.as_deref().unwrap_or_default()).await,
        },
        Command::Classify { image } => classify(&config, &image).await,
        Command::Fact { save_image } => fact(&config, save_image).await,
        Command::Profile { action } => profile(&config, action).await,
    }
}

fn backend(config: &Config) -> Result<BackendClient> {
    BackendClient::new(&config.backend).context("Failed to create backend client")
}

async fn weather(config: &Config, city: &str) -> Result<ExitCode> {
    let provider = WeatherProvider::new(&config.weather).context("Failed to create weather client")?;
    let report = services::load_report(&provider, city, config.weather.forecast_window).await;

    println!(
        "{}",
        views::render_report(city, &report, views::unit_symbol(&config.weather.units))
    );
    Ok(exit_code(report.error()))
}

async fn weather_at(config: &Config, lat: f64, lon: f64) -> Result<ExitCode> {
    let provider = WeatherProvider::new(&config.weather).context("Failed to create weather client")?;
    let current = services::load_current_at(&provider, lat, lon).await;

    println!(
        "{}",
        views::render_current_weather(&current, views::unit_symbol(&config.weather.units))
    );
    Ok(exit_code(current.error()))
}

async fn classify(config: &Config, image: &std::path::Path) -> Result<ExitCode> {
    let result = services::classify_file(&backend(config)?, image).await;
    println!("{}", views::render_prediction(&result));
    Ok(exit_code(result.error()))
}

async fn fact(config: &Config, save_image: Option<PathBuf>) -> Result<ExitCode> {
    let content = services::load_home(&backend(config)?).await;
    println!("{}", views::render_home(&content));

    if let (Some(path), Some(image)) = (save_image, content.image.value()) {
        tokio::fs::write(&path, &image.bytes)
            .await
            .with_context(|| format!("Failed to write image to {}", path.display()))?;
        println!("Image saved to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

async fn profile(config: &Config, action: ProfileAction) -> Result<ExitCode> {
    let store: Arc<dyn ProfileStore> = Arc::new(
        FileProfileStore::open(config.profile_store_path())
            .context("Failed to open profile store")?,
    );
    let backend = backend(config)?;

    match action {
        ProfileAction::Show => {
            let orchestrator = orchestrator(config, backend, store);
            let profile = services::load_profile(&orchestrator).await;
            println!("{}", views::render_profile(&profile));
        }
        ProfileAction::Save {
            username,
            city,
            push,
        } => {
            let mut orchestrator = orchestrator(config, backend, store);
            let mut profile = orchestrator.load();
            if let Some(username) = username {
                profile.username = username;
            }
            if let Some(city) = city {
                profile.city = city;
            }
            if let Some(push) = push {
                profile.push_enabled = matches!(push, Toggle::On);
            }

            match services::save_profile(&mut orchestrator, &mut profile).await {
                Ok(saved) => println!("{}", views::render_saved(&saved)),
                Err(e) => anyhow::bail!(AppError::from(e).user_message()),
            }
        }
        ProfileAction::Lookup { username } => match services::lookup_user(&backend, &username).await {
            Ok(id) => println!("{}: {}", username.trim(), id),
            Err(e) => anyhow::bail!(AppError::from(e).user_message()),
        },
        ProfileAction::Reset => {
            services::reset_profile(store.as_ref())
                .map_err(|e| anyhow::anyhow!(AppError::from(e).user_message()))?;
            println!("Profile cleared.");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn orchestrator(
    config: &Config,
    backend: BackendClient,
    store: Arc<dyn ProfileStore>,
) -> ProfileOrchestrator {
    let notifications = Arc::new(ProvisionedNotificationService::new(&config.push));
    ProfileOrchestrator::new(
        backend,
        store,
        PushRegistrar::new(notifications),
        config.push.platform,
    )
}

/// Failed screens already printed their message; only the status is left.
fn exit_code(error: Option<&str>) -> ExitCode {
    if error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
