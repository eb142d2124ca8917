//! Home screen backend: generated weather fact and illustration.
//!
//! The two values load independently. The image prompt is the fact text when
//! the fact arrived, otherwise a generic prompt, so a failed fact never blocks
//! the image and a failed image never hides the fact.

use std::sync::Arc;

use skycast_backend::{BackendClient, WeatherFact, WeatherImage};
use skycast_core::{AppError, Loadable};

/// Prompt used when there is no fact to illustrate
pub const FALLBACK_PROMPT: &str = "A beautiful sky with interesting weather";

#[derive(Debug, Clone)]
pub enum HomeError {
    Fact(String),
    Image(String),
}

impl std::fmt::Display for HomeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeError::Fact(s) => write!(f, "Weather fact error: {}", s),
            HomeError::Image(s) => write!(f, "Weather image error: {}", s),
        }
    }
}

impl std::error::Error for HomeError {}

/// Both home screen values
#[derive(Debug, Clone, PartialEq)]
pub struct HomeContent {
    pub fact: Loadable<WeatherFact>,
    pub image: Loadable<WeatherImage>,
}

impl HomeContent {
    pub fn loading() -> Self {
        Self {
            fact: Loadable::Loading,
            image: Loadable::Loading,
        }
    }
}

#[derive(Debug)]
pub enum HomeServiceMessage {
    FactDone(Loadable<WeatherFact>),
    ImageDone(Loadable<WeatherImage>),
}

pub async fn load_fact(backend: &BackendClient) -> Loadable<WeatherFact> {
    let result = backend.fetch_weather_fact().await.map_err(|e| {
        tracing::warn!("Error fetching weather fact: {}", e);
        HomeError::Fact(e.to_string())
    });
    Loadable::from_result(result, |e| AppError::from(e.clone()).user_message())
}

pub async fn load_image(backend: &BackendClient, prompt: &str) -> Loadable<WeatherImage> {
    let result = backend.fetch_weather_image(prompt).await.map_err(|e| {
        tracing::warn!("Error fetching weather image: {}", e);
        HomeError::Image(e.to_string())
    });
    Loadable::from_result(result, |e| AppError::from(e.clone()).user_message())
}

/// Prompt for the illustration given however the fact turned out.
pub fn image_prompt(fact: &Loadable<WeatherFact>) -> &str {
    match fact.value() {
        Some(f) if !f.fact.trim().is_empty() => &f.fact,
        _ => FALLBACK_PROMPT,
    }
}

/// Load the fact, then the image for it.
pub async fn load_home(backend: &BackendClient) -> HomeContent {
    let fact = load_fact(backend).await;
    let image = load_image(backend, image_prompt(&fact)).await;
    HomeContent { fact, image }
}

/// Request the home content asynchronously.
/// Sends `FactDone` as soon as the fact settles, then `ImageDone`.
pub fn request_home(
    tx: &std::sync::mpsc::Sender<HomeServiceMessage>,
    runtime: &tokio::runtime::Handle,
    backend: Arc<BackendClient>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let fact = load_fact(&backend).await;
        let prompt = image_prompt(&fact).to_string();
        let _ = tx.send(HomeServiceMessage::FactDone(fact));

        let image = load_image(&backend, &prompt).await;
        let _ = tx.send(HomeServiceMessage::ImageDone(image));
    });
}
