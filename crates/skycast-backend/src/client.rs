//! HTTP client for the SkyCast backend.
//!
//! One host serves user records, push-token relay, cloud classification and
//! the generated weather fact/image.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use reqwest::{multipart, Client};
use skycast_core::{BackendConfig, Platform};
use tracing::instrument;

use crate::error::{BackendError, UPSERT_FAILED_MESSAGE};
use crate::types::*;

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Arc<Client>,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create the user, or update the one with this username.
    ///
    /// The returned id is absent when the server acknowledges without one.
    #[instrument(skip(self), level = "info")]
    pub async fn create_or_update_user(
        &self,
        username: &str,
        city: &str,
        user_id: Option<UserId>,
    ) -> Result<UserRecord, BackendError> {
        let response = self
            .client
            .post(self.url("/user"))
            .json(&UpsertUserRequest {
                username,
                city,
                user_id,
            })
            .send()
            .await?;

        let response = check_status(response, UPSERT_FAILED_MESSAGE).await?;
        let payload: UserIdPayload = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        let record = UserRecord {
            user_id: payload.user_id(),
        };
        tracing::info!("User {} upserted with id {:?}", username, record.user_id);
        Ok(record)
    }

    /// Find the id of an existing user.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup_user(&self, username: &str) -> Result<UserId, BackendError> {
        let response = self
            .client
            .get(self.url("/user"))
            .query(&[("username", username)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(username.to_string()));
        }

        let response = check_status(response, "Failed to load user ID.").await?;
        let payload: UserIdPayload = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        payload
            .user_id()
            .ok_or_else(|| BackendError::NotFound(username.to_string()))
    }

    /// Associate a device push token with a user.
    #[instrument(skip(self, token), level = "info")]
    pub async fn register_push_token(
        &self,
        user_id: UserId,
        token: &PushToken,
        platform: Platform,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/expo-token"))
            .json(&RegisterTokenRequest {
                user_id,
                token: token.as_str(),
                platform: platform.as_str(),
            })
            .send()
            .await?;

        check_status(response, "Failed to register push token.").await?;
        tracing::info!("Push token registered for user {}", user_id);
        Ok(())
    }

    /// Drop whatever push token the backend holds for a user.
    #[instrument(skip(self), level = "info")]
    pub async fn remove_push_token(&self, user_id: UserId) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/remove-expo-token"))
            .json(&RemoveTokenRequest { user_id })
            .send()
            .await?;

        check_status(response, "Failed to remove push token.").await?;
        tracing::info!("Push token removed for user {}", user_id);
        Ok(())
    }

    /// Classify a cloud photo.
    ///
    /// Every failure, transport or server side, is reported as `Prediction`.
    #[instrument(skip(self, image), fields(bytes = image.len()), level = "info")]
    pub async fn classify_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<ClassificationResult, BackendError> {
        let part = multipart::Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name))
            .map_err(|e| BackendError::Prediction(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/predict"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Prediction(e.to_string()))?;

        let response = check_status(response, "Failed to classify image.")
            .await
            .map_err(|e| BackendError::Prediction(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| BackendError::Prediction(format!("invalid prediction: {}", e)))
    }

    /// Short generated fact about weather.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather_fact(&self) -> Result<WeatherFact, BackendError> {
        let response = self.client.get(self.url("/get-fact")).send().await?;
        let response = check_status(response, "Failed to fetch weather fact.").await?;

        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    /// Generated illustration for `prompt`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather_image(&self, prompt: &str) -> Result<WeatherImage, BackendError> {
        let response = self
            .client
            .post(self.url("/generate-weather-image"))
            .json(&ImageRequest { prompt })
            .send()
            .await?;
        let response = check_status(response, "Failed to generate image.").await?;

        let body: ImageResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        let encoded = body
            .image_base64
            .ok_or_else(|| BackendError::InvalidResponse("response carried no image".into()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| BackendError::InvalidResponse(format!("bad image encoding: {}", e)))?;

        Ok(WeatherImage {
            bytes,
            caption: body.text,
        })
    }
}

/// Pass success through; turn anything else into `Server` with the body's
/// `error` field, or `fallback` when there is none.
async fn check_status(
    response: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!("Backend returned {}: {}", status, message);
    Err(BackendError::Server {
        status: status.as_u16(),
        message,
    })
}

fn image_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
