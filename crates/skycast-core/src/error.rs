//! Centralized error types for SkyCast.
//!
//! Each client crate has its own precise error enum; the UI layer maps those
//! into the categories below so every screen reports failures the same way.
//! Use `user_message()` for text shown to the user and `Display` for logs.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Push notification error: {0}")]
    Push(#[from] PushError),

    /// Local input check failed; nothing was sent or stored.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for an alert.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(e) => e.user_message().to_string(),
            AppError::Storage(e) => e.user_message().to_string(),
            AppError::Weather(e) => e.user_message().to_string(),
            AppError::Backend(e) => e.user_message(),
            AppError::Push(e) => e.user_message().to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Io(_) => "A file operation failed. Please try again.".to_string(),
        }
    }
}

/// Transport-level failures (no usable HTTP response).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => "Network error. Please try again.",
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Local key-value store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::WriteFailed(_) => "Could not save the profile on this device.",
        }
    }
}

/// Weather provider errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Provider message, e.g. "city not found"
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Weather API error: {0}")]
    ApiError(String),

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::InvalidApiKey => "Weather API key is invalid. Check settings.",
            _ => "Could not fetch weather data.",
        }
    }
}

/// Custom backend errors (users, predictions, facts).
#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-success status with the server-supplied message
    #[error("Server error: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    /// Generated content could not be fetched; names what was missing
    #[error("Content unavailable: {0}")]
    ContentUnavailable(String),
}

impl BackendError {
    /// Server messages are surfaced verbatim.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Rejected { message, .. } => message.clone(),
            BackendError::UserNotFound(_) => "User not found.".to_string(),
            BackendError::PredictionFailed(_) => "Prediction failed.".to_string(),
            BackendError::ContentUnavailable(what) => format!("Failed to fetch {}.", what),
        }
    }
}

/// Push registration problems. Never fatal to the enclosing flow.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("Push permission denied")]
    PermissionDenied,

    #[error("Push notifications unavailable: {0}")]
    Unavailable(String),

    #[error("Push token request failed: {0}")]
    TokenFailed(String),
}

impl PushError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PushError::PermissionDenied => "Failed to get push token for push notifications!",
            PushError::Unavailable(_) => "Must use a physical device for Push Notifications",
            PushError::TokenFailed(_) => "Failed to get push token for push notifications!",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Network(NetworkError::Timeout),
            AppError::Storage(StorageError::WriteFailed("disk full".into())),
            AppError::Weather(WeatherError::ServiceUnavailable),
            AppError::Backend(BackendError::UserNotFound("bob".into())),
            AppError::Push(PushError::PermissionDenied),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{:?}", err);
        }
    }

    #[test]
    fn test_city_not_found_message() {
        let app_err: AppError = WeatherError::CityNotFound("city not found".into()).into();
        assert_eq!(app_err.user_message(), "Could not fetch weather data.");
    }

    #[test]
    fn test_server_message_is_verbatim() {
        let err = AppError::Backend(BackendError::Rejected {
            status: 400,
            message: "Location is required.".into(),
        });
        assert_eq!(err.user_message(), "Location is required.");
    }

    #[test]
    fn test_content_message_names_what_failed() {
        let fact = AppError::Backend(BackendError::ContentUnavailable("weather fact".into()));
        assert_eq!(fact.user_message(), "Failed to fetch weather fact.");
        let image = AppError::Backend(BackendError::ContentUnavailable("weather image".into()));
        assert_eq!(image.user_message(), "Failed to fetch weather image.");
    }
}
