//! Backend-specific error types.

use thiserror::Error;

/// Fallback text when the server rejects an upsert without a message
pub const UPSERT_FAILED_MESSAGE: &str = "Failed to create/update profile.";

#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport failure: unreachable host, timeout, broken body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status; `message` is what the server said
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("User not found: {0}")]
    NotFound(String),

    /// Classification failed, for any reason
    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display_carries_message() {
        let err = BackendError::Server {
            status: 400,
            message: "Username is required.".into(),
        };
        assert!(err.to_string().contains("Username is required."));
    }
}
