//! Profile screen backend: load, save, look up and reset the user profile.

use skycast_backend::{BackendClient, BackendError, UserId};
use skycast_profile::{
    MissingField, Profile, ProfileOrchestrator, ProfileStore, PushOutcome, PushUnavailable,
    SaveError, SaveOutcome, StoreError, SAVED_MESSAGE,
};

use skycast_core::AppError;

/// Error type for profile operations
#[derive(Debug)]
pub enum ProfileError {
    Validation(MissingField),
    Storage(String),
    /// Non-success status; the server message is shown as is
    Server { status: u16, message: String },
    Network(reqwest::Error),
    NotFound(String),
    InvalidResponse(String),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::Validation(field) => write!(f, "Missing {:?}", field),
            ProfileError::Storage(s) => write!(f, "Storage error: {}", s),
            ProfileError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ProfileError::Network(e) => write!(f, "Network error: {}", e),
            ProfileError::NotFound(s) => write!(f, "User not found: {}", s),
            ProfileError::InvalidResponse(s) => write!(f, "Invalid response: {}", s),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<BackendError> for ProfileError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Network(e) => ProfileError::Network(e),
            BackendError::Server { status, message } => ProfileError::Server { status, message },
            BackendError::NotFound(s) => ProfileError::NotFound(s),
            BackendError::Prediction(s) | BackendError::InvalidResponse(s) => {
                ProfileError::InvalidResponse(s)
            }
        }
    }
}

impl From<StoreError> for ProfileError {
    fn from(e: StoreError) -> Self {
        ProfileError::Storage(e.to_string())
    }
}

impl From<SaveError> for ProfileError {
    fn from(e: SaveError) -> Self {
        match e {
            SaveError::Validation(field) => ProfileError::Validation(field),
            SaveError::Storage(e) => e.into(),
            SaveError::Upsert(e) => e.into(),
        }
    }
}

/// Push problem worth telling the user about after a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushWarning {
    NoPushCapability,
    PermissionDenied,
    TokenFailed(String),
}

impl From<PushUnavailable> for PushWarning {
    fn from(e: PushUnavailable) -> Self {
        match e {
            PushUnavailable::NoPushCapability => PushWarning::NoPushCapability,
            PushUnavailable::PermissionDenied => PushWarning::PermissionDenied,
            PushUnavailable::TokenFailed(s) => PushWarning::TokenFailed(s),
        }
    }
}

/// A completed save, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSaved {
    pub outcome: SaveOutcome,
    /// Shown next to the confirmation when push could not be set up
    pub warning: Option<String>,
}

impl ProfileSaved {
    pub fn message(&self) -> &'static str {
        SAVED_MESSAGE
    }
}

/// Load the stored profile, filling in a missing user id from the backend.
///
/// A failed lookup is logged; the stored profile is still returned.
pub async fn load_profile(orchestrator: &ProfileOrchestrator) -> Profile {
    let mut profile = orchestrator.load();
    if let Err(e) = orchestrator.sync_user_id(&mut profile).await {
        tracing::warn!("Failed to load user id for {:?}: {}", profile.username, e);
    }
    profile
}

/// Save the form through the orchestrator.
pub async fn save_profile(
    orchestrator: &mut ProfileOrchestrator,
    profile: &mut Profile,
) -> Result<ProfileSaved, ProfileError> {
    let outcome = orchestrator.save(profile).await.map_err(|e| {
        tracing::error!("Error saving profile: {}", e);
        ProfileError::from(e)
    })?;

    let warning = match &outcome.push {
        PushOutcome::TokenUnavailable(reason) => {
            Some(AppError::from(PushWarning::from(reason.clone())).user_message())
        }
        _ => None,
    };

    tracing::info!("Profile saved: {:?}", outcome);
    Ok(ProfileSaved { outcome, warning })
}

/// Id of an existing user.
pub async fn lookup_user(backend: &BackendClient, username: &str) -> Result<UserId, ProfileError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ProfileError::Validation(MissingField::Username));
    }
    Ok(backend.lookup_user(username).await?)
}

/// Forget every locally stored profile value.
pub fn reset_profile(store: &dyn ProfileStore) -> Result<(), ProfileError> {
    Profile::clear(store)?;
    tracing::info!("Local profile cleared");
    Ok(())
}
