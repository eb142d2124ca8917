//! Save-profile flow.
//!
//! Validation and the user upsert are fatal; everything push-related is best
//! effort and only recorded in the outcome.

use std::sync::Arc;

use skycast_backend::{BackendClient, BackendError, UserId};
use skycast_core::Platform;
use thiserror::Error;

use crate::profile::Profile;
use crate::push::{PushRegistrar, PushUnavailable};
use crate::store::{ProfileStore, StoreError};

pub const VALIDATION_MESSAGE: &str = "Please enter both username and city.";
pub const SAVED_MESSAGE: &str = "Profile saved!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Username,
    City,
}

#[derive(Debug, Error)]
pub enum SaveError {
    /// Nothing was stored or sent
    #[error("Please enter both username and city. (missing {0:?})")]
    Validation(MissingField),

    #[error("Could not store profile locally: {0}")]
    Storage(#[from] StoreError),

    /// The user upsert failed; local values were already written
    #[error("Failed to save user: {0}")]
    Upsert(#[from] BackendError),
}

/// What happened on the push side of a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Registered,
    RegistrationFailed(String),
    TokenUnavailable(PushUnavailable),
    Removed,
    RemovalFailed(String),
    /// No confirmed user id to attach a push operation to
    SkippedNoUserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub user_id: Option<UserId>,
    pub push: PushOutcome,
}

pub struct ProfileOrchestrator {
    backend: BackendClient,
    store: Arc<dyn ProfileStore>,
    push: PushRegistrar,
    platform: Platform,
}

impl ProfileOrchestrator {
    pub fn new(
        backend: BackendClient,
        store: Arc<dyn ProfileStore>,
        push: PushRegistrar,
        platform: Platform,
    ) -> Self {
        Self {
            backend,
            store,
            push,
            platform,
        }
    }

    /// Profile as currently persisted.
    pub fn load(&self) -> Profile {
        Profile::load(self.store.as_ref())
    }

    /// Validate, persist, upsert, then register or revoke the push token.
    pub async fn save(&mut self, profile: &mut Profile) -> Result<SaveOutcome, SaveError> {
        let username = profile.username.trim().to_string();
        let city = profile.city.trim().to_string();
        if username.is_empty() {
            return Err(SaveError::Validation(MissingField::Username));
        }
        if city.is_empty() {
            return Err(SaveError::Validation(MissingField::City));
        }
        profile.username = username;
        profile.city = city;

        profile.store_form(self.store.as_ref())?;

        let record = self
            .backend
            .create_or_update_user(&profile.username, &profile.city, profile.user_id)
            .await?;

        // Freshly returned id wins; the known id only covers an id-less ack.
        let resolved = record.user_id.or(profile.user_id);
        if resolved != profile.user_id {
            tracing::info!("User id changed from {:?} to {:?}", profile.user_id, resolved);
            profile.user_id = resolved;
            if let Err(e) = profile.store_user_id(self.store.as_ref()) {
                tracing::warn!("Failed to persist user id: {}", e);
            }
        }

        let push = match resolved {
            None => {
                tracing::warn!("Backend returned no user id; skipping push update");
                PushOutcome::SkippedNoUserId
            }
            Some(user_id) if profile.push_enabled => self.register_push(profile, user_id).await,
            Some(user_id) => self.revoke_push(user_id).await,
        };

        Ok(SaveOutcome {
            user_id: resolved,
            push,
        })
    }

    /// Look up the id of a saved username that never got one locally.
    pub async fn sync_user_id(&self, profile: &mut Profile) -> Result<Option<UserId>, BackendError> {
        if profile.user_id.is_some() || profile.username.trim().is_empty() {
            return Ok(profile.user_id);
        }

        match self.backend.lookup_user(profile.username.trim()).await {
            Ok(id) => {
                profile.user_id = Some(id);
                if let Err(e) = profile.store_user_id(self.store.as_ref()) {
                    tracing::warn!("Failed to persist user id: {}", e);
                }
                Ok(Some(id))
            }
            Err(BackendError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn register_push(&mut self, profile: &mut Profile, user_id: UserId) -> PushOutcome {
        let token = match profile.push_token.clone() {
            Some(token) => token,
            None => match self.push.obtain_token().await {
                Ok(token) => {
                    profile.push_token = Some(token.clone());
                    if let Err(e) = profile.store_token(self.store.as_ref()) {
                        tracing::warn!("Failed to cache push token: {}", e);
                    }
                    token
                }
                Err(reason) => {
                    tracing::warn!("Push enabled but no token: {}", reason);
                    return PushOutcome::TokenUnavailable(reason);
                }
            },
        };

        match self
            .backend
            .register_push_token(user_id, &token, self.platform)
            .await
        {
            Ok(()) => PushOutcome::Registered,
            Err(e) => {
                tracing::warn!("Error sending push token to backend: {}", e);
                PushOutcome::RegistrationFailed(e.to_string())
            }
        }
    }

    async fn revoke_push(&self, user_id: UserId) -> PushOutcome {
        match self.backend.remove_push_token(user_id).await {
            Ok(()) => PushOutcome::Removed,
            Err(e) => {
                tracing::warn!("Error removing push token from backend: {}", e);
                PushOutcome::RemovalFailed(e.to_string())
            }
        }
    }
}
