//! Push registration: permission prompt and device token.
//!
//! `PushRegistrar` walks the platform notification service through
//! `Unregistered -> PermissionRequested -> Granted -> TokenObtained`, or back
//! to `Unregistered` when permission is denied. It never contacts the backend.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use skycast_backend::PushToken;
use skycast_core::PushConfig;
use thiserror::Error;

/// Permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

/// Platform notification service seam.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// False when this environment cannot receive push (simulator, headless host).
    fn has_push_capability(&self) -> bool;

    async fn permission_status(&self) -> PermissionStatus;

    /// Show the permission prompt. Only called while undetermined.
    async fn request_permission(&self) -> PermissionStatus;

    /// Token for this install; `Err` carries the platform's reason.
    async fn device_token(&self) -> Result<PushToken, String>;
}

/// Why no token could be obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushUnavailable {
    #[error("Must use a physical device for Push Notifications")]
    NoPushCapability,

    #[error("Push permission denied")]
    PermissionDenied,

    #[error("Failed to get push token: {0}")]
    TokenFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushState {
    Unregistered,
    PermissionRequested,
    Granted,
    TokenObtained(PushToken),
}

pub struct PushRegistrar {
    service: Arc<dyn NotificationService>,
    state: PushState,
}

impl PushRegistrar {
    pub fn new(service: Arc<dyn NotificationService>) -> Self {
        Self {
            service,
            state: PushState::Unregistered,
        }
    }

    pub fn state(&self) -> &PushState {
        &self.state
    }

    /// Ask for permission if the platform has not decided yet.
    pub async fn request_permission(&mut self) -> PermissionStatus {
        let status = match self.service.permission_status().await {
            PermissionStatus::Undetermined => {
                self.state = PushState::PermissionRequested;
                tracing::debug!("Requesting push permission");
                self.service.request_permission().await
            }
            decided => decided,
        };

        match status {
            PermissionStatus::Granted => {
                if !matches!(self.state, PushState::TokenObtained(_)) {
                    self.state = PushState::Granted;
                }
            }
            _ => self.state = PushState::Unregistered,
        }
        status
    }

    /// Permission plus token, reported as a value rather than an error chain.
    pub async fn obtain_token(&mut self) -> Result<PushToken, PushUnavailable> {
        if let PushState::TokenObtained(token) = &self.state {
            return Ok(token.clone());
        }

        if !self.service.has_push_capability() {
            tracing::warn!("No push capability in this environment");
            return Err(PushUnavailable::NoPushCapability);
        }

        if self.request_permission().await != PermissionStatus::Granted {
            tracing::warn!("Push permission not granted");
            return Err(PushUnavailable::PermissionDenied);
        }

        match self.service.device_token().await {
            Ok(token) => {
                tracing::info!("Obtained push token {:?}", token);
                self.state = PushState::TokenObtained(token.clone());
                Ok(token)
            }
            Err(reason) => {
                tracing::warn!("Platform failed to issue a push token: {}", reason);
                Err(PushUnavailable::TokenFailed(reason))
            }
        }
    }
}

/// Notification service for hosts without a platform push SDK.
///
/// The device token is provisioned through configuration; without one the
/// host has no push capability. The permission prompt is answered from
/// `allow_permission`, once.
pub struct ProvisionedNotificationService {
    token: Option<String>,
    allow: bool,
    status: Mutex<PermissionStatus>,
}

impl ProvisionedNotificationService {
    pub fn new(config: &PushConfig) -> Self {
        Self {
            token: config.device_token.clone(),
            allow: config.allow_permission,
            status: Mutex::new(PermissionStatus::Undetermined),
        }
    }
}

#[async_trait]
impl NotificationService for ProvisionedNotificationService {
    fn has_push_capability(&self) -> bool {
        self.token.is_some()
    }

    async fn permission_status(&self) -> PermissionStatus {
        *self.status.lock()
    }

    async fn request_permission(&self) -> PermissionStatus {
        let mut status = self.status.lock();
        if *status == PermissionStatus::Undetermined {
            *status = if self.allow {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
        }
        *status
    }

    async fn device_token(&self) -> Result<PushToken, String> {
        self.token
            .as_deref()
            .and_then(PushToken::new)
            .ok_or_else(|| "no device token provisioned".to_string())
    }
}
