//! Local profile, push registration and the save-profile flow.

pub mod orchestrator;
pub mod profile;
pub mod push;
pub mod store;

pub use orchestrator::{
    MissingField, ProfileOrchestrator, PushOutcome, SaveError, SaveOutcome, SAVED_MESSAGE,
    VALIDATION_MESSAGE,
};
pub use profile::Profile;
pub use push::{
    NotificationService, PermissionStatus, ProvisionedNotificationService, PushRegistrar,
    PushState, PushUnavailable,
};
pub use store::{FileProfileStore, MemoryProfileStore, ProfileKey, ProfileStore, StoreError};
