use crate::services::profile_service::{ProfileError, PushWarning};
use skycast_core::error::ReqwestErrorExt;
use skycast_core::{AppError, BackendError, NetworkError, PushError, StorageError};
use skycast_profile::VALIDATION_MESSAGE;

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::Validation(_) => AppError::Validation(VALIDATION_MESSAGE.into()),
            ProfileError::Storage(s) => AppError::Storage(StorageError::WriteFailed(s)),
            ProfileError::Server { status, message } => {
                AppError::Backend(BackendError::Rejected { status, message })
            }
            ProfileError::Network(e) => AppError::Network(e.into_network_error()),
            ProfileError::NotFound(s) => AppError::Backend(BackendError::UserNotFound(s)),
            ProfileError::InvalidResponse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        }
    }
}

impl From<PushWarning> for AppError {
    fn from(e: PushWarning) -> Self {
        match e {
            PushWarning::NoPushCapability => {
                AppError::Push(PushError::Unavailable("no push capability".into()))
            }
            PushWarning::PermissionDenied => AppError::Push(PushError::PermissionDenied),
            PushWarning::TokenFailed(s) => AppError::Push(PushError::TokenFailed(s)),
        }
    }
}
