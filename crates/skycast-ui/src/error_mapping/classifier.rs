use crate::services::classifier_service::ClassifierError;
use skycast_core::{AppError, BackendError};

impl From<ClassifierError> for AppError {
    fn from(e: ClassifierError) -> Self {
        match e {
            ClassifierError::Read { kind, reason, .. } => {
                AppError::Io(std::io::Error::new(kind, reason))
            }
            ClassifierError::Prediction(s) => AppError::Backend(BackendError::PredictionFailed(s)),
        }
    }
}
