use crate::services::home_service::HomeError;
use skycast_core::{AppError, BackendError};

impl From<HomeError> for AppError {
    fn from(e: HomeError) -> Self {
        match e {
            HomeError::Fact(_) => {
                AppError::Backend(BackendError::ContentUnavailable("weather fact".into()))
            }
            HomeError::Image(_) => {
                AppError::Backend(BackendError::ContentUnavailable("weather image".into()))
            }
        }
    }
}
