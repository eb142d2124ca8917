use crate::services::weather_service::WeatherError as UiWeatherError;
use skycast_core::{AppError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::EmptyCity => AppError::Validation("Please enter a city.".into()),
            UiWeatherError::CityNotFound(s) => AppError::Weather(WeatherError::CityNotFound(s)),
            UiWeatherError::InvalidApiKey => AppError::Weather(WeatherError::InvalidApiKey),
            // Transport failures share the generic weather message
            UiWeatherError::Network(_) => AppError::Weather(WeatherError::ServiceUnavailable),
            UiWeatherError::Api(s) => AppError::Weather(WeatherError::ApiError(s)),
        }
    }
}
