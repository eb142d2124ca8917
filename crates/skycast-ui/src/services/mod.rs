pub mod classifier_service;
pub mod home_service;
pub mod profile_service;
pub mod weather_service;

pub use classifier_service::{
    classify_bytes, classify_file, request_classify, ClassifierError, ClassifierServiceMessage,
};
pub use home_service::{
    load_fact, load_home, load_image, request_home, HomeContent, HomeError, HomeServiceMessage,
};
pub use profile_service::{
    load_profile, lookup_user, reset_profile, save_profile, ProfileError, ProfileSaved,
    PushWarning,
};
pub use weather_service::{
    load_current_at, load_report, request_report as request_weather_report, WeatherError,
    WeatherServiceMessage,
};
