//! Maps screen service errors to skycast_core::AppError for consistent user-facing messages.
//! Each service has its own module to keep mappings small and readable.

mod classifier;
mod home;
mod profile;
mod weather;
