//! Screen logic for SkyCast: async services that produce `Loadable` values,
//! and text views that render them.

mod error_mapping;
pub mod services;
pub mod views;
