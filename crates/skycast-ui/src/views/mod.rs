//! Plain-text rendering of screen state.
//!
//! Every async value goes through [`render_loadable`], so loading and failure
//! look the same on every screen.

pub mod classifier_view;
pub mod home_view;
pub mod profile_view;
pub mod weather_view;

pub use classifier_view::render_prediction;
pub use home_view::render_home;
pub use profile_view::{render_profile, render_saved};
pub use weather_view::{render_current_weather, render_report, unit_symbol};

use skycast_core::Loadable;

/// Render one async value: a placeholder while loading, the failure reason,
/// or `render` applied to the value.
pub fn render_loadable<T>(
    value: &Loadable<T>,
    placeholder: &str,
    render: impl FnOnce(&T) -> String,
) -> String {
    match value {
        Loadable::Loading => placeholder.to_string(),
        Loadable::Loaded(v) => render(v),
        Loadable::Failed(reason) => reason.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_state() {
        let render = |v: &i32| format!("value {}", v);
        assert_eq!(render_loadable(&Loadable::Loading, "Loading...", render), "Loading...");
        assert_eq!(render_loadable(&Loadable::Loaded(3), "Loading...", render), "value 3");
        assert_eq!(
            render_loadable(&Loadable::<i32>::Failed("nope".into()), "Loading...", render),
            "nope"
        );
    }
}
