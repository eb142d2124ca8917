use skycast_profile::Profile;

use crate::services::ProfileSaved;

pub fn render_profile(profile: &Profile) -> String {
    let user_id = profile
        .user_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(not registered)".to_string());

    format!(
        "Username: {}\nCity: {}\nUser ID: {}\nPush notifications: {}\nPush token: {}",
        profile.username,
        profile.city,
        user_id,
        if profile.push_enabled { "on" } else { "off" },
        if profile.push_token.is_some() { "obtained" } else { "none" },
    )
}

/// Confirmation line, plus the push warning when there is one.
pub fn render_saved(saved: &ProfileSaved) -> String {
    match &saved.warning {
        Some(warning) => format!("{}\n{}", saved.message(), warning),
        None => saved.message().to_string(),
    }
}
