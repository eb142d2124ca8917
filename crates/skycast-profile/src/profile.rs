//! The user profile as edited on the profile screen.

use skycast_backend::{PushToken, UserId};

use crate::store::{ProfileKey, ProfileStore, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub city: String,
    /// Unassigned until the backend confirms the user
    pub user_id: Option<UserId>,
    pub push_enabled: bool,
    /// Cached once the platform issued one
    pub push_token: Option<PushToken>,
}

impl Profile {
    /// Read whatever the store holds; missing or unreadable values fall back
    /// to defaults.
    pub fn load(store: &dyn ProfileStore) -> Self {
        let user_id = store.get(ProfileKey::UserId).and_then(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|e| tracing::warn!("Ignoring stored user id {:?}: {}", raw, e))
                .ok()
                .and_then(UserId::from_raw)
        });

        Self {
            username: store.get(ProfileKey::Username).unwrap_or_default(),
            city: store.get(ProfileKey::City).unwrap_or_default(),
            user_id,
            push_enabled: store
                .get(ProfileKey::PushEnabled)
                .is_some_and(|v| v == "true"),
            push_token: store.get(ProfileKey::Token).and_then(PushToken::new),
        }
    }

    /// Persist the form fields: username, city and push flag.
    pub fn store_form(&self, store: &dyn ProfileStore) -> Result<(), StoreError> {
        store.set(ProfileKey::Username, &self.username)?;
        store.set(ProfileKey::City, &self.city)?;
        store.set(ProfileKey::PushEnabled, if self.push_enabled { "true" } else { "false" })?;
        Ok(())
    }

    pub fn store_user_id(&self, store: &dyn ProfileStore) -> Result<(), StoreError> {
        match self.user_id {
            Some(id) => store.set(ProfileKey::UserId, &id.to_string()),
            None => store.remove(&[ProfileKey::UserId]),
        }
    }

    pub fn store_token(&self, store: &dyn ProfileStore) -> Result<(), StoreError> {
        match &self.push_token {
            Some(token) => store.set(ProfileKey::Token, token.as_str()),
            None => store.remove(&[ProfileKey::Token]),
        }
    }

    /// Wipe every persisted profile value.
    pub fn clear(store: &dyn ProfileStore) -> Result<(), StoreError> {
        store.remove(&ProfileKey::ALL)
    }
}
