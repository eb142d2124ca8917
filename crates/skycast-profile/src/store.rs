use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed keys of the local profile store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileKey {
    Username,
    City,
    PushEnabled,
    Token,
    UserId,
}

impl ProfileKey {
    pub const ALL: [ProfileKey; 5] = [
        ProfileKey::Username,
        ProfileKey::City,
        ProfileKey::PushEnabled,
        ProfileKey::Token,
        ProfileKey::UserId,
    ];

    /// Name the value is persisted under
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKey::Username => "userProfile_username",
            ProfileKey::City => "userProfile_city",
            ProfileKey::PushEnabled => "userProfile_pushEnabled",
            ProfileKey::Token => "userProfile_token",
            ProfileKey::UserId => "userProfile_userId",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Profile store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String-valued settings that survive restarts.
///
/// Writes to several keys are not atomic as a group; a crash between two
/// `set` calls can leave the store partially updated.
pub trait ProfileStore: Send + Sync {
    fn get(&self, key: ProfileKey) -> Option<String>;

    fn set(&self, key: ProfileKey, value: &str) -> Result<(), StoreError>;

    fn remove(&self, keys: &[ProfileKey]) -> Result<(), StoreError>;
}

/// Profile store backed by one JSON object on disk.
pub struct FileProfileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileProfileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let values = if path.exists() {
            let json = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&json)?
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened profile store at {:?} ({} keys)", path, values.len());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self, key: ProfileKey) -> Option<String> {
        self.values.lock().get(key.as_str()).cloned()
    }

    fn set(&self, key: ProfileKey, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock();
        let mut next = values.clone();
        next.insert(key.as_str().to_string(), value.to_string());
        self.flush(&next)?;
        *values = next;
        tracing::debug!("Stored {}", key.as_str());
        Ok(())
    }

    fn remove(&self, keys: &[ProfileKey]) -> Result<(), StoreError> {
        let mut values = self.values.lock();
        let mut next = values.clone();
        for key in keys {
            next.remove(key.as_str());
        }
        self.flush(&next)?;
        *values = next;
        Ok(())
    }
}

/// In-process store with no persistence.
#[derive(Default)]
pub struct MemoryProfileStore {
    values: Mutex<BTreeMap<ProfileKey, String>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, key: ProfileKey) -> Option<String> {
        self.values.lock().get(&key).cloned()
    }

    fn set(&self, key: ProfileKey, value: &str) -> Result<(), StoreError> {
        self.values.lock().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, keys: &[ProfileKey]) -> Result<(), StoreError> {
        let mut values = self.values.lock();
        for key in keys {
            values.remove(key);
        }
        Ok(())
    }
}
