//! Durable key/value persistence for the user's collections.
//!
//! Every value is a JSON document stored under one of the fixed [`StorageKey`]s.
//! Reads never fail: absent or malformed values fall back to a default and are logged.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
#[cfg(test)]
use tokio::sync::RwLock;

use crate::errors::AppError;

/// Keys of the persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
    SavedGames,
    UserSettings,
    CommunityGames,
    UserRatings,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Favorites => "favorites",
            StorageKey::SavedGames => "savedGames",
            StorageKey::UserSettings => "userSettings",
            StorageKey::CommunityGames => "communityGames",
            StorageKey::UserRatings => "userRatings",
        }
    }
}

/// Load/save capability injected into the session controller.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn load(&self, key: StorageKey) -> Result<Option<String>, AppError>;

    async fn save(&self, key: StorageKey, value: String) -> Result<(), AppError>;
}

/// Load and decode a value, substituting the default on absence or corruption.
pub async fn load_or_default<T>(store: &dyn KeyValueStore, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.load(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::error!("Failed to read {} from storage: {}", key.as_str(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                "Failed to parse {} from storage, using default: {}",
                key.as_str(),
                e
            );
            T::default()
        }
    }
}

/// Encode and write a value.
pub async fn save_json<T>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.save(key, raw).await.inspect_err(|e| {
        tracing::error!("Failed to write {} to storage: {}", key.as_str(), e);
    })
}

/// Process-local store for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<StorageKey, String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing serialisation.
    pub async fn put_raw(&self, key: StorageKey, raw: impl Into<String>) {
        self.values.write().await.insert(key, raw.into());
    }

    pub async fn get_raw(&self, key: StorageKey) -> Option<String> {
        self.values.read().await.get(&key).cloned()
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: StorageKey) -> Result<Option<String>, AppError> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn save(&self, key: StorageKey, value: String) -> Result<(), AppError> {
        self.values.write().await.insert(key, value);
        Ok(())
    }
}
