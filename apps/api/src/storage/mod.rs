//! Assessment persistence: slider values and notes under two fixed keys.
//!
//! The store only moves opaque string blobs; the HTTP handlers decide the
//! encoding (JSON maps keyed by slider id).

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub mod file_store;
pub mod handlers;
pub mod redis_store;

pub use file_store::FileStore;
pub use redis_store::RedisStore;

/// Key holding the serialized slider id → value map.
pub const VALUES_KEY: &str = "slider_values";
/// Key holding the serialized slider id → note map.
pub const NOTES_KEY: &str = "slider_notes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Minimal string key-value store, modeled on browser local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Values/notes persistence over any `KeyValueStore`.
#[derive(Clone)]
pub struct AssessmentStore {
    inner: Arc<dyn KeyValueStore>,
}

impl AssessmentStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    pub async fn get_values(&self) -> Result<Option<String>, StoreError> {
        self.inner.get(VALUES_KEY).await
    }

    pub async fn set_values(&self, blob: &str) -> Result<(), StoreError> {
        self.inner.set(VALUES_KEY, blob).await
    }

    pub async fn get_notes(&self) -> Result<Option<String>, StoreError> {
        self.inner.get(NOTES_KEY).await
    }

    pub async fn set_notes(&self, blob: &str) -> Result<(), StoreError> {
        self.inner.set(NOTES_KEY, blob).await
    }

    /// Removes both keys. Other keys in the backing store are left alone.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.inner.remove(VALUES_KEY).await?;
        self.inner.remove(NOTES_KEY).await
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-process store for tests.
    #[derive(Default)]
    pub struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }
}
