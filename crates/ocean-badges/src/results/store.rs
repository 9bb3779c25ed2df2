use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Key-value persistence for scored results. Blobs are opaque to the store.
pub trait ResultStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, blob: String, ttl: Duration) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ttl of {0:?} is out of range")]
    InvalidTtl(Duration),
    /// Raised by networked backends; the in-memory store never fails this way.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone)]
struct Entry {
    blob: String,
    expires_at: DateTime<Utc>,
}

/// Process-local store; entries vanish at expiry or on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResultStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl InMemoryResultStore {
    pub fn len(&self) -> usize {
        let now = Utc::now();
        let guard = self.entries.lock().expect("result store mutex poisoned");
        guard.values().filter(|entry| entry.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for InMemoryResultStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Utc::now();
        let guard = self.entries.lock().expect("result store mutex poisoned");
        Ok(guard
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.blob.clone()))
    }

    fn set(&self, key: &str, blob: String, ttl: Duration) -> Result<(), StoreError> {
        let ttl_delta = chrono::Duration::from_std(ttl).map_err(|_| StoreError::InvalidTtl(ttl))?;
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl_delta)
            .ok_or(StoreError::InvalidTtl(ttl))?;

        let mut guard = self.entries.lock().expect("result store mutex poisoned");
        guard.retain(|_, entry| entry.expires_at > now);
        guard.insert(key.to_string(), Entry { blob, expires_at });
        Ok(())
    }
}
