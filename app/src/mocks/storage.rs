//! In-memory session storage.

use crate::error::StorageError;
use crate::session::{SessionStorage, StorageFuture};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// HashMap-backed [`SessionStorage`] for fast, deterministic tests.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the effect handlers wrote.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage holding one item
    #[must_use]
    pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut items) = self.items.write() {
            items.insert(key.into(), value.into());
        }
        self
    }

    /// Number of stored items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().map_or(0, |items| items.len())
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Unavailable)?;
        Ok(items.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Unavailable)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Unavailable)?;
        items.remove(key);
        Ok(())
    }
}

impl SessionStorage for InMemoryStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(std::future::ready(self.get(key)))
    }

    fn set_item<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(std::future::ready(self.set(key, value)))
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(std::future::ready(self.remove(key)))
    }
}
