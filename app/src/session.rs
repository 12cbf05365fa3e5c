//! Session persistence and cookies.
//!
//! The login session is one JSON blob (`{"token": …, "username": …}`) kept
//! under a fixed key in a key-value [`SessionStorage`]. [`SessionStore`] reads
//! it fresh on every call so a login or logout is visible to the next
//! request without any cache to invalidate.

use crate::error::StorageError;
use crate::models::Session;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Boxed future returned by [`SessionStorage`] methods.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Key-value storage for the session blob.
///
/// Methods return futures so file or network backed storage never blocks
/// an executor thread.
pub trait SessionStorage: Send + Sync {
    /// Read the value under `key`
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read.
    fn get_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be written.
    fn set_item<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a, ()>;

    /// Remove `key`
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be written.
    fn remove_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;
}

/// [`SessionStorage`] backed by a JSON object in a file.
///
/// A missing file reads as empty storage. File access goes through
/// `tokio::fs`; the async mutex serializes read-modify-write cycles.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Storage in the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(map)?).await?;
        Ok(())
    }

    async fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        change(&mut map);
        self.write_map(&map).await
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            Ok(self.read_map().await?.remove(key))
        })
    }

    fn set_item<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(self.update(move |map| {
            map.insert(key.to_string(), value.to_string());
        }))
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(self.update(move |map| {
            map.remove(key);
        }))
    }
}

/// Typed access to the session blob.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("key", &self.key).finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Session blob stored under `key`
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The stored session.
    ///
    /// Unreadable storage and malformed blobs are logged and treated as
    /// logged out.
    pub async fn load(&self) -> Option<Session> {
        let raw = match self.storage.get_item(&self.key).await {
            Ok(raw) => raw?,
            Err(error) => {
                tracing::warn!(key = %self.key, error = %error, "Session storage unreadable");
                return None;
            },
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!(key = %self.key, error = %error, "Ignoring malformed session blob");
                None
            },
        }
    }

    /// Token of the stored session
    pub async fn token(&self) -> Option<String> {
        self.load().await.map(|session| session.token)
    }

    /// Persist `session`
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the session cannot be written.
    pub async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let blob = serde_json::to_string(session)?;
        self.storage.set_item(&self.key, &blob).await
    }

    /// Forget the stored session
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the storage cannot be written.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key).await
    }
}

/// Read access to browser-style cookies.
pub trait CookieStore: Send + Sync {
    /// Value of the cookie `name`
    fn get(&self, name: &str) -> Option<String>;
}

/// A fixed set of cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCookies {
    cookies: BTreeMap<String, String>,
}

impl StaticCookies {
    /// Name of the cookie holding the CSRF token
    pub const CSRF_COOKIE: &'static str = "csrftoken";

    /// No cookies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Cookies carrying an optional CSRF token
    #[must_use]
    pub fn with_csrf(token: Option<&str>) -> Self {
        match token {
            Some(token) => Self::new().with_cookie(Self::CSRF_COOKIE, token),
            None => Self::new(),
        }
    }
}

impl CookieStore for StaticCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }
}
