//! Key/value document store for client-side state.
//!
//! Each key maps to one JSON document. On disk a key is a file named
//! `<key>.json` under the data directory; writes go to a temporary file
//! first and are renamed into place. Without a data directory the
//! documents live in memory for the lifetime of the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GlacierError;

/// Key of the logged-in user document.
pub const USER_KEY: &str = "user";

/// Key of the outburst event snapshot.
pub const EVENTS_KEY: &str = "outburstEvents";

#[derive(Debug)]
enum Backend {
    Disk(PathBuf),
    Memory(Mutex<HashMap<String, String>>),
}

/// Cloneable handle to the document store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    backend: Arc<Backend>,
}

impl LocalStore {
    /// Store backed by files under `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Arc::new(Backend::Disk(dir.into())),
        }
    }

    /// Store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(Mutex::new(HashMap::new()))),
        }
    }

    /// Builds the store from an optional directory.
    #[must_use]
    pub fn from_dir(dir: Option<&Path>) -> Self {
        dir.map_or_else(Self::in_memory, |d| Self::on_disk(d))
    }

    /// Reads and decodes the document under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::Storage`] when the document cannot be read
    /// or does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, GlacierError> {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| GlacierError::Storage(format!("corrupt document {key}: {e}")))
    }

    /// Encodes `value` and stores it under `key`, replacing any previous
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::Storage`] on encoding or I/O failure.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), GlacierError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| GlacierError::Storage(format!("encode {key}: {e}")))?;

        match &*self.backend {
            Backend::Disk(dir) => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| GlacierError::Storage(format!("create {}: {e}", dir.display())))?;
                let path = document_path(dir, key);
                let tmp = path.with_extension("json.tmp");
                tokio::fs::write(&tmp, raw)
                    .await
                    .map_err(|e| GlacierError::Storage(format!("write {key}: {e}")))?;
                tokio::fs::rename(&tmp, &path)
                    .await
                    .map_err(|e| GlacierError::Storage(format!("write {key}: {e}")))?;
            }
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), raw);
            }
        }
        tracing::trace!(key, "document stored");
        Ok(())
    }

    /// Deletes the document under `key`. Removing a missing key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::Storage`] on I/O failure.
    pub async fn remove(&self, key: &str) -> Result<(), GlacierError> {
        match &*self.backend {
            Backend::Disk(dir) => match tokio::fs::remove_file(document_path(dir, key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(GlacierError::Storage(format!("remove {key}: {e}"))),
            },
            Backend::Memory(map) => {
                lock(map)?.remove(key);
                Ok(())
            }
        }
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, GlacierError> {
        match &*self.backend {
            Backend::Disk(dir) => match tokio::fs::read_to_string(document_path(dir, key)).await {
                Ok(raw) => Ok(Some(raw)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(GlacierError::Storage(format!("read {key}: {e}"))),
            },
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
        }
    }

    #[cfg(test)]
    pub(crate) async fn set_raw(&self, key: &str, raw: &str) -> Result<(), GlacierError> {
        match &*self.backend {
            Backend::Disk(dir) => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| GlacierError::Storage(e.to_string()))?;
                tokio::fs::write(document_path(dir, key), raw)
                    .await
                    .map_err(|e| GlacierError::Storage(e.to_string()))
            }
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), raw.to_string());
                Ok(())
            }
        }
    }
}

fn document_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

fn lock(
    map: &Mutex<HashMap<String, String>>,
) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, GlacierError> {
    map.lock()
        .map_err(|_| GlacierError::Internal("local store lock poisoned".to_string()))
}
