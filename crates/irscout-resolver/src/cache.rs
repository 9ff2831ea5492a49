//! Persistent ticker → URL cache.
//!
//! The cache is a flat JSON object loaded once at construction and rewritten
//! on every change. Entries never expire: once a ticker is resolved its URL
//! is authoritative until the file is cleared by hand.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::CacheError;

pub struct TickerCache {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
    /// Serializes file writes so concurrent `put`s cannot interleave.
    write_lock: Mutex<()>,
}

impl TickerCache {
    /// Loads the cache from `path`.
    ///
    /// A missing, unreadable or corrupt file yields an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded ticker cache");
        Self {
            path: Some(path),
            entries: Mutex::new(entries),
            write_lock: Mutex::new(()),
        }
    }

    /// A cache that lives only for the process; `flush` is a no-op.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<String> {
        self.lock_entries().get(&ticker.to_uppercase()).cloned()
    }

    /// Stores `url` for `ticker` and persists the cache.
    ///
    /// Persistence failures are logged and otherwise ignored.
    pub fn put(&self, ticker: &str, url: &str) {
        let key = ticker.to_uppercase();
        {
            let mut entries = self.lock_entries();
            if entries.get(&key).is_some_and(|existing| existing == url) {
                return;
            }
            entries.insert(key.clone(), url.to_string());
        }

        if let Err(e) = self.flush() {
            tracing::warn!(ticker = %key, error = %e, "failed to persist ticker cache");
        }
    }

    /// Writes the current entries to disk.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if serialization or the file write fails.
    pub fn flush(&self) -> Result<(), CacheError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.lock_entries().clone();
        let body = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, body).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, ordered by ticker.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.lock_entries()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_entries(path: &Path) -> BTreeMap<String, String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "unreadable ticker cache, starting empty"
            );
            return BTreeMap::new();
        }
    };

    match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "corrupt ticker cache, starting empty"
            );
            BTreeMap::new()
        }
    }
}
