use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

// ---------------------------------------------------------------------------
// PathCache
// ---------------------------------------------------------------------------

/// A concurrent cache-aside store keyed by resolved absolute path.
///
/// Best-effort memoization, not singleflight: `get_or_compute` runs the
/// closure outside the lock, so concurrent misses on one key may each hit
/// the filesystem and the last insert wins. That is acceptable because the
/// cached computations are idempotent pure reads. Entries never expire by
/// time; they leave only through [`evict`](Self::evict) or
/// [`clear`](Self::clear).
pub(crate) struct PathCache<T> {
    entries: RwLock<HashMap<PathBuf, T>>,
}

impl<T: Clone> PathCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, or run `compute` and store its
    /// result. `store` decides admission; callers use it to keep negative
    /// outcomes out of the cache when miss-caching is disabled.
    pub fn get_or_compute<F, P>(&self, key: &Path, compute: F, store: P) -> T
    where
        F: FnOnce() -> T,
        P: FnOnce(&T) -> bool,
    {
        if let Ok(entries) = self.entries.read() {
            if let Some(hit) = entries.get(key) {
                return hit.clone();
            }
        }

        let value = compute();

        if store(&value) {
            if let Ok(mut entries) = self.entries.write() {
                entries.insert(key.to_path_buf(), value.clone());
            }
        }

        value
    }

    /// Remove exactly one key's value. A no-op for absent keys.
    pub fn evict(&self, key: &Path) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    /// Remove every cached value.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
