//! Generic keyed resource cache.
//!
//! [`ResourceCache`] is the single owner of native handles (textures, audio
//! clips, fonts) keyed by their identity. It provides load-once, get-or-load,
//! unload and bulk-clear semantics. Handles are released through their `Drop`
//! implementation exactly once: on [`ResourceCache::unload`], on
//! [`ResourceCache::clear`], or when the cache itself is dropped.
//!
//! The cache never calls into a native library directly; every load goes
//! through a loader closure supplied by the caller, usually
//! [`ResourceManager`](super::resourcemanager::ResourceManager).
//!
//! Load failures never escape as errors. They are logged and represented as
//! `None`, because a missing asset must not bring down a running frame loop.

use log::{debug, error, info, trace, warn};
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::fmt::Display;
use std::hash::Hash;

/// Keyed cache owning one native handle per distinct key.
pub struct ResourceCache<K, V> {
    kind: &'static str,
    entries: FxHashMap<K, V>,
}

impl<K, V> ResourceCache<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty cache. `kind` is only used in log lines ("texture", "font", ...).
    pub fn new(kind: &'static str) -> Self {
        trace!("{} cache created", kind);
        Self {
            kind,
            entries: FxHashMap::default(),
        }
    }

    /// Load `key` with `loader` unless it is already cached.
    ///
    /// A repeated load is not an error: the existing handle is returned and a
    /// duplicate-load notice is logged. When the loader fails the cache is left
    /// unchanged and `None` is returned.
    pub fn load<Q, F>(&mut self, key: &Q, loader: F) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + Display + ?Sized,
        F: FnOnce(&Q) -> Result<V, String>,
    {
        if self.entries.contains_key(key) {
            debug!("{} already loaded: {}", self.kind, key);
            return self.entries.get(key);
        }

        match loader(key) {
            Ok(handle) => {
                info!("Loaded {}: {}", self.kind, key);
                let handle: &V = self.entries.entry(key.to_owned()).or_insert(handle);
                Some(handle)
            }
            Err(e) => {
                error!("Failed to load {} '{}': {}", self.kind, key, e);
                None
            }
        }
    }

    /// Return the cached handle for `key`, loading it on a miss.
    ///
    /// First access and repeated access share the same call site. A miss is
    /// a write, so this is not side-effect free.
    pub fn get<Q, F>(&mut self, key: &Q, loader: F) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + Display + ?Sized,
        F: FnOnce(&Q) -> Result<V, String>,
    {
        if !self.entries.contains_key(key) {
            warn!("{} not cached: {}. Attempting to load...", self.kind, key);
            return self.load(key, loader);
        }
        self.entries.get(key)
    }

    /// Read-only lookup that never triggers a load.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Whether `key` currently has a live handle.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Remove and destroy the handle for `key`.
    ///
    /// Returns `false` (and logs) when nothing was cached under that key.
    pub fn unload<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        match self.entries.remove(key) {
            Some(handle) => {
                drop(handle);
                info!("Unloaded {}: {}", self.kind, key);
                true
            }
            None => {
                warn!("{} not found, cannot unload: {}", self.kind, key);
                false
            }
        }
    }

    /// Destroy every cached handle. Safe to call any number of times.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let count = self.entries.len();
        self.entries.clear();
        info!("All {} resources unloaded ({})", self.kind, count);
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Drop for ResourceCache<K, V> {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            trace!("{} cache dropped with {} live handles", self.kind, self.entries.len());
        }
        self.entries.clear();
    }
}
