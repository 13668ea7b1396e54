//! Shared sink registry
//!
//! Constructed sinks are cached per resolved target so every facade
//! pointing at the same file or cache list shares one handle, and a Redis
//! connection is shared per host. Hosts may own a registry instance;
//! [`SinkRegistry::global`] provides the process-wide default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use anyhow::Result;

use crate::sink::{CacheSink, FileSink, ListStore, RedisStore};

/// Resolved cache-sink address: host plus list key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheTarget {
    host: String,
    key: String,
}

/// Keyed cache of constructed sink handles
#[derive(Default)]
pub struct SinkRegistry {
    files: Mutex<HashMap<PathBuf, Arc<FileSink>>>,
    stores: Mutex<HashMap<String, Arc<RedisStore>>>,
    caches: Mutex<HashMap<CacheTarget, Arc<CacheSink>>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default registry
    pub fn global() -> &'static SinkRegistry {
        static GLOBAL: OnceLock<SinkRegistry> = OnceLock::new();
        GLOBAL.get_or_init(SinkRegistry::new)
    }

    /// Get or construct the shared file sink for `path`
    pub fn file_sink(&self, path: &Path) -> Result<Arc<FileSink>> {
        let mut files = lock_unpoisoned(&self.files);

        if let Some(existing) = files.get(path) {
            return Ok(Arc::clone(existing));
        }

        let sink = Arc::new(FileSink::new(path)?);
        files.insert(path.to_path_buf(), Arc::clone(&sink));
        Ok(sink)
    }

    /// Get or construct the shared cache sink for `host` and `key`
    ///
    /// The underlying Redis store (and its eventual connection) is shared
    /// per host; the sink itself is shared per (host, key).
    pub fn cache_sink(&self, host: &str, key: &str) -> Result<Arc<CacheSink>> {
        let target = CacheTarget {
            host: host.to_string(),
            key: key.to_string(),
        };
        if let Some(existing) = lock_unpoisoned(&self.caches).get(&target) {
            return Ok(Arc::clone(existing));
        }

        let store = self.redis_store(host)?;
        Ok(self.cache_sink_with_store(host, key, store))
    }

    /// Get or construct a cache sink backed by a caller-supplied store
    pub fn cache_sink_with_store(
        &self,
        host: &str,
        key: &str,
        store: Arc<dyn ListStore>,
    ) -> Arc<CacheSink> {
        let target = CacheTarget {
            host: host.to_string(),
            key: key.to_string(),
        };

        let mut caches = lock_unpoisoned(&self.caches);
        if let Some(existing) = caches.get(&target) {
            return Arc::clone(existing);
        }

        let sink = Arc::new(CacheSink::new(store, key));
        caches.insert(target, Arc::clone(&sink));
        sink
    }

    fn redis_store(&self, host: &str) -> Result<Arc<RedisStore>> {
        let mut stores = lock_unpoisoned(&self.stores);

        if let Some(existing) = stores.get(host) {
            return Ok(Arc::clone(existing));
        }

        let store = Arc::new(RedisStore::connect(host)?);
        stores.insert(host.to_string(), Arc::clone(&store));
        Ok(store)
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
