//! Cache-store sink
//!
//! Pushes one JSON-encoded event per call onto a list in a remote store.
//! The production store is Redis on its well-known port; the [`ListStore`]
//! trait keeps the transport swappable, and [`MemoryStore`] provides a
//! no-network implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use redis::Commands;

use super::SinkError;
use crate::severity::Severity;

/// Fixed port the cache store listens on
pub const REDIS_PORT: u16 = 6379;

/// Push-only view of a remote list structure
pub trait ListStore: Send + Sync {
    /// Append `payload` to the list at `key`
    fn push(&self, key: &str, payload: &str) -> Result<(), SinkError>;
}

/// Redis-backed [`ListStore`]
///
/// The connection is opened on first push and kept for the process
/// lifetime; it is never explicitly closed.
pub struct RedisStore {
    client: redis::Client,
    connection: Mutex<Option<redis::Connection>>,
}

impl RedisStore {
    /// Build a store for `host`
    ///
    /// Only parses the target; connecting is deferred to the first push so
    /// an unreachable host surfaces inside the record path.
    pub fn connect(host: &str) -> Result<Self> {
        let url = format!("redis://{}:{}/", host, REDIS_PORT);
        let client = redis::Client::open(url).context("Failed to build cache store client")?;
        tracing::debug!("Cache store client ready for {}:{}", host, REDIS_PORT);

        Ok(Self {
            client,
            connection: Mutex::new(None),
        })
    }
}

impl ListStore for RedisStore {
    fn push(&self, key: &str, payload: &str) -> Result<(), SinkError> {
        let mut guard = lock_unpoisoned(&self.connection);

        if guard.is_none() {
            let connection = self.client.get_connection()?;
            tracing::debug!("Connected to cache store");
            *guard = Some(connection);
        }

        if let Some(connection) = guard.as_mut() {
            let _: () = connection.rpush(key, payload)?;
        }

        Ok(())
    }
}

/// In-memory [`ListStore`] for tests and hosts that need a no-network sink
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the list at `key`
    pub fn entries(&self, key: &str) -> Vec<String> {
        lock_unpoisoned(&self.lists)
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}

impl ListStore for MemoryStore {
    fn push(&self, key: &str, payload: &str) -> Result<(), SinkError> {
        lock_unpoisoned(&self.lists)
            .entry(key.to_string())
            .or_default()
            .push(payload.to_string());
        Ok(())
    }
}

/// Cache-backed sink bound to one list key
pub struct CacheSink {
    store: Arc<dyn ListStore>,
    key: String,
}

impl CacheSink {
    pub fn new(store: Arc<dyn ListStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Destination list key of this sink
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Push one encoded event
    ///
    /// The cache sink records every severity; the level is part of the
    /// dispatch contract but does not gate the push.
    pub fn write(&self, _severity: Severity, payload: &str) -> Result<(), SinkError> {
        self.store.push(&self.key, payload)
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
