//! Log sinks and severity dispatch
//!
//! A facade writes to exactly one sink, chosen at construction time. Each
//! sink variant carries its paired event format: file sinks record plain
//! text lines, cache sinks record JSON objects. The pairing is fixed by the
//! variant, never chosen independently.

mod cache;
mod file;

pub use cache::{CacheSink, ListStore, MemoryStore, RedisStore, REDIS_PORT};
pub use file::FileSink;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::severity::Severity;

/// Faults raised inside a sink write path
///
/// These never escape [`record_event`](crate::LogFacade::record_event); the
/// facade absorbs them into a diagnostic line.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache store write failed: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("event encoding failed: {0}")]
    Format(#[from] serde_json::Error),
}

/// JSON payload recorded by cache sinks
#[derive(Debug, Serialize)]
struct JsonEvent<'a> {
    #[serde(rename = "Code")]
    code: i64,
    #[serde(rename = "Message")]
    message: &'a str,
}

/// A constructed log destination
#[derive(Clone)]
pub enum Sink {
    File(Arc<FileSink>),
    Cache(Arc<CacheSink>),
}

impl Sink {
    /// Format an event the way this sink's destination expects
    pub fn format(&self, code: i64, message: &str) -> Result<String, SinkError> {
        match self {
            Sink::File(_) => Ok(format!("Code: {} Message: {}", code, message)),
            Sink::Cache(_) => Ok(serde_json::to_string(&JsonEvent { code, message })?),
        }
    }

    /// Write one formatted event at the given severity
    pub fn write(&self, severity: Severity, formatted: &str) -> Result<(), SinkError> {
        match self {
            Sink::File(sink) => sink.write(severity, formatted),
            Sink::Cache(sink) => sink.write(severity, formatted),
        }
    }
}
