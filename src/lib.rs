//! sinklog - records coded application events to a file or a cache-store list
//!
//! A thin facade: resolve a small option bag, pick one of two sinks at
//! construction time (file-backed text lines or Redis-backed JSON objects),
//! share constructed sinks through a keyed registry, and absorb every write
//! failure so logging can never crash its host.

pub mod config;
pub mod diagnostics;
pub mod facade;
pub mod registry;
pub mod severity;
pub mod sink;

pub use config::{LoggerOptions, SinkKind};
pub use diagnostics::{
    init_diagnostics, init_diagnostics_json, DiagnosticSink, TracingDiagnostics, FALLBACK_MESSAGE,
};
pub use facade::{LogFacade, WriteOutcome};
pub use registry::SinkRegistry;
pub use severity::Severity;
pub use sink::{CacheSink, FileSink, ListStore, MemoryStore, RedisStore, Sink, SinkError};
