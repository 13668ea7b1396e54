//! The logging facade
//!
//! A [`LogFacade`] resolves its option bag once, obtains a shared sink from
//! the registry, and records severity-tagged events into it. Write faults
//! are absorbed: every record call reports success to the caller, and
//! failures surface only as a line on the diagnostic channel.

use std::sync::Arc;

use anyhow::Result;

use crate::config::{LoggerOptions, ResolvedConfig, SinkKind};
use crate::diagnostics::{default_diagnostics, DiagnosticSink, FALLBACK_MESSAGE};
use crate::registry::SinkRegistry;
use crate::severity::Severity;
use crate::sink::{Sink, SinkError};

/// What actually happened during one record attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Event reached the primary sink
    pub written: bool,
    /// A fault was absorbed and reported on the diagnostic channel
    pub fallback_used: bool,
}

/// Records severity-tagged, coded events into one configured sink
pub struct LogFacade {
    config: ResolvedConfig,
    sink: Sink,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl LogFacade {
    /// Build a facade for `channel` and `app_name` on the process-wide
    /// sink registry
    ///
    /// The first facade per target pays the setup cost (directory creation,
    /// client construction); later facades share the existing handle.
    pub fn new(channel: &str, app_name: &str, options: LoggerOptions) -> Result<Self> {
        Self::new_with(
            channel,
            app_name,
            options,
            SinkRegistry::global(),
            default_diagnostics(),
        )
    }

    /// Build a facade with an explicit registry and diagnostic sink
    pub fn new_with(
        channel: &str,
        app_name: &str,
        options: LoggerOptions,
        registry: &SinkRegistry,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        let config = ResolvedConfig::resolve(channel, app_name, &options);

        let sink = match config.sink_kind {
            SinkKind::File => Sink::File(registry.file_sink(&config.file_path)?),
            SinkKind::Cache => {
                Sink::Cache(registry.cache_sink(&config.cache_host, &config.list_key)?)
            }
        };

        Ok(Self {
            config,
            sink,
            diagnostics,
        })
    }

    /// Channel this facade was built for
    pub fn channel(&self) -> &str {
        &self.config.channel
    }

    /// Application name this facade was built for
    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }

    /// Record one event with a display code
    ///
    /// Always returns `true`: a fault during formatting or writing is
    /// caught, demoted to a fallback diagnostic line, and never propagated.
    pub fn record_event(&self, message: &str, severity: Severity, code: i64) -> bool {
        self.record_event_outcome(message, severity, code);
        true
    }

    /// Record one event with the default code of 0
    pub fn record(&self, message: &str, severity: Severity) -> bool {
        self.record_event(message, severity, 0)
    }

    /// Record one event with the severity given by name
    ///
    /// An unrecognized severity name performs no write and still returns
    /// `true`.
    pub fn record_event_named(&self, message: &str, severity: &str, code: i64) -> bool {
        match Severity::from_name(severity) {
            Some(severity) => self.record_event(message, severity, code),
            None => true,
        }
    }

    /// Record one event, exposing what actually happened
    pub fn record_event_outcome(&self, message: &str, severity: Severity, code: i64) -> WriteOutcome {
        match self.try_record(message, severity, code) {
            Ok(()) => WriteOutcome {
                written: true,
                fallback_used: false,
            },
            Err(err) => {
                tracing::debug!("Sink write failed on channel {}: {}", self.config.channel, err);
                self.diagnostics.report(FALLBACK_MESSAGE);
                WriteOutcome {
                    written: false,
                    fallback_used: true,
                }
            }
        }
    }

    fn try_record(&self, message: &str, severity: Severity, code: i64) -> Result<(), SinkError> {
        let formatted = self.sink.format(code, message)?;
        self.sink.write(severity, &formatted)
    }
}
