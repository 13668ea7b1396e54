//! Fallback diagnostics and tracing setup
//!
//! The facade never surfaces write failures to callers; it reports them as
//! a single fixed line on a diagnostic sink. The default sink forwards to
//! the process-level tracing channel.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Fixed line emitted when a primary sink write fails
pub const FALLBACK_MESSAGE: &str = "Problem with logging backend";

/// Last-resort output for logging-infrastructure faults
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic line
    fn report(&self, line: &str);
}

/// Default diagnostic sink: forwards to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, line: &str) {
        tracing::error!("{}", line);
    }
}

/// Shared handle to the default diagnostic sink
pub fn default_diagnostics() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingDiagnostics)
}

/// Initialize tracing with sensible defaults
///
/// Uses the RUST_LOG environment variable to control log levels.
/// Default level is INFO.
pub fn init_diagnostics() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .init();
}

/// Initialize tracing with JSON formatting (useful for structured logging)
pub fn init_diagnostics_json() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .json()
        .init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CaptureSink {
        lines: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for CaptureSink {
        fn report(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    #[test]
    fn test_report_through_trait_object() {
        let capture = Arc::new(CaptureSink {
            lines: Mutex::new(Vec::new()),
        });
        let sink: Arc<dyn DiagnosticSink> = capture.clone();

        sink.report(FALLBACK_MESSAGE);

        assert_eq!(*capture.lines.lock().unwrap(), vec![FALLBACK_MESSAGE]);
    }

    #[test]
    fn test_fallback_message_is_fixed() {
        assert_eq!(FALLBACK_MESSAGE, "Problem with logging backend");
    }
}
