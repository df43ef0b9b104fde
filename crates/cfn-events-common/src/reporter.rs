//! Failure reporting abstraction for the reconcilers
//!
//! Every failure path reports through an injected [`ErrorReporter`] before the
//! outcome is sent, so tests can observe exactly what an operator would find
//! in the logs.

use tracing::error;

/// Trait for reporting reconciliation failures
pub trait ErrorReporter: Send + Sync {
    /// Report a failure message
    fn error(&self, message: &str);

    /// Report a failure together with its diagnostic trace (cause chain and
    /// backtrace when captured)
    fn error_with_trace(&self, message: &str, trace: &str);
}

/// Reporter that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    /// Create a new tracing reporter
    pub fn new() -> Self {
        Self
    }
}

impl ErrorReporter for TracingReporter {
    fn error(&self, message: &str) {
        error!("{message}");
    }

    fn error_with_trace(&self, message: &str, trace: &str) {
        error!(trace = %trace, "{message}");
    }
}
