//! Deterministic collaborators for reconciler tests

use cfn_events_common::{ErrorReporter, SuffixGenerator};
use std::sync::Mutex;

/// Suffix used by [`FixedSuffix::default`]
pub const FIXED_SUFFIX: &str = "ABCDEFGHIJ123";

/// Suffix generator that always returns the same value
#[derive(Debug, Clone)]
pub struct FixedSuffix(pub String);

impl Default for FixedSuffix {
    fn default() -> Self {
        Self(FIXED_SUFFIX.to_string())
    }
}

impl SuffixGenerator for FixedSuffix {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// Error reporter that records every message it receives
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
    traces: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reported messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Traces attached to messages reported with `error_with_trace`
    pub fn traces(&self) -> Vec<String> {
        self.traces.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn error_with_trace(&self, message: &str, trace: &str) {
        self.messages.lock().unwrap().push(message.to_string());
        self.traces.lock().unwrap().push(trace.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_suffix() {
        assert_eq!(FixedSuffix::default().generate(), FIXED_SUFFIX);
        assert_eq!(FixedSuffix("ZZZ".to_string()).generate(), "ZZZ");
    }

    #[test]
    fn test_recording_reporter() {
        let reporter = RecordingReporter::new();
        reporter.error("first");
        reporter.error_with_trace("second", "caused by: boom");

        assert_eq!(reporter.messages(), vec!["first", "second"]);
        assert_eq!(reporter.traces(), vec!["caused by: boom"]);
    }
}
