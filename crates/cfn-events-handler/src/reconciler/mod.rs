//! Lifecycle reconciliation for Rule and Target custom resources
//!
//! Each reconciler turns one lifecycle event into at most two provider calls
//! and exactly one [`ReconciliationOutcome`]. Reconcilers never send the
//! outcome themselves; the [`Handler`](crate::handler::Handler) does.

mod rule;
mod target;

pub use rule::{RuleReconciler, replacement_reason};
pub use target::TargetReconciler;

use crate::aws::classify_anyhow_error;
use cfn_events_common::{ErrorReporter, ReconciliationOutcome};
use std::fmt::Display;
use tracing::warn;

/// Data key exposing the provisioned rule ARN to `Fn::GetAtt`
pub const ARN_ATTRIBUTE: &str = "Arn";

/// Report a provider call failure and build the FAILED outcome for it
pub(crate) fn provider_failure(
    reporter: &dyn ErrorReporter,
    physical_id: Option<String>,
    error: &anyhow::Error,
) -> ReconciliationOutcome {
    let message = format!("{error:#}");
    reporter.error_with_trace(&message, &format!("{error:?}"));

    let classified = classify_anyhow_error(error);
    if let Some(code) = classified.code() {
        warn!(
            code = %code,
            transient = classified.is_transient(),
            suggestion = classified.suggestion().unwrap_or_default(),
            "Provider rejected request"
        );
    }

    ReconciliationOutcome::failed(physical_id, message)
}

/// Report a request rejected before any provider call
pub(crate) fn rejected(
    reporter: &dyn ErrorReporter,
    physical_id: Option<String>,
    error: &dyn Display,
) -> ReconciliationOutcome {
    let message = error.to_string();
    reporter.error(&message);
    ReconciliationOutcome::failed(physical_id, message)
}
