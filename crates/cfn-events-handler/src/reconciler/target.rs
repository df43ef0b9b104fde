//! CloudWatch Events Target reconciliation
//!
//! `PutTargets` is an upsert keyed by target id, so Create and Update share
//! one path and a target is never replaced. The id must stay stable across
//! updates or the provider adds a second target instead of overwriting.

use super::{provider_failure, rejected};
use crate::aws::{EntriesResult, EventsOperations, TargetSpec};
use cfn_events_common::naming::generated_target_id;
use cfn_events_common::{
    ErrorReporter, LifecycleEvent, ReconciliationOutcome, RequestType, SuffixGenerator,
    TargetProperties,
};
use tracing::{info, warn};

/// Reconciles a single Target custom resource
pub struct TargetReconciler<'a, E> {
    events: &'a E,
    suffix: &'a dyn SuffixGenerator,
    reporter: &'a dyn ErrorReporter,
}

impl<'a, E: EventsOperations> TargetReconciler<'a, E> {
    pub fn new(
        events: &'a E,
        suffix: &'a dyn SuffixGenerator,
        reporter: &'a dyn ErrorReporter,
    ) -> Self {
        Self {
            events,
            suffix,
            reporter,
        }
    }

    /// Create or update the target.
    ///
    /// Create derives a fresh id from the logical id; Update reuses the
    /// physical id unchanged. Delete is routed to [`Self::delete`].
    pub async fn upsert(
        &self,
        event: &LifecycleEvent,
        request_type: RequestType,
    ) -> ReconciliationOutcome {
        let (id, echo) = match request_type {
            RequestType::Create => (
                generated_target_id(&event.logical_resource_id, self.suffix),
                None,
            ),
            RequestType::Update => match event.require_physical_id() {
                Ok(id) => (id.to_string(), Some(id.to_string())),
                Err(e) => return rejected(self.reporter, None, &e),
            },
            RequestType::Delete => return self.delete(event).await,
        };

        let properties = match TargetProperties::from_value(&event.resource_properties) {
            Ok(p) => p,
            Err(e) => return rejected(self.reporter, echo, &e),
        };

        let target = TargetSpec::from_properties(&id, &properties);
        match self.events.put_targets(&properties.rule, vec![target]).await {
            Ok(result) => self.entries_outcome(result, id, echo, "put"),
            Err(e) => provider_failure(self.reporter, echo, &e),
        }
    }

    /// Remove the target named by the physical id from its rule
    pub async fn delete(&self, event: &LifecycleEvent) -> ReconciliationOutcome {
        let id = match event.require_physical_id() {
            Ok(id) => id.to_string(),
            Err(e) => return rejected(self.reporter, None, &e),
        };
        let echo = Some(id.clone());

        let rule = match TargetProperties::rule_from_value(&event.resource_properties) {
            Ok(rule) => rule,
            Err(e) => return rejected(self.reporter, echo, &e),
        };

        match self.events.remove_targets(&rule, vec![id.clone()]).await {
            Ok(result) => self.entries_outcome(result, id, echo, "remove"),
            Err(e) => provider_failure(self.reporter, echo, &e),
        }
    }

    /// Any failed entry fails this resource, since it owns exactly one target
    fn entries_outcome(
        &self,
        result: EntriesResult,
        id: String,
        echo: Option<String>,
        action: &str,
    ) -> ReconciliationOutcome {
        if !result.has_failures() {
            info!(target_id = %id, action, "Target reconciled");
            return ReconciliationOutcome::success(id);
        }

        for entry in &result.failed_entries {
            self.reporter.error(&entry.to_string());
        }
        warn!(
            target_id = %id,
            failed = result.failed_entry_count,
            "Provider reported failed target entries"
        );

        let details = result
            .failed_entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        ReconciliationOutcome::failed(
            echo,
            format!("Failed to {action} target {id}: {details}"),
        )
    }
}
