//! Invocation entry point: dispatch, then exactly one response
//!
//! Reconcilers return their outcome and [`Handler::handle`] sends it, so
//! every invocation produces one response no matter which branch it took.
//! [`Handler::reject`] covers payloads too malformed to reconcile.

use crate::aws::EventsOperations;
use crate::notifier::ResponseNotifier;
use crate::reconciler::{RuleReconciler, TargetReconciler};
use anyhow::{Context, Result};
use cfn_events_common::{
    ErrorReporter, InvocationContext, LifecycleEvent, RandomSuffix, ReconciliationOutcome,
    RequestType, ResourceKind, SuffixGenerator, TracingReporter,
};
use std::fmt::Display;
use std::path::Path;
use tracing::{error, info, warn};

/// Handler for one custom resource kind
pub struct Handler<E, N> {
    kind: ResourceKind,
    events: E,
    notifier: N,
    suffix: Box<dyn SuffixGenerator>,
    reporter: Box<dyn ErrorReporter>,
}

impl<E: EventsOperations, N: ResponseNotifier> Handler<E, N> {
    /// Create a handler with random name suffixes and tracing error reports
    pub fn new(kind: ResourceKind, events: E, notifier: N) -> Self {
        Self {
            kind,
            events,
            notifier,
            suffix: Box::new(RandomSuffix),
            reporter: Box::new(TracingReporter::new()),
        }
    }

    /// Replace the suffix generator used for generated names and ids
    pub fn with_suffix(mut self, suffix: impl SuffixGenerator + 'static) -> Self {
        self.suffix = Box::new(suffix);
        self
    }

    /// Replace the reporter receiving failure messages
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Reconcile the event and send the outcome once.
    ///
    /// A failed delivery is logged, not returned: the provider has already
    /// been changed and a runtime retry would reconcile a second time.
    pub async fn handle(
        &self,
        event: &LifecycleEvent,
        context: &InvocationContext,
    ) -> ReconciliationOutcome {
        info!(
            kind = %self.kind,
            request_type = %event.request_type,
            logical_id = %event.logical_resource_id,
            physical_id = ?event.physical_resource_id,
            request_id = %event.request_id,
            aws_request_id = %context.aws_request_id,
            "Handling lifecycle event"
        );
        self.check_resource_type(event);

        let outcome = self.reconcile(event).await;
        self.deliver(event, context, &outcome).await;
        outcome
    }

    /// Send a FAILED outcome for an event that could not be reconciled at all
    pub async fn reject(
        &self,
        event: &LifecycleEvent,
        context: &InvocationContext,
        reason: &dyn Display,
    ) -> ReconciliationOutcome {
        let message = reason.to_string();
        self.reporter.error(&message);
        let outcome = ReconciliationOutcome::failed(event.physical_resource_id.clone(), message);
        self.deliver(event, context, &outcome).await;
        outcome
    }

    async fn deliver(
        &self,
        event: &LifecycleEvent,
        context: &InvocationContext,
        outcome: &ReconciliationOutcome,
    ) {
        if let Err(e) = self.notifier.send(event, context, outcome).await {
            error!(
                error = %format!("{e:#}"),
                request_id = %event.request_id,
                aws_request_id = %context.aws_request_id,
                status = %outcome.status,
                "Failed to deliver response to CloudFormation"
            );
        }
    }

    /// Compute the outcome for an event without sending it
    pub async fn reconcile(&self, event: &LifecycleEvent) -> ReconciliationOutcome {
        let request_type = match event.request_type() {
            Ok(request_type) => request_type,
            Err(e) => {
                let message = e.to_string();
                self.reporter.error(&message);
                return ReconciliationOutcome::failed(None, message);
            }
        };

        let suffix = self.suffix.as_ref();
        let reporter = self.reporter.as_ref();

        match self.kind {
            ResourceKind::Rule => {
                let rules = RuleReconciler::new(&self.events, suffix, reporter);
                match request_type {
                    RequestType::Create => rules.create(event).await,
                    RequestType::Update => rules.update(event).await,
                    RequestType::Delete => rules.delete(event).await,
                }
            }
            ResourceKind::Target => {
                let targets = TargetReconciler::new(&self.events, suffix, reporter);
                match request_type {
                    RequestType::Create | RequestType::Update => {
                        targets.upsert(event, request_type).await
                    }
                    RequestType::Delete => targets.delete(event).await,
                }
            }
        }
    }

    fn check_resource_type(&self, event: &LifecycleEvent) {
        let Some(resource_type) = event.resource_type.as_deref() else {
            return;
        };
        if self.kind.matches_resource_type(resource_type) == Some(false) {
            warn!(
                kind = %self.kind,
                resource_type = %resource_type,
                "Event resource type belongs to the other handler kind"
            );
        }
    }
}

/// Read a lifecycle event from a JSON file
pub fn load_event(path: &Path) -> Result<LifecycleEvent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event file {}", path.display()))?;
    LifecycleEvent::from_value(value).context("Invalid lifecycle event")
}
