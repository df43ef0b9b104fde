//! Shared test utilities for integration tests
//!
//! Recording fakes for the CloudWatch Events seam and the response notifier.
//! Event fixtures and the fixed suffix live in cfn-events-test-utils.

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use cfn_events_common::{CfnResponse, InvocationContext, LifecycleEvent, ReconciliationOutcome};
use cfn_events_handler::ResponseNotifier;
use cfn_events_handler::aws::{
    EntriesResult, EventsOperations, FailedEntry, PutRuleRequest, RuleDescription, TargetSpec,
};
use std::collections::HashSet;
use std::sync::Mutex;

pub use cfn_events_test_utils::{
    EventBuilder, FIXED_SUFFIX, FixedSuffix, RecordingReporter, TEST_STACK_NAME, test_context,
};

/// Region and account baked into fake ARNs
pub const TEST_ARN_PREFIX: &str = "arn:aws:events:us-east-1:123456789012";

/// ARN the fake returns for a rule name
pub fn rule_arn(name: &str) -> String {
    format!("{TEST_ARN_PREFIX}:rule/{name}")
}

/// One recorded provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PutRule(PutRuleRequest),
    DeleteRule(String),
    EnableRule(String),
    DisableRule(String),
    DescribeRule(String),
    PutTargets { rule: String, targets: Vec<TargetSpec> },
    RemoveTargets { rule: String, ids: Vec<String> },
}

impl Call {
    fn op(&self) -> &'static str {
        match self {
            Call::PutRule(_) => "put_rule",
            Call::DeleteRule(_) => "delete_rule",
            Call::EnableRule(_) => "enable_rule",
            Call::DisableRule(_) => "disable_rule",
            Call::DescribeRule(_) => "describe_rule",
            Call::PutTargets { .. } => "put_targets",
            Call::RemoveTargets { .. } => "remove_targets",
        }
    }
}

/// In-memory CloudWatch Events that records every call
#[derive(Debug, Default)]
pub struct FakeEvents {
    calls: Mutex<Vec<Call>>,
    current_rule: Mutex<Option<RuleDescription>>,
    failing: Mutex<HashSet<&'static str>>,
    failed_entries: Mutex<Vec<FailedEntry>>,
}

impl FakeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule returned by `describe_rule`
    pub fn with_rule(self, rule: RuleDescription) -> Self {
        *self.current_rule.lock().unwrap() = Some(rule);
        self
    }

    /// Make an operation fail at the transport level
    pub fn failing(self, op: &'static str) -> Self {
        self.failing.lock().unwrap().insert(op);
        self
    }

    /// Entries reported as failed by `put_targets` and `remove_targets`
    pub fn with_failed_entries(self, entries: Vec<FailedEntry>) -> Self {
        *self.failed_entries.lock().unwrap() = entries;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls of one operation
    pub fn count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.op() == op).count()
    }

    fn record(&self, call: Call) -> Result<()> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(op) {
            return Err(anyhow!("ConcurrentModificationException: simulated {op} failure")
                .context(format!("Failed to {}", op.replace('_', " "))));
        }
        Ok(())
    }

    fn entries_result(&self) -> EntriesResult {
        let failed_entries = self.failed_entries.lock().unwrap().clone();
        EntriesResult {
            failed_entry_count: failed_entries.len() as i32,
            failed_entries,
        }
    }
}

impl EventsOperations for FakeEvents {
    async fn put_rule(&self, request: PutRuleRequest) -> Result<String> {
        let arn = rule_arn(&request.name);
        self.record(Call::PutRule(request))?;
        Ok(arn)
    }

    async fn delete_rule(&self, name: &str) -> Result<()> {
        self.record(Call::DeleteRule(name.to_string()))
    }

    async fn enable_rule(&self, name: &str) -> Result<()> {
        self.record(Call::EnableRule(name.to_string()))
    }

    async fn disable_rule(&self, name: &str) -> Result<()> {
        self.record(Call::DisableRule(name.to_string()))
    }

    async fn describe_rule(&self, name: &str) -> Result<RuleDescription> {
        self.record(Call::DescribeRule(name.to_string()))?;
        self.current_rule
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow!("ResourceNotFoundException: Rule {name} does not exist"))
    }

    async fn put_targets(&self, rule: &str, targets: Vec<TargetSpec>) -> Result<EntriesResult> {
        self.record(Call::PutTargets {
            rule: rule.to_string(),
            targets,
        })?;
        Ok(self.entries_result())
    }

    async fn remove_targets(&self, rule: &str, ids: Vec<String>) -> Result<EntriesResult> {
        self.record(Call::RemoveTargets {
            rule: rule.to_string(),
            ids,
        })?;
        Ok(self.entries_result())
    }
}

/// Notifier that records every response instead of sending it
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(ReconciliationOutcome, CfnResponse)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every send fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn outcomes(&self) -> Vec<ReconciliationOutcome> {
        self.sent.lock().unwrap().iter().map(|(o, _)| o.clone()).collect()
    }

    pub fn responses(&self) -> Vec<CfnResponse> {
        self.sent.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }
}

impl ResponseNotifier for RecordingNotifier {
    async fn send(
        &self,
        event: &LifecycleEvent,
        context: &InvocationContext,
        outcome: &ReconciliationOutcome,
    ) -> Result<()> {
        self.sent.lock().unwrap().push((
            outcome.clone(),
            CfnResponse::new(event, context, outcome),
        ));
        if self.fail {
            return Err(anyhow!("connection reset by peer"));
        }
        Ok(())
    }
}

/// Rule as described by the provider after a create with these fields
pub fn described_rule(name: &str, state: &str) -> RuleDescription {
    RuleDescription {
        name: Some(name.to_string()),
        arn: Some(rule_arn(name)),
        state: Some(state.to_string()),
        ..Default::default()
    }
}
