//! CloudWatch Events Rule reconciliation
//!
//! `State` is the only field a rule can change in place. Any other declared
//! difference provisions a replacement under a new physical id, and
//! CloudFormation deletes the old rule once the stack operation completes.
//!
//! Deleting a rule does not remove its targets first. A replaced rule that
//! still has targets attached fails to delete; those targets have to be
//! removed by their own resources.

use super::{ARN_ATTRIBUTE, provider_failure, rejected};
use crate::aws::{EventsOperations, PutRuleRequest, RuleDescription};
use cfn_events_common::naming::generated_rule_name;
use cfn_events_common::properties::patterns_equivalent;
use cfn_events_common::{
    ErrorReporter, LifecycleEvent, ReconciliationOutcome, RuleProperties, RuleState,
    SuffixGenerator,
};
use tracing::{debug, info};

/// Reconciles a single Rule custom resource
pub struct RuleReconciler<'a, E> {
    events: &'a E,
    suffix: &'a dyn SuffixGenerator,
    reporter: &'a dyn ErrorReporter,
}

impl<'a, E: EventsOperations> RuleReconciler<'a, E> {
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

    /// Provision the declared rule
    pub async fn create(&self, event: &LifecycleEvent) -> ReconciliationOutcome {
        let properties = match RuleProperties::from_value(&event.resource_properties) {
            Ok(p) => p,
            Err(e) => return rejected(self.reporter, None, &e),
        };
        self.provision(event, &properties, None).await
    }

    /// Delete the rule named by the physical id
    pub async fn delete(&self, event: &LifecycleEvent) -> ReconciliationOutcome {
        let physical_id = match event.require_physical_id() {
            Ok(id) => id,
            Err(e) => return rejected(self.reporter, None, &e),
        };

        match self.events.delete_rule(physical_id).await {
            Ok(()) => {
                info!(rule = %physical_id, "Rule deleted");
                ReconciliationOutcome::success(physical_id)
            }
            Err(e) => provider_failure(self.reporter, Some(physical_id.to_string()), &e),
        }
    }

    /// Apply a state change in place, or provision a replacement when any
    /// other declared field differs from the current rule
    pub async fn update(&self, event: &LifecycleEvent) -> ReconciliationOutcome {
        let physical_id = match event.require_physical_id() {
            Ok(id) => id,
            Err(e) => return rejected(self.reporter, None, &e),
        };
        let echo = Some(physical_id.to_string());

        let desired = match RuleProperties::from_value(&event.resource_properties) {
            Ok(p) => p,
            Err(e) => return rejected(self.reporter, echo, &e),
        };

        let current = match self.events.describe_rule(physical_id).await {
            Ok(current) => current,
            Err(e) => return provider_failure(self.reporter, echo, &e),
        };

        if let Some(field) = replacement_reason(&desired, &current, physical_id) {
            info!(rule = %physical_id, field, "Rule requires replacement");
            return self.provision(event, &desired, Some(physical_id)).await;
        }

        let desired_state = desired.desired_state();
        if current.state.as_deref() == Some(desired_state) {
            debug!(rule = %physical_id, state = %desired_state, "Rule unchanged");
            return ReconciliationOutcome::success(physical_id);
        }

        let state = match RuleState::parse(desired_state) {
            Ok(state) => state,
            Err(e) => return rejected(self.reporter, echo, &e),
        };

        let result = match state {
            RuleState::Enabled => self.events.enable_rule(physical_id).await,
            RuleState::Disabled => self.events.disable_rule(physical_id).await,
        };

        match result {
            Ok(()) => {
                info!(rule = %physical_id, state = %state, "Rule state changed");
                ReconciliationOutcome::success(physical_id)
                    .with_data(event.resource_properties.clone())
            }
            Err(e) => provider_failure(self.reporter, echo, &e),
        }
    }

    /// Put the rule, resolving its name first.
    ///
    /// `previous` is the physical id being replaced, echoed if the put fails
    /// so CloudFormation keeps tracking the existing rule.
    async fn provision(
        &self,
        event: &LifecycleEvent,
        properties: &RuleProperties,
        previous: Option<&str>,
    ) -> ReconciliationOutcome {
        let name = match &properties.name {
            Some(name) => name.clone(),
            None => generated_rule_name(&event.stack_id, &event.logical_resource_id, self.suffix),
        };

        let request = PutRuleRequest::from_properties(&name, properties);
        match self.events.put_rule(request).await {
            Ok(arn) => {
                info!(rule = %name, arn = %arn, "Rule provisioned");
                ReconciliationOutcome::success(name).with_attribute(ARN_ATTRIBUTE, arn)
            }
            Err(e) => provider_failure(self.reporter, previous.map(String::from), &e),
        }
    }
}

/// First immutable field whose declared value differs from the current rule.
///
/// An undeclared `Name` means the rule keeps the name it was provisioned
/// under, which is its physical id. `Arn` is only checked when declared.
pub fn replacement_reason(
    desired: &RuleProperties,
    current: &RuleDescription,
    physical_id: &str,
) -> Option<&'static str> {
    let desired_name = desired.name.as_deref().unwrap_or(physical_id);
    if current.name.as_deref() != Some(desired_name) {
        return Some("Name");
    }
    if desired.arn.is_some() && desired.arn != current.arn {
        return Some("Arn");
    }
    if !patterns_equivalent(
        desired.event_pattern.as_deref(),
        current.event_pattern.as_deref(),
    ) {
        return Some("EventPattern");
    }
    if desired.schedule_expression != current.schedule_expression {
        return Some("ScheduleExpression");
    }
    if desired.description != current.description {
        return Some("Description");
    }
    if desired.role_arn != current.role_arn {
        return Some("RoleArn");
    }
    None
}
