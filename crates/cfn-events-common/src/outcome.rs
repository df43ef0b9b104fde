//! Reconciliation outcome and the response body CloudFormation expects
//!
//! A handler computes exactly one [`ReconciliationOutcome`] per invocation.
//! [`CfnResponse`] is its wire form, PUT to the event's `ResponseURL`.

use crate::request::{InvocationContext, LifecycleEvent};
use serde::Serialize;
use serde_json::{Map, Value};

/// Final status reported to CloudFormation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Result of reconciling one lifecycle event
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationOutcome {
    pub status: ResponseStatus,
    /// Attributes exposed to the template through `Fn::GetAtt`
    pub data: Map<String, Value>,
    /// Absent only when no physical resource was ever assigned
    pub physical_resource_id: Option<String>,
    /// Failure message surfaced in the stack events
    pub reason: Option<String>,
}

impl ReconciliationOutcome {
    /// Successful outcome with no data
    pub fn success(physical_resource_id: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Map::new(),
            physical_resource_id: Some(physical_resource_id.into()),
            reason: None,
        }
    }

    /// Failed outcome with no data
    pub fn failed(physical_resource_id: Option<String>, reason: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            data: Map::new(),
            physical_resource_id,
            reason: Some(reason.into()),
        }
    }

    /// Attach a single data attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replace the data attributes
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// Response body accepted by the CloudFormation custom resource protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub data: Map<String, Value>,
}

impl CfnResponse {
    /// Build the response for an outcome.
    ///
    /// CloudFormation rejects a response without a PhysicalResourceId, so an
    /// outcome that never had one reports the invocation's log stream name.
    pub fn new(
        event: &LifecycleEvent,
        context: &InvocationContext,
        outcome: &ReconciliationOutcome,
    ) -> Self {
        let log_pointer = format!(
            "See the details in CloudWatch Log Stream: {}",
            context.log_stream_name
        );
        let reason = match &outcome.reason {
            Some(reason) => format!("{reason}. {log_pointer}"),
            None => log_pointer,
        };

        Self {
            status: outcome.status,
            reason,
            physical_resource_id: outcome
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| context.log_stream_name.clone()),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data: outcome.data.clone(),
        }
    }

    /// Serialize to the JSON text sent over the wire
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
