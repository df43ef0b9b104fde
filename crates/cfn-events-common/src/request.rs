//! Inbound CloudFormation custom resource request
//!
//! One `LifecycleEvent` arrives per invocation. It is read-only: handlers
//! derive their desired state from it but never mutate or persist it.

use crate::error::EventError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Lifecycle transition requested by CloudFormation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// Custom resource request as delivered by CloudFormation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent {
    /// Raw request type; resolved by [`LifecycleEvent::request_type`]
    pub request_type: String,

    /// Pre-signed S3 URL the response must be PUT to
    #[serde(rename = "ResponseURL")]
    pub response_url: String,

    /// ARN of the stack owning the resource
    pub stack_id: String,

    /// Unique id of this request, echoed in the response
    pub request_id: String,

    /// Template resource type, e.g. `Custom::CloudWatchEventsRule`
    #[serde(default)]
    pub resource_type: Option<String>,

    /// Template identifier of the resource
    pub logical_resource_id: String,

    /// Provisioned identifier; present on Update and Delete only
    #[serde(default)]
    pub physical_resource_id: Option<String>,

    /// Declared desired state
    #[serde(default)]
    pub resource_properties: Map<String, Value>,

    /// Previously declared state; present on Update only
    #[serde(default)]
    pub old_resource_properties: Option<Map<String, Value>>,
}

impl LifecycleEvent {
    /// Parse an event from the raw invocation payload
    pub fn from_value(value: Value) -> Result<Self, EventError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Salvage the fields a response needs from a payload `from_value` rejected.
    ///
    /// Returns `None` unless ResponseURL, StackId, RequestId and
    /// LogicalResourceId are all non-empty strings. Properties are dropped.
    pub fn recover(value: &Value) -> Option<Self> {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            request_type: field("RequestType").unwrap_or_default(),
            response_url: field("ResponseURL")?,
            stack_id: field("StackId")?,
            request_id: field("RequestId")?,
            resource_type: field("ResourceType"),
            logical_resource_id: field("LogicalResourceId")?,
            physical_resource_id: field("PhysicalResourceId"),
            resource_properties: Map::new(),
            old_resource_properties: None,
        })
    }

    /// Resolve the request type, rejecting anything outside Create/Update/Delete
    pub fn request_type(&self) -> Result<RequestType, EventError> {
        self.request_type
            .parse()
            .map_err(|_| EventError::UnknownRequestType(self.request_type.clone()))
    }

    /// PhysicalResourceId, which must be present on Update and Delete
    pub fn require_physical_id(&self) -> Result<&str, EventError> {
        match self.physical_resource_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(EventError::MissingPhysicalId {
                request_type: self.request_type.clone(),
            }),
        }
    }
}

/// Execution context of the invocation
///
/// Only what the response protocol needs is carried over from the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// Runtime request id
    pub aws_request_id: String,
    /// Log stream receiving this invocation's logs
    pub log_stream_name: String,
}
