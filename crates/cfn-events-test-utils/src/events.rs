//! Lifecycle event fixtures
//!
//! Builds CloudFormation custom resource requests the way they arrive on the
//! wire, so tests exercise the same parse path as the Lambda entrypoint.

use cfn_events_common::{InvocationContext, LifecycleEvent};
use serde_json::{Map, Value, json};

/// Stack id used by all fixtures
pub const TEST_STACK_ID: &str =
    "arn:aws:cloudformation:us-east-1:123456789012:stack/test-stack/1c2fa620-982a-11e3-aff7-50e2416294e0";

/// Stack name embedded in [`TEST_STACK_ID`]
pub const TEST_STACK_NAME: &str = "test-stack";

/// Builder for custom resource request events
///
/// # Example
///
/// ```
/// use cfn_events_test_utils::EventBuilder;
/// use serde_json::json;
///
/// let event = EventBuilder::update("MyRule", "r1")
///     .properties(json!({ "Name": "r1", "State": "DISABLED" }))
///     .build();
/// assert_eq!(event.physical_resource_id.as_deref(), Some("r1"));
/// ```
#[derive(Debug, Clone)]
pub struct EventBuilder {
    request_type: String,
    logical_resource_id: String,
    physical_resource_id: Option<String>,
    resource_type: String,
    properties: Map<String, Value>,
    old_properties: Option<Map<String, Value>>,
}

impl EventBuilder {
    /// Start a Create request
    pub fn create(logical_resource_id: &str) -> Self {
        Self::new("Create", logical_resource_id, None)
    }

    /// Start an Update request for an already provisioned resource
    pub fn update(logical_resource_id: &str, physical_resource_id: &str) -> Self {
        Self::new(
            "Update",
            logical_resource_id,
            Some(physical_resource_id.to_string()),
        )
    }

    /// Start a Delete request for an already provisioned resource
    pub fn delete(logical_resource_id: &str, physical_resource_id: &str) -> Self {
        Self::new(
            "Delete",
            logical_resource_id,
            Some(physical_resource_id.to_string()),
        )
    }

    /// Start a request with an arbitrary (possibly invalid) request type
    pub fn with_request_type(request_type: &str, logical_resource_id: &str) -> Self {
        Self::new(request_type, logical_resource_id, None)
    }

    fn new(
        request_type: &str,
        logical_resource_id: &str,
        physical_resource_id: Option<String>,
    ) -> Self {
        Self {
            request_type: request_type.to_string(),
            logical_resource_id: logical_resource_id.to_string(),
            physical_resource_id,
            resource_type: "Custom::CloudWatchEventsRule".to_string(),
            properties: Map::new(),
            old_properties: None,
        }
    }

    /// Set `ResourceProperties` from a JSON object
    pub fn properties(mut self, properties: Value) -> Self {
        self.properties = into_map(properties);
        self
    }

    /// Set `OldResourceProperties` from a JSON object
    pub fn old_properties(mut self, properties: Value) -> Self {
        self.old_properties = Some(into_map(properties));
        self
    }

    /// Set the template resource type
    pub fn resource_type(mut self, resource_type: &str) -> Self {
        self.resource_type = resource_type.to_string();
        self
    }

    /// Raw request payload as delivered to the function
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "RequestType": self.request_type,
            "ResponseURL": "https://cloudformation-custom-resource-response-useast1.s3.amazonaws.com/test",
            "StackId": TEST_STACK_ID,
            "RequestId": "5d478078-13e9-baf0-464a-7ef285ecc786",
            "ResourceType": self.resource_type,
            "LogicalResourceId": self.logical_resource_id,
            "ResourceProperties": self.properties,
        });
        if let Some(id) = &self.physical_resource_id {
            payload["PhysicalResourceId"] = json!(id);
        }
        if let Some(old) = &self.old_properties {
            payload["OldResourceProperties"] = json!(old);
        }
        payload
    }

    /// Parse the payload into an event
    pub fn build(&self) -> LifecycleEvent {
        LifecycleEvent::from_value(self.payload()).expect("fixture payload must parse")
    }
}

/// Invocation context with a recognisable log stream name
pub fn test_context() -> InvocationContext {
    InvocationContext {
        aws_request_id: "c6af9ac6-7b61-11e6-9a41-93e8deadbeef".to_string(),
        log_stream_name: "2024/01/01/[$LATEST]0123456789abcdef".to_string(),
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture properties must be a JSON object, got {other}"),
    }
}
