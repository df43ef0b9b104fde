//! CloudWatch Events request and response types
//!
//! SDK-independent shapes passed across the [`EventsOperations`] seam, so
//! reconcilers and their tests never touch SDK builders.
//!
//! [`EventsOperations`]: super::EventsOperations

use cfn_events_common::properties::{
    EcsParameters, InputTransformer, KinesisParameters, RunCommandParameters,
};
use cfn_events_common::{RuleProperties, TargetProperties};
use serde::Serialize;

/// Parameters for `PutRule`; absent fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutRuleRequest {
    pub name: String,
    pub description: Option<String>,
    pub event_pattern: Option<String>,
    pub role_arn: Option<String>,
    pub schedule_expression: Option<String>,
    pub state: Option<String>,
}

impl PutRuleRequest {
    /// Build a request from declared properties under a resolved name
    pub fn from_properties(name: impl Into<String>, properties: &RuleProperties) -> Self {
        Self {
            name: name.into(),
            description: properties.description.clone(),
            event_pattern: properties.event_pattern.clone(),
            role_arn: properties.role_arn.clone(),
            schedule_expression: properties.schedule_expression.clone(),
            state: properties.state.clone(),
        }
    }
}

/// Current state of a rule as returned by `DescribeRule`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDescription {
    pub name: Option<String>,
    pub arn: Option<String>,
    pub event_pattern: Option<String>,
    pub schedule_expression: Option<String>,
    pub description: Option<String>,
    pub role_arn: Option<String>,
    pub state: Option<String>,
}

/// A single target as sent to `PutTargets`
///
/// Serializes with the provider's field names; absent optional fields are
/// omitted entirely rather than sent as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetSpec {
    pub id: String,
    pub arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_transformer: Option<InputTransformer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinesis_parameters: Option<KinesisParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_command_parameters: Option<RunCommandParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs_parameters: Option<EcsParameters>,
}

impl TargetSpec {
    /// Build the outgoing target for declared properties under a resolved id
    pub fn from_properties(id: impl Into<String>, properties: &TargetProperties) -> Self {
        Self {
            id: id.into(),
            arn: properties.arn.clone(),
            role_arn: properties.role_arn.clone(),
            input: properties.input.clone(),
            input_path: properties.input_path.clone(),
            input_transformer: properties.input_transformer.clone(),
            kinesis_parameters: properties.kinesis_parameters.clone(),
            run_command_parameters: properties.run_command_parameters.clone(),
            ecs_parameters: properties.ecs_parameters.clone(),
        }
    }
}

/// Entry the provider could not apply within an otherwise successful call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailedEntry {
    pub target_id: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl std::fmt::Display for FailedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.error_code.as_deref().unwrap_or_default(),
            self.error_message.as_deref().unwrap_or_default()
        )
    }
}

/// Acknowledgement of `PutTargets` / `RemoveTargets`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntriesResult {
    pub failed_entry_count: i32,
    pub failed_entries: Vec<FailedEntry>,
}

impl EntriesResult {
    /// Whether any entry failed
    pub fn has_failures(&self) -> bool {
        self.failed_entry_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn target_props(value: Value) -> TargetProperties {
        let map: Map<String, Value> = value.as_object().cloned().unwrap();
        TargetProperties::from_value(&map).unwrap()
    }

    #[test]
    fn test_put_rule_request_copies_declared_fields() {
        let props = RuleProperties {
            name: Some("ignored".to_string()),
            schedule_expression: Some("rate(5 minutes)".to_string()),
            state: Some("DISABLED".to_string()),
            ..Default::default()
        };
        let request = PutRuleRequest::from_properties("resolved", &props);

        assert_eq!(request.name, "resolved");
        assert_eq!(request.schedule_expression.as_deref(), Some("rate(5 minutes)"));
        assert_eq!(request.state.as_deref(), Some("DISABLED"));
        assert_eq!(request.description, None);
        assert_eq!(request.event_pattern, None);
    }

    #[test]
    fn test_minimal_target_has_only_required_keys() {
        let props = target_props(json!({ "Rule": "r1", "Arn": "arn:aws:sqs:us-east-1:123456789012:q" }));
        let value = serde_json::to_value(TargetSpec::from_properties("T-1", &props)).unwrap();

        assert_eq!(
            value,
            json!({ "Id": "T-1", "Arn": "arn:aws:sqs:us-east-1:123456789012:q" })
        );
    }

    #[test]
    fn test_nested_target_keeps_only_declared_keys() {
        let props = target_props(json!({
            "Rule": "r1",
            "Arn": "arn:aws:lambda:us-east-1:123456789012:function:f",
            "InputTransformer": { "InputPathsMap": { "id": "$.id" } },
            "EcsParameters": { "TaskDefinitionArn": "arn:t" }
        }));
        let value = serde_json::to_value(TargetSpec::from_properties("T-1", &props)).unwrap();

        assert_eq!(
            value,
            json!({
                "Id": "T-1",
                "Arn": "arn:aws:lambda:us-east-1:123456789012:function:f",
                "InputTransformer": { "InputPathsMap": { "id": "$.id" } },
                "EcsParameters": { "TaskDefinitionArn": "arn:t" }
            })
        );
    }

    #[test]
    fn test_failed_entry_display() {
        let entry = FailedEntry {
            target_id: Some("T-1".to_string()),
            error_code: Some("X".to_string()),
            error_message: Some("Y".to_string()),
        };
        assert_eq!(entry.to_string(), "X: Y");
        assert_eq!(FailedEntry::default().to_string(), ": ");
    }

    mod proptest_tests {
        use super::*;
        use proptest::option;
        use proptest::prelude::*;

        proptest! {
            /// Absent optional properties never appear as keys, not even as null
            #[test]
            fn absent_properties_never_serialized(
                role_arn in option::of("[a-z:/0-9]{1,20}"),
                input in option::of("[a-z]{1,10}"),
                input_path in option::of("\\$\\.[a-z]{1,10}"),
                partition in option::of("\\$\\.[a-z]{1,10}"),
            ) {
                let mut props = serde_json::Map::new();
                props.insert("Rule".into(), json!("r1"));
                props.insert("Arn".into(), json!("arn:x"));
                if let Some(v) = &role_arn { props.insert("RoleArn".into(), json!(v)); }
                if let Some(v) = &input { props.insert("Input".into(), json!(v)); }
                if let Some(v) = &input_path { props.insert("InputPath".into(), json!(v)); }
                if let Some(v) = &partition {
                    props.insert("KinesisParameters".into(), json!({ "PartitionKeyPath": v }));
                }

                let props = TargetProperties::from_value(&props).unwrap();
                let value = serde_json::to_value(TargetSpec::from_properties("T", &props)).unwrap();
                let keys = value.as_object().unwrap();

                prop_assert_eq!(keys.contains_key("RoleArn"), role_arn.is_some());
                prop_assert_eq!(keys.contains_key("Input"), input.is_some());
                prop_assert_eq!(keys.contains_key("InputPath"), input_path.is_some());
                prop_assert_eq!(keys.contains_key("KinesisParameters"), partition.is_some());
                prop_assert!(!keys.contains_key("InputTransformer"));
                prop_assert!(!keys.contains_key("EcsParameters"));
                prop_assert!(!keys.contains_key("RunCommandParameters"));
                prop_assert!(keys.values().all(|v| !v.is_null()));
            }
        }
    }
}
