//! Typed desired state for Rule and Target custom resources
//!
//! `ResourceProperties` arrive as an untyped JSON map in which CloudFormation
//! has stringified every scalar. They are parsed exactly once here; every
//! optional key becomes an `Option` and empty strings count as absent, so
//! the reconcilers never see half-set fields.

use crate::error::{InvalidState, PropertyError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Enabled state of a Rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum RuleState {
    #[strum(serialize = "ENABLED")]
    Enabled,
    #[strum(serialize = "DISABLED")]
    Disabled,
}

impl RuleState {
    /// Parse a declared `State`, accepting only the two literal values
    pub fn parse(value: &str) -> Result<Self, InvalidState> {
        match value {
            "ENABLED" => Ok(Self::Enabled),
            "DISABLED" => Ok(Self::Disabled),
            other => Err(InvalidState(other.to_string())),
        }
    }
}

/// Desired state of a CloudWatch Events Rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleProperties {
    /// Rule name; generated from the stack and logical id when absent
    #[serde(default, deserialize_with = "optional_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "optional_string")]
    pub description: Option<String>,

    /// Event pattern as compact JSON text
    #[serde(default, deserialize_with = "optional_json_text")]
    pub event_pattern: Option<String>,

    #[serde(default, deserialize_with = "optional_string")]
    pub role_arn: Option<String>,

    #[serde(default, deserialize_with = "optional_string")]
    pub schedule_expression: Option<String>,

    /// Raw declared state; validated only when a transition is needed
    #[serde(default, deserialize_with = "optional_string")]
    pub state: Option<String>,

    /// Expected ARN of the provisioned rule. Unconstrained when absent.
    #[serde(default, deserialize_with = "optional_string")]
    pub arn: Option<String>,
}

impl RuleProperties {
    /// Parse Rule properties from an event's `ResourceProperties`
    pub fn from_value(properties: &Map<String, Value>) -> Result<Self, PropertyError> {
        Ok(serde_json::from_value(Value::Object(properties.clone()))?)
    }

    /// Declared state, defaulting to ENABLED as the provider does
    pub fn desired_state(&self) -> &str {
        self.state.as_deref().unwrap_or("ENABLED")
    }
}

/// Desired state of a single Target attached to a Rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProperties {
    /// Name of the owning Rule
    pub rule: String,
    /// ARN of the resource invoked by the rule
    pub arn: String,
    pub role_arn: Option<String>,
    pub input: Option<String>,
    pub input_path: Option<String>,
    pub input_transformer: Option<InputTransformer>,
    pub kinesis_parameters: Option<KinesisParameters>,
    pub run_command_parameters: Option<RunCommandParameters>,
    pub ecs_parameters: Option<EcsParameters>,
}

/// Wire shape of the Target properties before required-field checks
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTargetProperties {
    #[serde(default, deserialize_with = "optional_string")]
    rule: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    arn: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    role_arn: Option<String>,
    #[serde(default, deserialize_with = "optional_json_text")]
    input: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    input_path: Option<String>,
    #[serde(default)]
    input_transformer: Option<InputTransformer>,
    #[serde(default)]
    kinesis_parameters: Option<KinesisParameters>,
    #[serde(default)]
    run_command_parameters: Option<RunCommandParameters>,
    #[serde(default)]
    ecs_parameters: Option<EcsParameters>,
}

impl TargetProperties {
    /// Parse Target properties from an event's `ResourceProperties`
    pub fn from_value(properties: &Map<String, Value>) -> Result<Self, PropertyError> {
        let raw: RawTargetProperties = serde_json::from_value(Value::Object(properties.clone()))?;

        Ok(Self {
            rule: raw.rule.ok_or(PropertyError::Missing("Rule"))?,
            arn: raw.arn.ok_or(PropertyError::Missing("Arn"))?,
            role_arn: raw.role_arn,
            input: raw.input,
            input_path: raw.input_path,
            input_transformer: raw.input_transformer,
            kinesis_parameters: raw.kinesis_parameters,
            run_command_parameters: raw.run_command_parameters,
            ecs_parameters: raw.ecs_parameters,
        })
    }

    /// Read only the `Rule` key.
    ///
    /// Removing a target needs nothing else, so a malformed optional field
    /// must not block it.
    pub fn rule_from_value(properties: &Map<String, Value>) -> Result<String, PropertyError> {
        let raw: RawTargetRule = serde_json::from_value(Value::Object(properties.clone()))?;
        raw.rule.ok_or(PropertyError::Missing("Rule"))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTargetRule {
    #[serde(default, deserialize_with = "optional_string")]
    rule: Option<String>,
}

/// Rewrites matched event data before it reaches the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputTransformer {
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_paths_map: Option<BTreeMap<String, String>>,
}

/// Shard selection for Kinesis stream targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KinesisParameters {
    pub partition_key_path: String,
}

/// EC2 Run Command targeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunCommandParameters {
    pub run_command_targets: Vec<RunCommandTarget>,
}

/// A single `key=values` instance selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunCommandTarget {
    pub key: String,
    pub values: Vec<String>,
}

/// ECS task launch parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EcsParameters {
    pub task_definition_arn: String,

    #[serde(
        default,
        deserialize_with = "optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_count: Option<i32>,
}

/// Compare two event patterns by meaning rather than by formatting
pub fn patterns_equivalent(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            match (
                serde_json::from_str::<Value>(a),
                serde_json::from_str::<Value>(b),
            ) {
                (Ok(a), Ok(b)) => a == b,
                _ => a == b,
            }
        }
        _ => false,
    }
}

/// Scalar as string; empty strings and nulls are absent
fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, got {other}"
        ))),
    }
}

/// JSON document given either inline or as already-encoded text
fn optional_json_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(doc) => Ok(Some(doc.to_string())),
    }
}

/// Integer given as a JSON number or a numeric string
fn optional_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, got '{s}'"))),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {n}"))),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, got {other}"
        ))),
    }
}
