//! CloudWatch Events rule and target management

mod operations;
mod types;

pub use operations::EventsOperations;
pub use types::{EntriesResult, FailedEntry, PutRuleRequest, RuleDescription, TargetSpec};

use crate::aws::context::{AwsContext, FromAwsContext};
use anyhow::{Context, Result};
use aws_sdk_cloudwatchevents::Client;
use aws_sdk_cloudwatchevents::types::{
    EcsParameters, InputTransformer, KinesisParameters, RuleState, RunCommandParameters,
    RunCommandTarget, Target,
};
use tracing::{debug, info};

/// CloudWatch Events client for managing rules and their targets
pub struct EventsClient {
    pub(crate) client: Client,
}

impl FromAwsContext for EventsClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.events_client(),
        }
    }
}

impl EventsClient {
    /// Create or overwrite a rule and return its ARN
    pub async fn put_rule(&self, request: PutRuleRequest) -> Result<String> {
        info!(rule = %request.name, "Putting rule");

        let response = self
            .client
            .put_rule()
            .name(&request.name)
            .set_description(request.description)
            .set_event_pattern(request.event_pattern)
            .set_role_arn(request.role_arn)
            .set_schedule_expression(request.schedule_expression)
            .set_state(request.state.as_deref().map(RuleState::from))
            .send()
            .await
            .context("Failed to put rule")?;

        let arn = response
            .rule_arn()
            .context("No rule ARN in PutRule response")?
            .to_string();

        debug!(rule = %request.name, arn = %arn, "Rule stored");
        Ok(arn)
    }

    /// Delete a rule by name
    pub async fn delete_rule(&self, name: &str) -> Result<()> {
        info!(rule = %name, "Deleting rule");

        self.client
            .delete_rule()
            .name(name)
            .send()
            .await
            .context("Failed to delete rule")?;

        Ok(())
    }

    /// Enable a rule by name
    pub async fn enable_rule(&self, name: &str) -> Result<()> {
        info!(rule = %name, "Enabling rule");

        self.client
            .enable_rule()
            .name(name)
            .send()
            .await
            .context("Failed to enable rule")?;

        Ok(())
    }

    /// Disable a rule by name
    pub async fn disable_rule(&self, name: &str) -> Result<()> {
        info!(rule = %name, "Disabling rule");

        self.client
            .disable_rule()
            .name(name)
            .send()
            .await
            .context("Failed to disable rule")?;

        Ok(())
    }

    /// Fetch the current state of a rule
    pub async fn describe_rule(&self, name: &str) -> Result<RuleDescription> {
        let response = self
            .client
            .describe_rule()
            .name(name)
            .send()
            .await
            .context("Failed to describe rule")?;

        Ok(RuleDescription {
            name: response.name().map(String::from),
            arn: response.arn().map(String::from),
            event_pattern: response.event_pattern().map(String::from),
            schedule_expression: response.schedule_expression().map(String::from),
            description: response.description().map(String::from),
            role_arn: response.role_arn().map(String::from),
            state: response.state().map(|s| s.as_str().to_string()),
        })
    }

    /// Add or replace targets on a rule
    pub async fn put_targets(&self, rule: &str, targets: Vec<TargetSpec>) -> Result<EntriesResult> {
        info!(rule = %rule, count = targets.len(), "Putting targets");

        let targets = targets
            .into_iter()
            .map(sdk_target)
            .collect::<Result<Vec<_>>>()?;

        let response = self
            .client
            .put_targets()
            .rule(rule)
            .set_targets(Some(targets))
            .send()
            .await
            .context("Failed to put targets")?;

        Ok(EntriesResult {
            failed_entry_count: response.failed_entry_count(),
            failed_entries: response
                .failed_entries()
                .iter()
                .map(|e| FailedEntry {
                    target_id: e.target_id().map(String::from),
                    error_code: e.error_code().map(String::from),
                    error_message: e.error_message().map(String::from),
                })
                .collect(),
        })
    }

    /// Remove targets from a rule by id
    pub async fn remove_targets(&self, rule: &str, ids: Vec<String>) -> Result<EntriesResult> {
        info!(rule = %rule, ids = ?ids, "Removing targets");

        let response = self
            .client
            .remove_targets()
            .rule(rule)
            .set_ids(Some(ids))
            .send()
            .await
            .context("Failed to remove targets")?;

        Ok(EntriesResult {
            failed_entry_count: response.failed_entry_count(),
            failed_entries: response
                .failed_entries()
                .iter()
                .map(|e| FailedEntry {
                    target_id: e.target_id().map(String::from),
                    error_code: e.error_code().map(String::from),
                    error_message: e.error_message().map(String::from),
                })
                .collect(),
        })
    }
}

/// Convert a target into the SDK shape, leaving undeclared fields unset
fn sdk_target(spec: TargetSpec) -> Result<Target> {
    let input_transformer = spec
        .input_transformer
        .map(|t| {
            InputTransformer::builder()
                .set_input_paths_map(t.input_paths_map.map(|m| m.into_iter().collect()))
                .set_input_template(t.input_template)
                .build()
                .context("Invalid InputTransformer")
        })
        .transpose()?;

    let kinesis_parameters = spec
        .kinesis_parameters
        .map(|k| {
            KinesisParameters::builder()
                .partition_key_path(k.partition_key_path)
                .build()
                .context("Invalid KinesisParameters")
        })
        .transpose()?;

    let run_command_parameters = spec
        .run_command_parameters
        .map(|r| {
            let targets = r
                .run_command_targets
                .into_iter()
                .map(|t| {
                    RunCommandTarget::builder()
                        .key(t.key)
                        .set_values(Some(t.values))
                        .build()
                        .context("Invalid RunCommandTarget")
                })
                .collect::<Result<Vec<_>>>()?;
            RunCommandParameters::builder()
                .set_run_command_targets(Some(targets))
                .build()
                .context("Invalid RunCommandParameters")
        })
        .transpose()?;

    let ecs_parameters = spec
        .ecs_parameters
        .map(|e| {
            EcsParameters::builder()
                .task_definition_arn(e.task_definition_arn)
                .set_task_count(e.task_count)
                .build()
                .context("Invalid EcsParameters")
        })
        .transpose()?;

    Target::builder()
        .id(spec.id)
        .arn(spec.arn)
        .set_role_arn(spec.role_arn)
        .set_input(spec.input)
        .set_input_path(spec.input_path)
        .set_input_transformer(input_transformer)
        .set_kinesis_parameters(kinesis_parameters)
        .set_run_command_parameters(run_command_parameters)
        .set_ecs_parameters(ecs_parameters)
        .build()
        .context("Invalid target")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfn_events_common::properties::{
        EcsParameters as EcsProps, InputTransformer as TransformerProps,
    };

    fn spec(id: &str) -> TargetSpec {
        TargetSpec {
            id: id.to_string(),
            arn: "arn:aws:sqs:us-east-1:123456789012:q".to_string(),
            role_arn: None,
            input: None,
            input_path: None,
            input_transformer: None,
            kinesis_parameters: None,
            run_command_parameters: None,
            ecs_parameters: None,
        }
    }

    #[test]
    fn test_sdk_target_minimal() {
        let target = sdk_target(spec("T-1")).unwrap();
        assert_eq!(target.id(), "T-1");
        assert_eq!(target.arn(), "arn:aws:sqs:us-east-1:123456789012:q");
        assert!(target.input().is_none());
        assert!(target.ecs_parameters().is_none());
    }

    #[test]
    fn test_sdk_target_nested() {
        let mut s = spec("T-2");
        s.ecs_parameters = Some(EcsProps {
            task_definition_arn: "arn:td".to_string(),
            task_count: Some(2),
        });
        s.input_transformer = Some(TransformerProps {
            input_template: Some("\"<id>\"".to_string()),
            input_paths_map: Some([("id".to_string(), "$.id".to_string())].into()),
        });

        let target = sdk_target(s).unwrap();
        let ecs = target.ecs_parameters().unwrap();
        assert_eq!(ecs.task_definition_arn(), "arn:td");
        assert_eq!(ecs.task_count(), Some(2));
        let transformer = target.input_transformer().unwrap();
        assert_eq!(transformer.input_template(), "\"<id>\"");
    }

    #[test]
    fn test_sdk_target_rejects_transformer_without_template() {
        let mut s = spec("T-3");
        s.input_transformer = Some(TransformerProps {
            input_template: None,
            input_paths_map: None,
        });
        let err = sdk_target(s).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid InputTransformer"));
    }
}
