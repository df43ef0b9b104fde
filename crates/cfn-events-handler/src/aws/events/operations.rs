//! CloudWatch Events operations trait for testing

use super::EventsClient;
use super::types::{EntriesResult, PutRuleRequest, RuleDescription, TargetSpec};
use anyhow::Result;
use std::future::Future;

/// Trait for CloudWatch Events operations that can be faked in tests.
///
/// This trait abstracts the control-plane calls the reconcilers make, so
/// reconciliation logic can be unit tested without hitting real AWS. Each
/// call is a single request with a single result.
pub trait EventsOperations: Send + Sync {
    /// Create or overwrite a rule, returning its ARN
    fn put_rule(&self, request: PutRuleRequest) -> impl Future<Output = Result<String>> + Send;

    /// Delete a rule by name
    fn delete_rule(&self, name: &str) -> impl Future<Output = Result<()>> + Send;

    /// Enable a rule by name
    fn enable_rule(&self, name: &str) -> impl Future<Output = Result<()>> + Send;

    /// Disable a rule by name
    fn disable_rule(&self, name: &str) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the current state of a rule
    fn describe_rule(&self, name: &str) -> impl Future<Output = Result<RuleDescription>> + Send;

    /// Add or replace targets on a rule, keyed by target id
    fn put_targets(
        &self,
        rule: &str,
        targets: Vec<TargetSpec>,
    ) -> impl Future<Output = Result<EntriesResult>> + Send;

    /// Remove targets from a rule by id
    fn remove_targets(
        &self,
        rule: &str,
        ids: Vec<String>,
    ) -> impl Future<Output = Result<EntriesResult>> + Send;
}

impl EventsOperations for EventsClient {
    async fn put_rule(&self, request: PutRuleRequest) -> Result<String> {
        EventsClient::put_rule(self, request).await
    }

    async fn delete_rule(&self, name: &str) -> Result<()> {
        EventsClient::delete_rule(self, name).await
    }

    async fn enable_rule(&self, name: &str) -> Result<()> {
        EventsClient::enable_rule(self, name).await
    }

    async fn disable_rule(&self, name: &str) -> Result<()> {
        EventsClient::disable_rule(self, name).await
    }

    async fn describe_rule(&self, name: &str) -> Result<RuleDescription> {
        EventsClient::describe_rule(self, name).await
    }

    async fn put_targets(&self, rule: &str, targets: Vec<TargetSpec>) -> Result<EntriesResult> {
        EventsClient::put_targets(self, rule, targets).await
    }

    async fn remove_targets(&self, rule: &str, ids: Vec<String>) -> Result<EntriesResult> {
        EventsClient::remove_targets(self, rule, ids).await
    }
}
