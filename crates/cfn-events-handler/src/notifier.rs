//! Delivery of the reconciliation outcome to CloudFormation

use anyhow::{Context, Result};
use cfn_events_common::{CfnResponse, InvocationContext, LifecycleEvent, ReconciliationOutcome};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Sends one outcome back to the orchestrator
pub trait ResponseNotifier: Send + Sync {
    fn send(
        &self,
        event: &LifecycleEvent,
        context: &InvocationContext,
        outcome: &ReconciliationOutcome,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// PUTs the response body to the event's pre-signed `ResponseURL`
pub struct HttpNotifier {
    client: reqwest::Client,
}

impl HttpNotifier {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl ResponseNotifier for HttpNotifier {
    async fn send(
        &self,
        event: &LifecycleEvent,
        context: &InvocationContext,
        outcome: &ReconciliationOutcome,
    ) -> Result<()> {
        let body = CfnResponse::new(event, context, outcome)
            .to_body()
            .context("Failed to serialize response")?;
        debug!(body = %body, "Response body");

        // The pre-signed URL is signed without a content type
        let response = self
            .client
            .put(&event.response_url)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .context("Failed to send response")?;

        let status = response.status();
        response
            .error_for_status()
            .context("Response URL rejected the response")?;

        info!(status = %outcome.status, http_status = %status, "Response sent");
        Ok(())
    }
}

/// Prints the response body instead of sending it
#[derive(Debug, Default)]
pub struct StdoutNotifier;

impl ResponseNotifier for StdoutNotifier {
    async fn send(
        &self,
        event: &LifecycleEvent,
        context: &InvocationContext,
        outcome: &ReconciliationOutcome,
    ) -> Result<()> {
        let body = CfnResponse::new(event, context, outcome)
            .to_body()
            .context("Failed to serialize response")?;
        println!("{body}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_notifier_builds() {
        assert!(HttpNotifier::new(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_url_is_an_error() {
        let notifier = HttpNotifier::new(Duration::from_millis(500)).unwrap();
        let mut event = cfn_events_test_utils::EventBuilder::create("MyRule").build();
        event.response_url = "http://127.0.0.1:9/response".to_string();

        let outcome = ReconciliationOutcome::success("r1");
        let err = notifier
            .send(&event, &cfn_events_test_utils::test_context(), &outcome)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to send response"));
    }
}
