//! cfn-events-handler: CloudFormation custom resource handler for CloudWatch Events
//!
//! Runs the Lambda runtime loop by default. `invoke` reconciles a single
//! event from disk and prints the response instead of sending it.

use anyhow::Result;
use cfn_events_common::{InvocationContext, LifecycleEvent, ReconciliationOutcome};
use cfn_events_handler::aws::{AwsContext, EventsClient, FromAwsContext};
use cfn_events_handler::config::{Args, Command, HandlerConfig};
use cfn_events_handler::logging::init_tracing;
use cfn_events_handler::{Handler, HttpNotifier, StdoutNotifier, load_event};
use clap::Parser;
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::{Value, json};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print the error and its causes; the log stream shows no colors
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "Error: {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  Caused by: {cause}");
        source = cause.source();
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let config = HandlerConfig::try_from(&args)?;
    init_tracing(config.log_format);

    let aws = AwsContext::new(config.region.as_deref()).await;
    let events = EventsClient::from_context(&aws);

    info!(
        kind = %config.kind,
        region = ?aws.region(),
        log_format = %config.log_format,
        "Handler starting"
    );

    match &args.command {
        Some(Command::Invoke { event }) => invoke(config, events, event).await,
        None => serve(config, events).await,
    }
}

/// Lambda runtime loop, one lifecycle event per invocation
async fn serve(config: HandlerConfig, events: EventsClient) -> Result<()> {
    let notifier = HttpNotifier::new(config.response_timeout)?;
    let handler = Handler::new(config.kind, events, notifier);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| async {
        handle_invocation(&handler, event).await
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

async fn handle_invocation(
    handler: &Handler<EventsClient, HttpNotifier>,
    invocation: LambdaEvent<Value>,
) -> Result<Value, lambda_runtime::Error> {
    let context = InvocationContext {
        aws_request_id: invocation.context.request_id.clone(),
        log_stream_name: invocation.context.env_config.log_stream.clone(),
    };

    let event = match LifecycleEvent::from_value(invocation.payload.clone()) {
        Ok(event) => event,
        Err(e) => {
            let error =
                anyhow::Error::new(e).context("Invalid CloudFormation custom resource request");
            // Without a ResponseURL there is nowhere to report the failure
            let Some(event) = LifecycleEvent::recover(&invocation.payload) else {
                return Err(error.into());
            };
            let outcome = handler.reject(&event, &context, &format!("{error:#}")).await;
            return Ok(summary(&outcome));
        }
    };

    let outcome = handler.handle(&event, &context).await;
    Ok(summary(&outcome))
}

/// Invocation result shown by the Lambda runtime
fn summary(outcome: &ReconciliationOutcome) -> Value {
    json!({
        "Status": outcome.status,
        "PhysicalResourceId": outcome.physical_resource_id,
    })
}

/// Reconcile one event from disk against the real provider
async fn invoke(config: HandlerConfig, events: EventsClient, path: &Path) -> Result<()> {
    let event = load_event(path)?;
    let handler = Handler::new(config.kind, events, StdoutNotifier);

    let context = InvocationContext {
        aws_request_id: "local-invoke".to_string(),
        log_stream_name: "local".to_string(),
    };

    let outcome = handler.handle(&event, &context).await;
    info!(status = %outcome.status, physical_id = ?outcome.physical_resource_id, "Invocation complete");
    Ok(())
}
