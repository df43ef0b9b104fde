//! cfn-events-handler - CloudFormation custom resources for CloudWatch Events
//!
//! This crate provides the Lambda handler that reconciles
//! `Custom::CloudWatchEventsRule` and `Custom::CloudWatchEventsTarget`
//! lifecycle events against the CloudWatch Events API and reports the
//! outcome back to CloudFormation.

pub mod aws;
pub mod config;
pub mod handler;
pub mod logging;
pub mod notifier;
pub mod reconciler;

pub use handler::{Handler, load_event};
pub use notifier::{HttpNotifier, ResponseNotifier, StdoutNotifier};
