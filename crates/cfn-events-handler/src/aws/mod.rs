//! AWS client modules for the handler
//!
//! This module provides wrappers around AWS SDK clients for:
//! - CloudWatch Events: rule and target management
//! - Error classification for failure diagnostics

pub mod context;
pub mod error;
pub mod events;

pub use context::{AwsContext, FromAwsContext};
pub use error::{AwsError, classify_anyhow_error, classify_aws_error};
pub use events::{
    EntriesResult, EventsClient, EventsOperations, FailedEntry, PutRuleRequest, RuleDescription,
    TargetSpec,
};
