//! cfn-events-common - Shared types and utilities
//!
//! This crate provides the CloudFormation custom resource event model and
//! the naming helpers used by the Rule and Target handlers, without any
//! AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`defaults`]: Provider limits and default configuration values
//! - [`error`]: Typed errors for event and property validation
//! - [`naming`]: Stack name extraction, random suffixes, target ids
//! - [`outcome`]: Reconciliation outcome and the response body sent back
//! - [`properties`]: Typed desired state for Rule and Target resources
//! - [`reporter`]: Injected failure reporting interface
//! - [`request`]: Inbound lifecycle event
//! - [`resource_kind`]: Which custom resource type a handler serves

pub mod defaults;
pub mod error;
pub mod naming;
pub mod outcome;
pub mod properties;
pub mod reporter;
pub mod request;
pub mod resource_kind;

// Re-export commonly used types
pub use error::{EventError, InvalidState, PropertyError};
pub use naming::{RandomSuffix, SuffixGenerator};
pub use outcome::{CfnResponse, ReconciliationOutcome, ResponseStatus};
pub use properties::{RuleProperties, RuleState, TargetProperties};
pub use reporter::{ErrorReporter, TracingReporter};
pub use request::{InvocationContext, LifecycleEvent, RequestType};
pub use resource_kind::ResourceKind;
