//! Event and property validation errors
//!
//! Typed errors raised at the parse boundary, before any provider call.

use thiserror::Error;

/// Errors in the lifecycle event envelope
#[derive(Debug, Error)]
pub enum EventError {
    /// RequestType outside Create/Update/Delete
    #[error("Unknown request type '{0}'")]
    UnknownRequestType(String),

    /// Update or Delete arrived without a PhysicalResourceId
    #[error("{request_type} request is missing PhysicalResourceId")]
    MissingPhysicalId { request_type: String },

    /// Event payload is not a valid custom resource request
    #[error("Failed to parse event: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors in the declared ResourceProperties
#[derive(Debug, Error)]
pub enum PropertyError {
    /// A required property is absent or empty
    #[error("Missing required property '{0}'")]
    Missing(&'static str),

    /// ResourceProperties could not be decoded at all
    #[error("Failed to parse ResourceProperties: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Desired Rule `State` is neither ENABLED nor DISABLED
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown 'State' value. Must be either 'ENABLED' or 'DISABLED', was '{0}'.")]
pub struct InvalidState(pub String);
