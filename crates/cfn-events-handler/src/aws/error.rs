//! AWS error classification
//!
//! Provides typed errors for CloudWatch Events SDK operations using the
//! `.code()` method instead of string matching on Debug format. The
//! classification only enriches failure logs; every error stays terminal for
//! the invocation.

use thiserror::Error;

/// AWS error categories for diagnostics
#[derive(Debug, Error)]
pub enum AwsError {
    /// Rule or target does not exist
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Another request modified the same rule concurrently
    #[error("Concurrent modification: {message}")]
    ConcurrentModification { message: String },

    /// Account quota for rules or targets reached
    #[error("Limit exceeded: {message}")]
    LimitExceeded { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// The request was rejected as malformed
    #[error("Invalid request: {message}")]
    Invalid { code: String, message: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if re-invoking with the same event could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AwsError::Throttled | AwsError::ConcurrentModification { .. }
        )
    }

    /// Service error code, when one was returned
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::NotFound { .. } => Some("ResourceNotFoundException"),
            AwsError::ConcurrentModification { .. } => Some("ConcurrentModificationException"),
            AwsError::LimitExceeded { .. } => Some("LimitExceededException"),
            AwsError::Throttled => Some("ThrottlingException"),
            AwsError::Invalid { code, .. } => Some(code.as_str()),
            AwsError::Sdk { code, .. } => code.as_deref(),
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        self.code().and_then(suggestion_for_code)
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &["ResourceNotFoundException"];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known AWS error codes for malformed requests
const INVALID_CODES: &[&str] = &[
    "ValidationException",
    "InvalidEventPatternException",
    "ManagedRuleException",
    "AccessDeniedException",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound { message },
        Some("ConcurrentModificationException") => AwsError::ConcurrentModification { message },
        Some("LimitExceededException") => AwsError::LimitExceeded { message },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if INVALID_CODES.contains(&c) => AwsError::Invalid {
            code: c.to_string(),
            message,
        },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an error from an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain using `ProvideErrorMetadata` to extract `.code()` and
/// `.message()` from any CloudWatch Events operation error. Falls back to
/// string matching on the Debug representation if no typed error is found.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    use aws_sdk_cloudwatchevents::error::{ProvideErrorMetadata, SdkError};
    use aws_sdk_cloudwatchevents::operation::{
        delete_rule::DeleteRuleError, describe_rule::DescribeRuleError,
        disable_rule::DisableRuleError, enable_rule::EnableRuleError, put_rule::PutRuleError,
        put_targets::PutTargetsError, remove_targets::RemoveTargetsError,
    };

    macro_rules! classify_as {
        ($cause:expr, $($op:ty),+ $(,)?) => {
            $(
                if let Some(e) = $cause.downcast_ref::<SdkError<$op>>() {
                    let meta = ProvideErrorMetadata::meta(e);
                    return classify_aws_error(meta.code(), meta.message());
                }
            )+
        };
    }

    for cause in error.chain() {
        classify_as!(
            cause,
            PutRuleError,
            DeleteRuleError,
            EnableRuleError,
            DisableRuleError,
            DescribeRuleError,
            PutTargetsError,
            RemoveTargetsError,
        );
    }

    // Fallback: extract error code from debug string representation
    let debug_str = format!("{:?}", error);
    if let Some(code) = extract_error_code(&debug_str) {
        return classify_aws_error(Some(&code), Some(&error.to_string()));
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// All known AWS error codes for extraction from debug strings (flat list)
const ALL_KNOWN_CODES: &[&str] = &[
    "ResourceNotFoundException",
    "ConcurrentModificationException",
    "LimitExceededException",
    "ThrottlingException",
    "ValidationException",
    "InvalidEventPatternException",
    "ManagedRuleException",
    "AccessDeniedException",
    "InternalException",
];

/// Extract an AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    if let Some(code) = ALL_KNOWN_CODES.iter().find(|code| debug_str.contains(*code)) {
        return Some((*code).to_string());
    }

    // Try to extract any code from `code: Some("...")` pattern
    let start = debug_str.find("code: Some(\"")?;
    let rest = &debug_str[start + 12..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "ResourceNotFoundException",
        "The rule no longer exists. It may have been deleted outside CloudFormation.",
    ),
    (
        "ConcurrentModificationException",
        "Another update touched the same rule. Retry the stack operation.",
    ),
    (
        "LimitExceededException",
        "Request a rules/targets quota increase via the Service Quotas console.",
    ),
    (
        "ThrottlingException",
        "CloudWatch Events API rate limit hit. Retry the stack operation.",
    ),
    (
        "InvalidEventPatternException",
        "Check that EventPattern is valid JSON in the event pattern syntax.",
    ),
    (
        "ManagedRuleException",
        "This rule is managed by an AWS service and cannot be changed directly.",
    ),
    (
        "AccessDeniedException",
        "Grant the handler's execution role the needed events:* permissions.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<&'static str> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
}
