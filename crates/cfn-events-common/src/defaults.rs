//! Provider limits and default values shared by both handlers
//!
//! These constants keep generated names inside the CloudWatch Events limits.

/// Length of the random suffix appended to generated names
pub const SUFFIX_LEN: usize = 13;

/// Number of random bytes drawn before encoding the suffix
pub const SUFFIX_ENTROPY_BYTES: usize = 20;

/// Maximum number of logical-id characters kept in a generated target id.
///
/// 50 + "-" + 13 stays under the 64 character Target Id limit and the
/// 100 character `AWSEvents_<rule>_<target>` composite limit.
pub const TARGET_ID_PREFIX_LEN: usize = 50;

/// Provider limit for a Target Id
pub const MAX_TARGET_ID_LEN: usize = 64;

/// Default timeout for the response PUT, in seconds
pub const DEFAULT_RESPONSE_TIMEOUT_SECS: u64 = 30;

/// Environment variable selecting the resource kind a deployment serves
pub const ENV_RESOURCE_KIND: &str = "CFN_EVENTS_RESOURCE_KIND";

const _: () = assert!(TARGET_ID_PREFIX_LEN + 1 + SUFFIX_LEN <= MAX_TARGET_ID_LEN);
