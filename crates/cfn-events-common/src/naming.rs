//! Generated names for provisioned rules and targets
//!
//! Mimics the `<stack>-<logical id>-<SUFFIX>` names CloudFormation gives its
//! own resources. Suffixes are statistically unique only; nothing checks for
//! collisions.

use crate::defaults::{SUFFIX_ENTROPY_BYTES, SUFFIX_LEN, TARGET_ID_PREFIX_LEN};
use base64::Engine;
use rand::RngCore;

/// Source of random name suffixes
///
/// Injected into the reconcilers so tests can pin generated names.
pub trait SuffixGenerator: Send + Sync {
    /// Produce a `SUFFIX_LEN` character suffix of `[A-Z0-9]`
    fn generate(&self) -> String;
}

/// Suffix generator backed by the operating system RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSuffix;

impl SuffixGenerator for RandomSuffix {
    fn generate(&self) -> String {
        let mut suffix = String::with_capacity(SUFFIX_LEN);
        while suffix.len() < SUFFIX_LEN {
            let mut bytes = [0u8; SUFFIX_ENTROPY_BYTES];
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            suffix.push_str(&encode_suffix(&bytes));
        }
        suffix.truncate(SUFFIX_LEN);
        suffix
    }
}

/// Base64-encode random bytes and keep only uppercased alphanumerics.
///
/// The result may be shorter than `SUFFIX_LEN` if the encoding happened to
/// contain many `+`, `/` or `=` characters.
pub fn encode_suffix(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD
        .encode(bytes)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(SUFFIX_LEN)
        .collect()
}

/// Extract the stack name from a stack id.
///
/// `arn:aws:cloudformation:<region>:<account>:stack/<name>/<guid>` yields
/// `<name>`; anything not shaped like that is returned unchanged.
pub fn stack_name(stack_id: &str) -> &str {
    stack_id
        .split_once("stack/")
        .and_then(|(_, rest)| rest.split_once('/'))
        .map(|(name, _)| name)
        .filter(|name| !name.is_empty())
        .unwrap_or(stack_id)
}

/// Name for a rule declared without an explicit `Name`
pub fn generated_rule_name(
    stack_id: &str,
    logical_resource_id: &str,
    suffix: &dyn SuffixGenerator,
) -> String {
    format!(
        "{}-{}-{}",
        stack_name(stack_id),
        logical_resource_id,
        suffix.generate()
    )
}

/// Id for a newly created target.
///
/// The logical id is cut to `TARGET_ID_PREFIX_LEN` characters so the result
/// stays within the provider's Target Id limit.
pub fn generated_target_id(logical_resource_id: &str, suffix: &dyn SuffixGenerator) -> String {
    let prefix: String = logical_resource_id
        .chars()
        .take(TARGET_ID_PREFIX_LEN)
        .collect();
    format!("{}-{}", prefix, suffix.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::MAX_TARGET_ID_LEN;

    struct Fixed;

    impl SuffixGenerator for Fixed {
        fn generate(&self) -> String {
            "ABCDEFGHIJ123".to_string()
        }
    }

    #[test]
    fn test_stack_name_from_arn() {
        assert_eq!(
            stack_name("arn:aws:cloudformation:us-east-1:123456789012:stack/my-stack/1c2fa620-982a-11e3-aff7-50e2416294e0"),
            "my-stack"
        );
    }

    #[test]
    fn test_stack_name_passthrough() {
        assert_eq!(stack_name("my-stack"), "my-stack");
        assert_eq!(stack_name("stack/no-trailing-slash"), "stack/no-trailing-slash");
        assert_eq!(stack_name("stack//guid"), "stack//guid");
    }

    #[test]
    fn test_generated_rule_name() {
        let name = generated_rule_name(
            "arn:aws:cloudformation:us-east-1:123456789012:stack/prod/guid",
            "NightlyRule",
            &Fixed,
        );
        assert_eq!(name, "prod-NightlyRule-ABCDEFGHIJ123");
    }

    #[test]
    fn test_generated_target_id_truncates_logical_id() {
        let logical = "L".repeat(80);
        let id = generated_target_id(&logical, &Fixed);
        assert_eq!(id, format!("{}-ABCDEFGHIJ123", "L".repeat(50)));
        assert!(id.len() <= MAX_TARGET_ID_LEN);

        assert_eq!(generated_target_id("Short", &Fixed), "Short-ABCDEFGHIJ123");
    }

    #[test]
    fn test_encode_suffix_strips_symbols() {
        // 0xfb 0xff encodes to "+/8=" in standard base64
        assert_eq!(encode_suffix(&[0xfb, 0xff]), "8");
        assert_eq!(encode_suffix(b"hello"), "AGVSBG8");
    }

    #[test]
    fn test_random_suffix_shape() {
        for _ in 0..100 {
            let suffix = RandomSuffix.generate();
            assert_eq!(suffix.len(), SUFFIX_LEN);
            assert!(
                suffix
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
                "unexpected character in {suffix}"
            );
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Encoded suffixes only ever contain [A-Z0-9]
            #[test]
            fn encode_suffix_is_upper_alphanumeric(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
                let suffix = encode_suffix(&bytes);
                prop_assert!(suffix.len() <= SUFFIX_LEN);
                prop_assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            }

            /// Generated rule names keep the `<stack>-<logical>-<suffix>` shape
            #[test]
            fn generated_rule_name_shape(
                stack in "[a-zA-Z][a-zA-Z0-9-]{0,30}",
                logical in "[A-Za-z0-9]{1,40}",
            ) {
                let stack_id = format!("arn:aws:cloudformation:us-east-1:123456789012:stack/{stack}/guid");
                let name = generated_rule_name(&stack_id, &logical, &RandomSuffix);
                let prefix = format!("{stack}-{logical}-");
                prop_assert!(name.starts_with(&prefix));
                let suffix = &name[prefix.len()..];
                prop_assert_eq!(suffix.len(), SUFFIX_LEN);
                prop_assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            }

            /// Generated target ids never exceed the provider limit
            #[test]
            fn generated_target_id_fits(logical in "[A-Za-z0-9]{1,255}") {
                let id = generated_target_id(&logical, &RandomSuffix);
                prop_assert!(id.len() <= MAX_TARGET_ID_LEN);
            }
        }
    }
}
