//! Custom resource types served by the handlers
//!
//! One deployment of the handler serves exactly one kind. The kind also
//! names the `Custom::` resource type templates are expected to use.

/// Types of custom resources managed by cfn-events
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResourceKind {
    /// CloudWatch Events Rule
    Rule,
    /// Target attached to a Rule
    Target,
}

impl ResourceKind {
    /// Conventional template resource type for this kind
    pub fn resource_type(self) -> &'static str {
        match self {
            ResourceKind::Rule => "Custom::CloudWatchEventsRule",
            ResourceKind::Target => "Custom::CloudWatchEventsTarget",
        }
    }

    /// Whether an event's `ResourceType` looks like it belongs to this kind.
    ///
    /// Templates may pick any `Custom::` name, so this only recognises the
    /// conventional names and treats everything else as unknown.
    pub fn matches_resource_type(self, resource_type: &str) -> Option<bool> {
        [ResourceKind::Rule, ResourceKind::Target]
            .into_iter()
            .find(|kind| kind.resource_type() == resource_type)
            .map(|kind| kind == self)
    }
}
