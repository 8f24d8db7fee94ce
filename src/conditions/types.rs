// Core types for namespace deletion status conditions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition types maintained while a namespace is being deleted.
///
/// The set is closed: every pass of the merger visits exactly these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConditionCategory {
    /// Listing the server's API resources failed for some groups
    #[serde(rename = "NamespaceDeletionDiscoveryFailure")]
    DiscoveryFailure,
    /// Legacy kube types could not be parsed into group versions
    #[serde(rename = "NamespaceDeletionGroupVersionParsingFailure")]
    GroupVersionParsingFailure,
    /// Some resource types still hold content in the namespace
    #[serde(rename = "NamespaceDeletionContentFailure")]
    ContentDeletionFailure,
}

/// Message and reason written when a category recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthyState {
    pub message: &'static str,
    pub reason: &'static str,
}

static HEALTHY_STATES: [HealthyState; 3] = [
    HealthyState {
        message: "All resources successfully discovered",
        reason: "ResourcesDiscovered",
    },
    HealthyState {
        message: "All legacy kube types successfully parsed",
        reason: "ParsedGroupVersions",
    },
    HealthyState {
        message: "All content successfully deleted",
        reason: "ContentDeleted",
    },
];

impl ConditionCategory {
    /// Every category, in the order the merger visits them
    pub const ALL: [ConditionCategory; 3] = [
        ConditionCategory::DiscoveryFailure,
        ConditionCategory::GroupVersionParsingFailure,
        ConditionCategory::ContentDeletionFailure,
    ];

    /// Kubernetes condition type string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::DiscoveryFailure => "NamespaceDeletionDiscoveryFailure",
            ConditionCategory::GroupVersionParsingFailure => {
                "NamespaceDeletionGroupVersionParsingFailure"
            }
            ConditionCategory::ContentDeletionFailure => "NamespaceDeletionContentFailure",
        }
    }

    /// Reason token used when this category is reported as failing
    pub fn failure_reason(&self) -> &'static str {
        match self {
            ConditionCategory::DiscoveryFailure => "DiscoveryFailed",
            ConditionCategory::GroupVersionParsingFailure => "GroupVersionParsingFailed",
            ConditionCategory::ContentDeletionFailure => "ContentDeletionFailed",
        }
    }

    /// Fixed message/reason pair for a cleared failure
    pub fn healthy_state(&self) -> &'static HealthyState {
        &HEALTHY_STATES[*self as usize]
    }

    pub fn ok_message(&self) -> &'static str {
        self.healthy_state().message
    }

    pub fn ok_reason(&self) -> &'static str {
        self.healthy_state().reason
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition status as persisted on the namespace. `True` means failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ConditionStatus::False)
    }
}

/// One status entry on a namespace under deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition {
    #[serde(rename = "type")]
    pub category: ConditionCategory,
    pub status: ConditionStatus,
    pub last_probe_time: DateTime<Utc>,
    pub last_transition_time: DateTime<Utc>,
    pub reason: String,
    pub message: String,
}

impl StatusCondition {
    /// Failing condition with both timestamps set to `now`
    pub fn failing(
        category: ConditionCategory,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            status: ConditionStatus::True,
            last_probe_time: now,
            last_transition_time: now,
            reason: category.failure_reason().to_string(),
            message: message.into(),
        }
    }

    pub fn is_failing(&self) -> bool {
        matches!(self.status, ConditionStatus::True)
    }
}

/// Ordered condition entries, at most one per category
pub type ConditionList = Vec<StatusCondition>;

/// Status block of a namespace as the persistence layer stores it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceStatus {
    #[serde(default)]
    pub conditions: ConditionList,
}

/// Lookups over a condition list keyed by category
pub trait ConditionsExt {
    /// First entry of the given category
    fn condition(&self, category: ConditionCategory) -> Option<&StatusCondition>;

    /// Position of the first entry of the given category
    fn position_of(&self, category: ConditionCategory) -> Option<usize>;

    /// True when no category appears more than once
    fn has_unique_categories(&self) -> bool;
}

impl ConditionsExt for [StatusCondition] {
    fn condition(&self, category: ConditionCategory) -> Option<&StatusCondition> {
        self.iter().find(|c| c.category == category)
    }

    fn position_of(&self, category: ConditionCategory) -> Option<usize> {
        self.iter().position(|c| c.category == category)
    }

    fn has_unique_categories(&self) -> bool {
        ConditionCategory::ALL
            .iter()
            .all(|category| self.iter().filter(|c| c.category == *category).count() <= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_healthy_states_match_categories() {
        assert_eq!(
            ConditionCategory::DiscoveryFailure.ok_message(),
            "All resources successfully discovered"
        );
        assert_eq!(
            ConditionCategory::DiscoveryFailure.ok_reason(),
            "ResourcesDiscovered"
        );
        assert_eq!(
            ConditionCategory::GroupVersionParsingFailure.ok_message(),
            "All legacy kube types successfully parsed"
        );
        assert_eq!(
            ConditionCategory::GroupVersionParsingFailure.ok_reason(),
            "ParsedGroupVersions"
        );
        assert_eq!(
            ConditionCategory::ContentDeletionFailure.ok_message(),
            "All content successfully deleted"
        );
        assert_eq!(
            ConditionCategory::ContentDeletionFailure.ok_reason(),
            "ContentDeleted"
        );
    }

    #[test]
    fn test_condition_serializes_in_kube_shape() {
        let condition = StatusCondition::failing(
            ConditionCategory::ContentDeletionFailure,
            "pods remain",
            at(0),
        );
        let json = serde_json::to_value(&condition).unwrap();

        assert_eq!(json["type"], "NamespaceDeletionContentFailure");
        assert_eq!(json["status"], "True");
        assert_eq!(json["reason"], "ContentDeletionFailed");
        assert_eq!(json["message"], "pods remain");
        assert!(json.get("lastProbeTime").is_some());
        assert!(json.get("lastTransitionTime").is_some());

        let back: StatusCondition = serde_json::from_value(json).unwrap();
        assert_eq!(back, condition);
    }

    #[test]
    fn test_category_display_matches_wire_name() {
        for category in ConditionCategory::ALL {
            let wire = serde_json::to_value(category).unwrap();
            assert_eq!(wire, category.to_string());
        }
    }

    #[test]
    fn test_lookup_helpers() {
        let list = vec![
            StatusCondition::failing(ConditionCategory::GroupVersionParsingFailure, "bad gv", at(1)),
            StatusCondition::failing(ConditionCategory::DiscoveryFailure, "down", at(2)),
        ];

        assert_eq!(list.position_of(ConditionCategory::DiscoveryFailure), Some(1));
        assert_eq!(
            list.condition(ConditionCategory::GroupVersionParsingFailure)
                .map(|c| c.message.as_str()),
            Some("bad gv")
        );
        assert!(list.condition(ConditionCategory::ContentDeletionFailure).is_none());
        assert!(list.has_unique_categories());

        let mut duplicated = list.clone();
        duplicated.push(list[0].clone());
        assert!(!duplicated.has_unique_categories());
    }

    #[test]
    fn test_unknown_status_is_not_healthy() {
        assert!(ConditionStatus::False.is_healthy());
        assert!(!ConditionStatus::True.is_healthy());
        assert!(!ConditionStatus::Unknown.is_healthy());
    }

    #[test]
    fn test_namespace_status_defaults_to_empty_conditions() {
        let status: NamespaceStatus = serde_json::from_str("{}").unwrap();
        assert!(status.conditions.is_empty());
    }
}
