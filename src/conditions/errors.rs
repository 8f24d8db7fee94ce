// Error values reported into the condition builder

use std::collections::BTreeMap;
use thiserror::Error;

/// Discovery succeeded for some API groups but failed for others.
///
/// Keys are group versions (`apps/v1`), values the discovery error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to retrieve the complete list of server APIs: {}", describe_groups(.groups))]
pub struct GroupDiscoveryFailed {
    pub groups: BTreeMap<String, String>,
}

impl GroupDiscoveryFailed {
    pub fn new(groups: BTreeMap<String, String>) -> Self {
        Self { groups }
    }

    /// Number of groups whose discovery failed
    pub fn failing_groups(&self) -> usize {
        self.groups.len()
    }
}

fn describe_groups(groups: &BTreeMap<String, String>) -> String {
    groups
        .iter()
        .map(|(group_version, err)| format!("{group_version}: {err}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error that only carries a message, e.g. one read back from a replay file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ReportedError(pub String);

impl From<&str> for ReportedError {
    fn from(message: &str) -> Self {
        ReportedError(message.to_string())
    }
}

impl From<String> for ReportedError {
    fn from(message: String) -> Self {
        ReportedError(message)
    }
}
