//! Replay of a single reconciliation pass.
//!
//! A pass document captures what a namespace deleter saw during one pass:
//! the status currently persisted on the namespace and the errors reported
//! by discovery, group-version parsing and content deletion. Running it
//! yields the status the controller would write back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::conditions::{
    Clock, ConditionBuilder, ConditionUpdater, GroupDiscoveryFailed, NamespaceStatus,
    ReportedError, SystemClock,
};
use crate::telemetry::{create_reconcile_span, generate_correlation_id};

#[derive(Debug, Error)]
pub enum PassError {
    #[error("failed to read pass file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pass file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode pass outcome: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Discovery failure as recorded in a pass document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscoveryReport {
    /// Discovery failed for some groups; keys are group versions
    PartialGroups {
        #[serde(rename = "failedGroups")]
        failed_groups: BTreeMap<String, String>,
    },
    /// Any other discovery error
    Message(String),
}

/// Inputs of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcilePass {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub status: NamespaceStatus,
    #[serde(default)]
    pub discovery_error: Option<DiscoveryReport>,
    #[serde(default)]
    pub group_version_error: Option<String>,
    #[serde(default)]
    pub content_errors: Vec<String>,
}

/// Status to persist and whether persisting is needed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassOutcome {
    pub changed: bool,
    pub status: NamespaceStatus,
}

impl PassOutcome {
    pub fn to_json(&self, pretty: bool) -> Result<String, PassError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl ReconcilePass {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PassError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PassError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| PassError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn run(self) -> PassOutcome {
        self.run_with_clock(SystemClock)
    }

    pub fn run_with_clock<C: Clock>(self, clock: C) -> PassOutcome {
        let correlation_id = generate_correlation_id();
        let span = create_reconcile_span(self.namespace.as_deref(), &correlation_id);
        let _guard = span.enter();

        let mut updater = ConditionBuilder::with_clock(clock);
        match &self.discovery_error {
            Some(DiscoveryReport::PartialGroups { failed_groups }) => {
                updater.process_discover_resources_err(&GroupDiscoveryFailed::new(
                    failed_groups.clone(),
                ));
            }
            Some(DiscoveryReport::Message(message)) => {
                updater.process_discover_resources_err(&ReportedError::from(message.as_str()));
            }
            None => {}
        }
        if let Some(message) = &self.group_version_error {
            updater.process_group_version_err(&ReportedError::from(message.as_str()));
        }
        for message in &self.content_errors {
            updater.process_delete_content_err(&ReportedError::from(message.as_str()));
        }

        let mut status = self.status;
        let changed = updater.update(&mut status);
        info!(
            changed,
            conditions = status.conditions.len(),
            "reconcile pass finished"
        );

        PassOutcome { changed, status }
    }
}
