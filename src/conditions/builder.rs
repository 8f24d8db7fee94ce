// Derives status conditions from the errors of one deletion pass

use tracing::{debug, trace};

use super::errors::GroupDiscoveryFailed;
use super::merger::ConditionMerger;
use super::traits::{Clock, ConditionUpdater, SystemClock};
use super::types::{ConditionCategory, ConditionList, NamespaceStatus, StatusCondition};

/// Accumulates the failures of a single reconciliation pass.
///
/// Discovery and group-version parsing each fail at one point, so the latest
/// report replaces any earlier one. Content deletion fails once per resource
/// type; those errors are collected and folded into one condition at the end.
#[derive(Debug)]
pub struct ConditionBuilder<C: Clock = SystemClock> {
    clock: C,
    discovery: Option<StatusCondition>,
    group_version: Option<StatusCondition>,
    content_errors: Vec<String>,
}

impl ConditionBuilder<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ConditionBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ConditionBuilder<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            discovery: None,
            group_version: None,
            content_errors: Vec::new(),
        }
    }

    /// Record that resource discovery failed
    pub fn report_discovery_failure(&mut self, err: &(dyn std::error::Error + 'static)) {
        let message = match err.downcast_ref::<GroupDiscoveryFailed>() {
            Some(partial) => format!(
                "Discovery failed for some groups, {} failing: {}",
                partial.failing_groups(),
                err
            ),
            None => err.to_string(),
        };
        debug!(message = %message, "discovery failure reported");
        self.discovery = Some(StatusCondition::failing(
            ConditionCategory::DiscoveryFailure,
            message,
            self.clock.now(),
        ));
    }

    /// Record that group versions of legacy kube types could not be parsed
    pub fn report_group_version_parsing_failure(
        &mut self,
        err: &(dyn std::error::Error + 'static),
    ) {
        debug!(error = %err, "group version parsing failure reported");
        self.group_version = Some(StatusCondition::failing(
            ConditionCategory::GroupVersionParsingFailure,
            err.to_string(),
            self.clock.now(),
        ));
    }

    /// Collect one content deletion error; folded later by
    /// [`derive_content_failure_condition`](Self::derive_content_failure_condition)
    pub fn report_content_deletion_failure(&mut self, err: &(dyn std::error::Error + 'static)) {
        trace!(error = %err, "content deletion failure collected");
        self.content_errors.push(err.to_string());
    }

    /// Number of content deletion errors collected so far
    pub fn content_error_count(&self) -> usize {
        self.content_errors.len()
    }

    /// One condition summarising every collected content deletion error,
    /// or `None` when nothing failed.
    pub fn derive_content_failure_condition(&self) -> Option<StatusCondition> {
        if self.content_errors.is_empty() {
            return None;
        }

        let mut messages: Vec<&str> = self.content_errors.iter().map(String::as_str).collect();
        messages.sort_unstable();

        Some(StatusCondition::failing(
            ConditionCategory::ContentDeletionFailure,
            format!(
                "Failed to delete all resource types, {} remaining: {}",
                messages.len(),
                messages.join(", ")
            ),
            self.clock.now(),
        ))
    }

    /// Conditions derived from this pass, at most one per category
    pub fn conditions(&self) -> ConditionList {
        let content = self.derive_content_failure_condition();
        self.discovery
            .iter()
            .chain(self.group_version.iter())
            .cloned()
            .chain(content)
            .collect()
    }

    /// Consume the builder, returning its conditions and clock
    pub fn into_parts(self) -> (ConditionList, C) {
        let conditions = self.conditions();
        (conditions, self.clock)
    }

    pub fn into_conditions(self) -> ConditionList {
        self.into_parts().0
    }
}

impl<C: Clock> ConditionUpdater for ConditionBuilder<C> {
    fn process_discover_resources_err(&mut self, err: &(dyn std::error::Error + 'static)) {
        self.report_discovery_failure(err);
    }

    fn process_group_version_err(&mut self, err: &(dyn std::error::Error + 'static)) {
        self.report_group_version_parsing_failure(err);
    }

    fn process_delete_content_err(&mut self, err: &(dyn std::error::Error + 'static)) {
        self.report_content_deletion_failure(err);
    }

    fn update(self, status: &mut NamespaceStatus) -> bool {
        let (derived, clock) = self.into_parts();
        let outcome = ConditionMerger::with_clock(clock).merge(&status.conditions, &derived);
        status.conditions = outcome.conditions;
        outcome.changed
    }
}
