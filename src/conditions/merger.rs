// Folds freshly derived conditions into the persisted condition list

use tracing::debug;

use super::traits::{Clock, SystemClock};
use super::types::{ConditionCategory, ConditionList, ConditionStatus, ConditionsExt, StatusCondition};

/// Result of merging a derived condition list into a persisted one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Next value of the persisted list
    pub conditions: ConditionList,
    /// False when `conditions` equals the previous list and no write is needed
    pub changed: bool,
}

/// What the merge did to one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryAction {
    /// Neither list has the category, or the message is unchanged
    Unchanged,
    /// The category is new and was appended
    Added,
    /// The failure cleared and the entry flipped to healthy
    Recovered,
    /// The failure persists with a different message or status
    Updated,
}

impl CategoryAction {
    pub fn is_change(&self) -> bool {
        !matches!(self, CategoryAction::Unchanged)
    }
}

/// Merges per category. Entries keep their position in the old list and
/// new categories are appended in category order.
#[derive(Debug, Clone, Default)]
pub struct ConditionMerger<C: Clock = SystemClock> {
    clock: C,
}

impl ConditionMerger<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> ConditionMerger<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn merge(&self, old: &[StatusCondition], new: &[StatusCondition]) -> MergeOutcome {
        let mut conditions = old.to_vec();
        let mut changed = false;

        for category in ConditionCategory::ALL {
            let action = self.merge_category(&mut conditions, category, new.condition(category));
            if action.is_change() {
                debug!(category = %category, action = ?action, "status condition changed");
            }
            changed |= action.is_change();
        }

        debug!(changed, conditions = conditions.len(), "status conditions merged");
        MergeOutcome { conditions, changed }
    }

    fn merge_category(
        &self,
        conditions: &mut ConditionList,
        category: ConditionCategory,
        new: Option<&StatusCondition>,
    ) -> CategoryAction {
        let Some(index) = conditions.position_of(category) else {
            return match new {
                Some(new) => {
                    conditions.push(new.clone());
                    CategoryAction::Added
                }
                None => CategoryAction::Unchanged,
            };
        };
        let old = &mut conditions[index];

        match new {
            None if old.status.is_healthy() => CategoryAction::Unchanged,
            None => {
                let healthy = category.healthy_state();
                old.status = ConditionStatus::False;
                old.message = healthy.message.to_string();
                old.reason = healthy.reason.to_string();
                old.last_transition_time = self.clock.now();
                CategoryAction::Recovered
            }
            Some(new) if new.message == old.message => CategoryAction::Unchanged,
            Some(new) => {
                if old.status != new.status {
                    old.last_transition_time = self.clock.now();
                }
                old.category = new.category;
                old.status = new.status;
                old.last_probe_time = new.last_probe_time;
                old.reason = new.reason.clone();
                old.message = new.message.clone();
                CategoryAction::Updated
            }
        }
    }
}

/// Merge with the system clock; returns the next list and whether it changed
pub fn merge_conditions(
    old: &[StatusCondition],
    new: &[StatusCondition],
) -> (ConditionList, bool) {
    let outcome = ConditionMerger::new().merge(old, new);
    (outcome.conditions, outcome.changed)
}
