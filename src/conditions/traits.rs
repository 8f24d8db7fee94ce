// Traits for dependency injection - time source and the controller-facing updater

use chrono::{DateTime, Utc};
use std::cell::Cell;

use super::types::NamespaceStatus;

/// Source of "now" for condition timestamps
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Share it by reference between a
/// builder and a merger to control every timestamp of a pass.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Translates namespace deleter errors into namespace status conditions.
///
/// One updater serves one reconciliation pass: errors are processed as the
/// deleter hits them, then `update` folds them into the namespace status.
pub trait ConditionUpdater {
    /// Discovery of API resources failed
    fn process_discover_resources_err(&mut self, err: &(dyn std::error::Error + 'static));

    /// Parsing group versions of legacy kube types failed
    fn process_group_version_err(&mut self, err: &(dyn std::error::Error + 'static));

    /// Deleting the content of one resource type failed
    fn process_delete_content_err(&mut self, err: &(dyn std::error::Error + 'static));

    /// Merge processed errors into `status`; true when it needs writing back
    fn update(self, status: &mut NamespaceStatus) -> bool
    where
        Self: Sized;
}
