// Namespace deletion status conditions
//
// A builder turns the errors of one deletion pass into at most one condition
// per category; the merger folds those into the conditions already persisted
// on the namespace and reports whether a write is needed.

pub mod builder;
pub mod errors;
pub mod merger;
pub mod traits;
pub mod types;

pub use builder::ConditionBuilder;
pub use errors::{GroupDiscoveryFailed, ReportedError};
pub use merger::{merge_conditions, CategoryAction, ConditionMerger, MergeOutcome};
pub use traits::{Clock, ConditionUpdater, ManualClock, SystemClock};
pub use types::{
    ConditionCategory, ConditionList, ConditionStatus, ConditionsExt, HealthyState,
    NamespaceStatus, StatusCondition,
};
