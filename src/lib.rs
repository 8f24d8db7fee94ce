// ns-conditions - status conditions for namespaces under deletion
// Exposes the condition builder and merger for controllers and tests

pub mod conditions;
pub mod config;
pub mod pass;
pub mod telemetry;

// Re-export key types for easy access
pub use conditions::{
    merge_conditions, ConditionBuilder, ConditionCategory, ConditionList, ConditionMerger,
    ConditionStatus, ConditionUpdater, GroupDiscoveryFailed, MergeOutcome, NamespaceStatus,
    StatusCondition,
};
pub use config::ReconcilerConfig;
pub use pass::{PassOutcome, ReconcilePass};
pub use telemetry::{create_reconcile_span, generate_correlation_id, init_telemetry};
