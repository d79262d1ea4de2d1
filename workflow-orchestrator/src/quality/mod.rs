//! Quality scoring, gates and validation of workflow runs

pub mod format;
pub mod metrics;
pub mod validation;

pub use format::{format_quality_metrics, format_validation_result};
pub use metrics::{
    calculate_quality_metrics, calculate_run_metrics, GateSeverity, QualityGate, QualityMetrics,
    RunStats,
};
pub use validation::{
    validate_workflow_quality, IssueKind, ValidationIssue, ValidationResult, VALID_THRESHOLD,
};
