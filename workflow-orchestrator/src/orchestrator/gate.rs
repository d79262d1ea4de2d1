//! Pre-dispatch gating: conditions and dependencies
//!
//! Dependencies only gate a phase. They never reorder the plan.

use crate::orchestrator::types::{PhaseType, WorkflowContext, WorkflowPhase};

pub const CONDITION_NOT_MET: &str = "Condition not met";

/// What the driver should do with a phase before invoking any agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Run,
    Skip { reason: String },
    Fail { reason: String },
}

/// Decide whether a phase runs, is skipped, or fails outright
///
/// The condition is checked first, so a conditional phase whose predicate
/// is false is reported as skipped even when its dependencies are unmet.
pub fn evaluate_phase_gate(phase: &WorkflowPhase, context: &WorkflowContext) -> GateDecision {
    if phase.phase_type == PhaseType::Conditional {
        if let Some(condition) = &phase.condition {
            if !condition.evaluate(context) {
                return GateDecision::Skip {
                    reason: CONDITION_NOT_MET.to_string(),
                };
            }
        }
    }

    let unmet = unmet_dependencies(&phase.depends_on, context);
    if !unmet.is_empty() {
        return GateDecision::Fail {
            reason: format!("Dependencies not resolved: {}", unmet.join(", ")),
        };
    }

    GateDecision::Run
}

/// Dependency ids that are missing from the history or whose latest result is an error
///
/// Only the most recent invocation counts: an earlier success is discarded
/// once the same agent fails again.
pub fn unmet_dependencies<'a>(dependencies: &'a [String], context: &WorkflowContext) -> Vec<&'a str> {
    dependencies
        .iter()
        .filter(|dep| match context.latest_result(dep) {
            Some(latest) => latest.is_error(),
            None => true,
        })
        .map(String::as_str)
        .collect()
}

pub fn dependencies_resolved(dependencies: &[String], context: &WorkflowContext) -> bool {
    unmet_dependencies(dependencies, context).is_empty()
}
