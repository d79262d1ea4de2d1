//! Multi-phase agent orchestration
//!
//! A workflow is an ordered list of [`WorkflowPhase`]s. The driver gates each
//! phase on its condition and dependencies, runs its agents through an
//! [`AgentExecutor`](workflow_orchestrator_sdk::AgentExecutor), folds the
//! results into the shared [`WorkflowContext`], and finally scores the run.

pub mod findings;
pub mod gate;
pub mod phases;
pub mod specialists;
pub mod task;
pub mod types;
pub mod workflow;

pub use findings::{update_workflow_findings, DOMAIN_KEYWORDS};
pub use gate::{dependencies_resolved, evaluate_phase_gate, GateDecision, CONDITION_NOT_MET};
pub use phases::{dispatch_phase, execute_phase_parallel, execute_phase_sequential};
pub use specialists::{
    create_domain_specialist_phase, select_domain_specialists, DEFAULT_MAX_SPECIALISTS,
    SPECIALIST_PHASE_NAME,
};
pub use task::build_agent_task;
pub use types::*;
pub use workflow::{
    execute_multi_phase_workflow, generate_workflow_summary, WorkflowOptions,
};
