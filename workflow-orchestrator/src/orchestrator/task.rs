//! Task text assembly for agent invocations
//!
//! The text built here is the only input an executor receives. Dependency
//! results are summarized by status, never by content, so task text stays
//! bounded no matter how much earlier agents produced.

use crate::orchestrator::types::{AgentSpec, WorkflowContext};
use workflow_orchestrator_sdk::AgentExecutionResult;

/// Build the task description for one agent from the shared context
///
/// `phase_timeout` is used when the agent declares no timeout of its own.
pub fn build_agent_task(
    spec: &AgentSpec,
    phase_timeout: Option<&str>,
    context: &WorkflowContext,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("**Purpose**: {}", spec.purpose));
    parts.push(format!("**Research Query**: {}", context.query));

    if let Some(domain) = &context.domain {
        parts.push(format!("**Domain**: {}", domain));
    }

    if let Some(requirements) = &context.requirements {
        parts.push(format!("**Requirements**: {}", requirements));
    }

    if let Some(timeout) = spec.timeout.as_deref().or(phase_timeout) {
        parts.push(format!("**Time Budget**: {}", timeout));
    }

    if !spec.depends_on.is_empty() {
        parts.push("\n**Previous Findings**:".to_string());
        for dep_id in &spec.depends_on {
            if let Some(latest) = context.latest_result(dep_id) {
                parts.push(format!("- {}: {}", dep_id, summarize_agent_result(latest)));
            }
        }
    }

    parts.join("\n")
}

/// One-line status summary of a result
pub fn summarize_agent_result(result: &AgentExecutionResult) -> String {
    if result.is_error() {
        return format!("Error: {}", result.error.as_deref().unwrap_or("unknown error"));
    }
    format!("{} completed successfully", result.name)
}
