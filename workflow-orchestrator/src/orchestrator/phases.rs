//! Phase executors
//!
//! Both executors build every task from the context as it stood when the
//! phase started. Results of a phase are merged into the context by the
//! driver only after the whole phase has settled, so agents within one
//! phase never see each other's results.

use tracing::debug;
use workflow_orchestrator_sdk::{
    log_agent_complete, log_agent_failed, log_agent_start, AgentExecutionResult, AgentExecutor,
    ExecutorError,
};

use crate::orchestrator::{
    task::build_agent_task,
    types::{PhaseType, WorkflowContext, WorkflowPhase},
};

/// Run a phase with the executor matching its type
///
/// Optional and conditional phases that passed gating run in parallel.
pub async fn dispatch_phase(
    phase_index: usize,
    phase: &WorkflowPhase,
    context: &WorkflowContext,
    executor: &dyn AgentExecutor,
) -> Result<Vec<AgentExecutionResult>, ExecutorError> {
    match phase.phase_type {
        PhaseType::Sequential => execute_phase_sequential(phase_index, phase, context, executor).await,
        PhaseType::Parallel | PhaseType::Optional | PhaseType::Conditional => {
            execute_phase_parallel(phase_index, phase, context, executor).await
        }
    }
}

/// Invoke every agent of the phase concurrently and wait for all of them
///
/// Results are index-aligned with `phase.agents`. An error result does not
/// cancel siblings; only a failing batch call is returned as `Err`.
pub async fn execute_phase_parallel(
    phase_index: usize,
    phase: &WorkflowPhase,
    context: &WorkflowContext,
    executor: &dyn AgentExecutor,
) -> Result<Vec<AgentExecutionResult>, ExecutorError> {
    let agent_ids = phase.agent_ids();
    let tasks: Vec<String> = phase
        .agents
        .iter()
        .map(|spec| build_agent_task(spec, phase.timeout.as_deref(), context))
        .collect();

    for spec in &phase.agents {
        log_agent_start!(phase_index, &spec.agent_id, &spec.purpose);
    }
    debug!(phase = %phase.name, agents = agent_ids.len(), "dispatching parallel batch");

    let results = executor.execute_parallel(&agent_ids, &tasks).await?;

    for result in &results {
        log_agent_outcome(result);
    }

    Ok(results)
}

/// Invoke the agents one at a time in declaration order
///
/// An infrastructure error from a single invocation becomes an error result
/// for that agent and the phase moves on to the next one.
pub async fn execute_phase_sequential(
    phase_index: usize,
    phase: &WorkflowPhase,
    context: &WorkflowContext,
    executor: &dyn AgentExecutor,
) -> Result<Vec<AgentExecutionResult>, ExecutorError> {
    let mut results = Vec::with_capacity(phase.agents.len());

    for spec in &phase.agents {
        let task = build_agent_task(spec, phase.timeout.as_deref(), context);
        log_agent_start!(phase_index, &spec.agent_id, &spec.purpose);

        let result = match executor.execute(&spec.agent_id, &task).await {
            Ok(result) => result,
            Err(e) => {
                debug!(agent = %spec.agent_id, error = %e, "invocation failed, recording error result");
                AgentExecutionResult::failed(&spec.agent_id, "Error", task, e.to_string())
            }
        };

        log_agent_outcome(&result);
        results.push(result);
    }

    Ok(results)
}

fn log_agent_outcome(result: &AgentExecutionResult) {
    if result.is_error() {
        log_agent_failed!(
            &result.agent_id,
            result.error.as_deref().unwrap_or("unknown error")
        );
    } else {
        log_agent_complete!(&result.agent_id, &result.name);
    }
}
