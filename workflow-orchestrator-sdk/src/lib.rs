// Re-export async trait for executor implementations
pub use async_trait::async_trait;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a single agent invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Ready,
    Error,
}

/// Result returned by an [`AgentExecutor`] for one `(agent id, task)` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentExecutionResult {
    pub agent_id: String,
    pub name: String,
    pub status: AgentStatus,
    /// Task text the agent was invoked with
    pub task: String,
    /// Fully assembled prompt (empty when the invocation failed)
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    /// Enabled tool names of the serving definition
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentExecutionResult {
    /// Build an error result for an invocation that never produced a prompt
    pub fn failed(
        agent_id: impl Into<String>,
        name: impl Into<String>,
        task: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            name: name.into(),
            status: AgentStatus::Error,
            task: task.into(),
            prompt: String::new(),
            model: "unknown".to_string(),
            temperature: 0.3,
            tools: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == AgentStatus::Ready
    }

    pub fn is_error(&self) -> bool {
        self.status == AgentStatus::Error
    }
}

/// Infrastructure-level executor failures
///
/// Agent-level failures are never reported through this type: they come back as
/// an [`AgentExecutionResult`] with [`AgentStatus::Error`].
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Agent IDs and tasks arrays must have the same length ({ids} ids, {tasks} tasks)")]
    BatchMismatch { ids: usize, tasks: usize },

    #[error("Executor unavailable: {0}")]
    Unavailable(String),

    #[error("Invocation of {agent_id} failed: {message}")]
    Invocation { agent_id: String, message: String },
}

/// Invokes agents by id with an assembled task
///
/// Implementations may call a live model, a subprocess, or assemble text
/// locally. The orchestrator only relies on this contract.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Run a single agent
    async fn execute(
        &self,
        agent_id: &str,
        task: &str,
    ) -> Result<AgentExecutionResult, ExecutorError>;

    /// Run several agents concurrently
    ///
    /// Results are index-aligned with `agent_ids`. Only a structural mismatch
    /// between `agent_ids` and `tasks` is returned as an error; a failing
    /// invocation is folded into an error result for that slot.
    async fn execute_parallel(
        &self,
        agent_ids: &[String],
        tasks: &[String],
    ) -> Result<Vec<AgentExecutionResult>, ExecutorError> {
        if agent_ids.len() != tasks.len() {
            return Err(ExecutorError::BatchMismatch {
                ids: agent_ids.len(),
                tasks: tasks.len(),
            });
        }

        let invocations = agent_ids
            .iter()
            .zip(tasks)
            .map(|(agent_id, task)| async move {
                match self.execute(agent_id, task).await {
                    Ok(result) => result,
                    Err(e) => AgentExecutionResult::failed(agent_id, "Error", task, e.to_string()),
                }
            });

        Ok(join_all(invocations).await)
    }
}

/// Structured logging events emitted by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowLog {
    /// Workflow run started
    WorkflowStarted {
        workflow: String,
        total_phases: usize,
    },
    /// Phase started
    PhaseStarted {
        phase: usize,
        name: String,
        phase_type: String,
        total_phases: usize,
    },
    /// Phase completed
    PhaseCompleted {
        phase: usize,
        name: String,
        duration_ms: u64,
        agents: usize,
    },
    /// Phase skipped by its condition
    PhaseSkipped {
        phase: usize,
        name: String,
        reason: String,
    },
    /// Phase failed (unmet dependencies or dispatch failure)
    PhaseFailed {
        phase: usize,
        name: String,
        error: String,
    },
    /// Agent invocation started
    AgentStarted {
        phase: usize,
        agent_id: String,
        description: String,
    },
    /// Agent invocation settled with a ready result
    AgentCompleted {
        agent_id: String,
        name: String,
    },
    /// Agent invocation settled with an error result
    AgentFailed {
        agent_id: String,
        error: String,
    },
    /// Specialists chosen from identified domains
    SpecialistsSelected {
        domains: Vec<String>,
        specialists: Vec<String>,
    },
    /// Workflow run finished
    WorkflowCompleted {
        workflow: String,
        quality_score: u32,
        duration_ms: u64,
    },
}

impl WorkflowLog {
    /// Emit this log event to stderr for progress consumers
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            use std::io::Write;
            eprintln!("__WF_EVENT__:{}", json);
            // Force flush stderr in async/concurrent contexts
            let _ = std::io::stderr().flush();
        }
    }
}

/// Helper macros for workflow logging
#[macro_export]
macro_rules! log_workflow_start {
    ($workflow:expr, $total:expr) => {
        $crate::WorkflowLog::WorkflowStarted {
            workflow: $workflow.to_string(),
            total_phases: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_workflow_complete {
    ($workflow:expr, $score:expr, $duration_ms:expr) => {
        $crate::WorkflowLog::WorkflowCompleted {
            workflow: $workflow.to_string(),
            quality_score: $score,
            duration_ms: $duration_ms,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_start {
    ($phase:expr, $name:expr, $phase_type:expr, $total:expr) => {
        $crate::WorkflowLog::PhaseStarted {
            phase: $phase,
            name: $name.to_string(),
            phase_type: $phase_type.to_string(),
            total_phases: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $name:expr, $duration_ms:expr, $agents:expr) => {
        $crate::WorkflowLog::PhaseCompleted {
            phase: $phase,
            name: $name.to_string(),
            duration_ms: $duration_ms,
            agents: $agents,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_skipped {
    ($phase:expr, $name:expr, $reason:expr) => {
        $crate::WorkflowLog::PhaseSkipped {
            phase: $phase,
            name: $name.to_string(),
            reason: $reason.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_failed {
    ($phase:expr, $name:expr, $error:expr) => {
        $crate::WorkflowLog::PhaseFailed {
            phase: $phase,
            name: $name.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_start {
    ($phase:expr, $agent_id:expr, $desc:expr) => {
        $crate::WorkflowLog::AgentStarted {
            phase: $phase,
            agent_id: $agent_id.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_complete {
    ($agent_id:expr, $name:expr) => {
        $crate::WorkflowLog::AgentCompleted {
            agent_id: $agent_id.to_string(),
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_failed {
    ($agent_id:expr, $error:expr) => {
        $crate::WorkflowLog::AgentFailed {
            agent_id: $agent_id.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_specialists_selected {
    ($domains:expr, $specialists:expr) => {
        $crate::WorkflowLog::SpecialistsSelected {
            domains: $domains.to_vec(),
            specialists: $specialists.to_vec(),
        }
        .emit();
    };
}
