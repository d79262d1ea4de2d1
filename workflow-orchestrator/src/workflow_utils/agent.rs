//! Registry-backed simulated agent execution
//!
//! [`SimulatedExecutor`] does not call a model. It resolves the agent in the
//! registry and assembles the prompt a live executor would send, which keeps
//! runs deterministic for tests and dry runs.

use std::sync::Arc;
use tracing::debug;
use workflow_orchestrator_sdk::{
    async_trait, AgentExecutionResult, AgentExecutor, AgentStatus, ExecutorError,
};

use crate::{
    registry::{AgentDefinition, AgentMode, AgentRegistry},
    workflow_utils::batch::execute_batch,
};

/// Executor that assembles prompts from registry definitions
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    registry: Arc<AgentRegistry>,
    /// Upper bound on concurrent invocations in a batch (None = unbounded)
    max_concurrency: Option<usize>,
}

impl SimulatedExecutor {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self {
            registry,
            max_concurrency: None,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    fn run(&self, agent_id: &str, task: &str) -> AgentExecutionResult {
        let Some(agent) = self.registry.get(agent_id) else {
            debug!(agent = agent_id, "agent not found in registry");
            return AgentExecutionResult {
                agent_id: agent_id.to_string(),
                name: "Unknown Agent".to_string(),
                status: AgentStatus::Error,
                task: task.to_string(),
                prompt: String::new(),
                model: "unknown".to_string(),
                temperature: 0.3,
                tools: Vec::new(),
                error: Some(format!("Agent {} not found in registry", agent_id)),
            };
        };

        AgentExecutionResult {
            agent_id: agent_id.to_string(),
            name: agent.name.clone(),
            status: AgentStatus::Ready,
            task: task.to_string(),
            prompt: build_agent_prompt(agent, task),
            model: agent.effective_model().to_string(),
            temperature: agent.effective_temperature(),
            tools: agent.enabled_tools(),
            error: None,
        }
    }
}

#[async_trait]
impl AgentExecutor for SimulatedExecutor {
    async fn execute(
        &self,
        agent_id: &str,
        task: &str,
    ) -> Result<AgentExecutionResult, ExecutorError> {
        Ok(self.run(agent_id, task))
    }

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

        let pairs: Vec<(&String, &String)> = agent_ids.iter().zip(tasks).collect();
        let limit = self.max_concurrency.unwrap_or(pairs.len());

        execute_batch(pairs, limit, |(agent_id, task), _ctx| async move {
            self.run(agent_id, task)
        })
        .await
        .map_err(|e| ExecutorError::Unavailable(e.to_string()))
    }
}

/// Build the complete prompt for an agent
pub fn build_agent_prompt(agent: &AgentDefinition, task: &str) -> String {
    let mut sections: Vec<String> = Vec::new();

    // Agent identity and role
    sections.push(format!("# {}", agent.name));
    sections.push(agent.description.clone());
    sections.push(String::new());

    if !agent.context.is_empty() {
        sections.push(agent.context.clone());
        sections.push(String::new());
    }

    sections.push("## Current Task".to_string());
    sections.push(task.to_string());
    sections.push(String::new());

    sections.push("## Instructions".to_string());
    sections.push(
        match agent.mode {
            AgentMode::Subagent => {
                "You are operating as a specialized subagent. Focus on your specific expertise and provide targeted, actionable output."
            }
            AgentMode::Primary => {
                "You are operating as a primary agent with coordination responsibilities."
            }
        }
        .to_string(),
    );

    let tools = agent.enabled_tools();
    if !tools.is_empty() {
        sections.push("## Available Tools".to_string());
        sections.push(
            tools
                .iter()
                .map(|tool| format!("- {}", tool))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    sections.join("\n")
}
