//! Data structures shared by the phase driver, executors and quality scorer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};
use uuid::Uuid;
use workflow_orchestrator_sdk::AgentExecutionResult;

/// How a phase runs its agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseType {
    Parallel,
    Sequential,
    Optional,
    Conditional,
}

impl PhaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseType::Parallel => "parallel",
            PhaseType::Sequential => "sequential",
            PhaseType::Optional => "optional",
            PhaseType::Conditional => "conditional",
        }
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Completed,
    Skipped,
    Failed,
}

/// Three-level confidence label derived from a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl Confidence {
    /// High at 80 and above, Low below 50, Medium otherwise
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Confidence::High
        } else if score < 50 {
            Confidence::Low
        } else {
            Confidence::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One agent invocation declared inside a phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Registry id of the agent to invoke
    #[serde(alias = "name")]
    pub agent_id: String,
    pub purpose: String,
    /// Agents whose latest result is summarized into this agent's task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Advisory only, forwarded into the task text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl AgentSpec {
    pub fn new(agent_id: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            purpose: purpose.into(),
            depends_on: Vec::new(),
            timeout: None,
        }
    }

    pub fn depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }
}

/// Predicate deciding whether a conditional phase runs
#[derive(Clone)]
pub struct PhaseCondition(Arc<dyn Fn(&WorkflowContext) -> bool + Send + Sync>);

impl PhaseCondition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&WorkflowContext) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn evaluate(&self, context: &WorkflowContext) -> bool {
        (self.0)(context)
    }
}

impl fmt::Debug for PhaseCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PhaseCondition(..)")
    }
}

/// A declared unit of work; plans are immutable once handed to the driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowPhase {
    pub name: String,
    #[serde(rename = "type")]
    pub phase_type: PhaseType,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    /// Agent ids whose latest result must not be an error
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Only consulted for conditional phases
    #[serde(skip)]
    pub condition: Option<PhaseCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl WorkflowPhase {
    pub fn new(name: impl Into<String>, phase_type: PhaseType, agents: Vec<AgentSpec>) -> Self {
        Self {
            name: name.into(),
            phase_type,
            agents,
            depends_on: Vec::new(),
            condition: None,
            timeout: None,
        }
    }

    pub fn parallel(name: impl Into<String>, agents: Vec<AgentSpec>) -> Self {
        Self::new(name, PhaseType::Parallel, agents)
    }

    pub fn sequential(name: impl Into<String>, agents: Vec<AgentSpec>) -> Self {
        Self::new(name, PhaseType::Sequential, agents)
    }

    pub fn optional(name: impl Into<String>, agents: Vec<AgentSpec>) -> Self {
        Self::new(name, PhaseType::Optional, agents)
    }

    pub fn conditional<F>(name: impl Into<String>, agents: Vec<AgentSpec>, predicate: F) -> Self
    where
        F: Fn(&WorkflowContext) -> bool + Send + Sync + 'static,
    {
        Self::new(name, PhaseType::Conditional, agents).with_condition(PhaseCondition::new(predicate))
    }

    pub fn depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_condition(mut self, condition: PhaseCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }

    pub fn agent_ids(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.agent_id.clone()).collect()
    }
}

/// Knowledge accumulated across phases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowFindings {
    /// Insertion-ordered, never contains duplicates
    pub domains: Vec<String>,
    pub critical_issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub needs_deep_analysis: bool,
    pub confidence: Confidence,
}

impl WorkflowFindings {
    /// Add a domain unless already present; returns whether it was added
    pub fn add_domain(&mut self, domain: &str) -> bool {
        if self.domains.iter().any(|d| d == domain) {
            return false;
        }
        self.domains.push(domain.to_string());
        true
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}

/// Shared state of one workflow run
///
/// Owned by the driver and only mutated between settled phases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowContext {
    pub query: String,
    pub domain: Option<String>,
    pub requirements: Option<String>,
    /// Append-only invocation history per agent id
    pub results: HashMap<String, Vec<AgentExecutionResult>>,
    pub metadata: HashMap<String, serde_json::Value>,
    pub findings: WorkflowFindings,
}

impl WorkflowContext {
    pub fn new(
        query: impl Into<String>,
        domain: Option<String>,
        requirements: Option<String>,
    ) -> Self {
        Self {
            query: query.into(),
            domain,
            requirements,
            ..Default::default()
        }
    }

    /// Most recent result recorded for an agent id
    pub fn latest_result(&self, agent_id: &str) -> Option<&AgentExecutionResult> {
        self.results.get(agent_id).and_then(|history| history.last())
    }

    /// Append results under their agent ids, preserving invocation order
    pub fn record_results(&mut self, results: &[AgentExecutionResult]) {
        for result in results {
            self.results
                .entry(result.agent_id.clone())
                .or_default()
                .push(result.clone());
        }
    }
}

/// Outcome of one declared phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub phase_name: String,
    pub phase_type: PhaseType,
    pub status: PhaseStatus,
    pub results: Vec<AgentExecutionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Why the phase was skipped or failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PhaseResult {
    pub fn completed(phase: &WorkflowPhase, results: Vec<AgentExecutionResult>, duration_ms: u64) -> Self {
        Self {
            phase_name: phase.name.clone(),
            phase_type: phase.phase_type,
            status: PhaseStatus::Completed,
            results,
            duration_ms: Some(duration_ms),
            reason: None,
        }
    }

    pub fn skipped(phase: &WorkflowPhase, reason: impl Into<String>) -> Self {
        Self {
            phase_name: phase.name.clone(),
            phase_type: phase.phase_type,
            status: PhaseStatus::Skipped,
            results: Vec::new(),
            duration_ms: None,
            reason: Some(reason.into()),
        }
    }

    /// Failed phases never carry results
    pub fn failed(phase: &WorkflowPhase, reason: impl Into<String>) -> Self {
        Self {
            phase_name: phase.name.clone(),
            phase_type: phase.phase_type,
            status: PhaseStatus::Failed,
            results: Vec::new(),
            duration_ms: None,
            reason: Some(reason.into()),
        }
    }

    pub fn successful_agents(&self) -> usize {
        self.results.iter().filter(|r| r.is_ready()).count()
    }

    pub fn failed_agents(&self) -> usize {
        self.results.iter().filter(|r| r.is_error()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub total_agents: usize,
    pub successful_agents: usize,
    pub failed_agents: usize,
    pub total_duration_ms: u64,
    pub quality_score: u32,
    pub confidence: Confidence,
    pub insights: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Everything a finished run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiPhaseWorkflowResult {
    pub run_id: Uuid,
    pub workflow: String,
    pub phases: Vec<PhaseResult>,
    pub context: WorkflowContext,
    pub summary: WorkflowSummary,
    pub timestamp: DateTime<Utc>,
}

impl MultiPhaseWorkflowResult {
    pub fn phase(&self, name: &str) -> Option<&PhaseResult> {
        self.phases.iter().find(|p| p.phase_name == name)
    }
}
