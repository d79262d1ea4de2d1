//! Workflow plans loaded from YAML
//!
//! ```yaml
//! name: auth-review
//! phases:
//!   - name: Discovery
//!     type: parallel
//!     agents:
//!       - name: codebase-locator
//!         purpose: Find auth code
//!   - name: Security Review
//!     type: conditional
//!     condition:
//!       kind: domain_identified
//!       domain: security
//!     agents:
//!       - name: security-scanner
//!         purpose: Scan for vulnerabilities
//! options:
//!   engage_specialists: true
//! ```

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};
use tracing::debug;

use crate::{
    error::{OrchestratorError, Result},
    orchestrator::{PhaseType, WorkflowContext, WorkflowOptions, WorkflowPhase},
};

/// Named predicates a plan can attach to a conditional phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanCondition {
    /// At least `count` domains identified so far
    MinDomains { count: usize },
    DomainIdentified { domain: String },
    NeedsDeepAnalysis,
}

impl PlanCondition {
    pub fn evaluate(&self, context: &WorkflowContext) -> bool {
        match self {
            PlanCondition::MinDomains { count } => context.findings.domains.len() >= *count,
            PlanCondition::DomainIdentified { domain } => context.findings.has_domain(domain),
            PlanCondition::NeedsDeepAnalysis => context.findings.needs_deep_analysis,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedPhase {
    #[serde(flatten)]
    pub phase: WorkflowPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<PlanCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowPlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub phases: Vec<PlannedPhase>,
    #[serde(default)]
    pub options: WorkflowOptions,
}

impl WorkflowPlan {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let plan: WorkflowPlan = serde_yaml::from_str(yaml)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OrchestratorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded workflow plan");
        Self::from_yaml_str(&content)
    }

    /// Structural checks that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("plan name is empty"));
        }
        if self.phases.is_empty() {
            return Err(invalid("plan has no phases"));
        }

        let mut names = HashSet::new();
        for planned in &self.phases {
            let phase = &planned.phase;

            if !names.insert(phase.name.as_str()) {
                return Err(invalid(format!("duplicate phase name '{}'", phase.name)));
            }
            if phase.agents.is_empty() {
                return Err(invalid(format!("phase '{}' has no agents", phase.name)));
            }
            if let Some(agent) = phase.agents.iter().find(|a| a.agent_id.trim().is_empty()) {
                return Err(invalid(format!(
                    "phase '{}' has an agent with an empty id (purpose: {})",
                    phase.name, agent.purpose
                )));
            }
            if planned.condition.is_some() && phase.phase_type != PhaseType::Conditional {
                return Err(invalid(format!(
                    "phase '{}' has a condition but is {}",
                    phase.name, phase.phase_type
                )));
            }
        }

        Ok(())
    }

    /// Phases with their conditions attached, plus options labelled with the plan name
    pub fn into_phases(self) -> (Vec<WorkflowPhase>, WorkflowOptions) {
        let phases = self
            .phases
            .into_iter()
            .map(|planned| match planned.condition {
                Some(condition) => planned
                    .phase
                    .with_condition(crate::orchestrator::PhaseCondition::new(move |ctx| {
                        condition.evaluate(ctx)
                    })),
                None => planned.phase,
            })
            .collect();

        let options = WorkflowOptions {
            workflow_name: self.name,
            ..self.options
        };

        (phases, options)
    }
}

fn invalid(message: impl Into<String>) -> OrchestratorError {
    OrchestratorError::InvalidPlan(message.into())
}
