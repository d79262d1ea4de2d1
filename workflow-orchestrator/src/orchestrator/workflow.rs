//! Multi-phase workflow driver
//!
//! Phases run strictly one after another in declaration order. Each phase is
//! gated (condition, then dependencies), dispatched to the executor matching
//! its type, and its results are merged into the context once it settles.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;
use workflow_orchestrator_sdk::{
    log_phase_complete, log_phase_failed, log_phase_skipped, log_phase_start,
    log_specialists_selected, log_workflow_complete, log_workflow_start, AgentExecutor,
};

use crate::{
    orchestrator::{
        findings::update_workflow_findings,
        gate::{evaluate_phase_gate, GateDecision},
        phases::dispatch_phase,
        specialists::{
            create_domain_specialist_phase, select_domain_specialists, DEFAULT_MAX_SPECIALISTS,
        },
        types::{
            MultiPhaseWorkflowResult, PhaseResult, PhaseType, WorkflowContext,
            WorkflowFindings, WorkflowPhase, WorkflowSummary,
        },
    },
    quality::calculate_run_metrics,
    registry::AgentRegistry,
};

pub const DEFAULT_WORKFLOW_NAME: &str = "multi-phase";

/// Caller options for a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowOptions {
    /// Label carried into the result and progress events
    pub workflow_name: String,
    /// Run a specialist phase after the declared phases when domains were found
    pub engage_specialists: bool,
    pub max_specialists: usize,
    /// Dependencies of the specialist phase
    ///
    /// None means every agent of the declared sequential phases.
    pub specialist_depends_on: Option<Vec<String>>,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            workflow_name: DEFAULT_WORKFLOW_NAME.to_string(),
            engage_specialists: false,
            max_specialists: DEFAULT_MAX_SPECIALISTS,
            specialist_depends_on: None,
        }
    }
}

/// Execute the declared phases and, optionally, a specialist phase
///
/// Never aborts: unmet dependencies, false conditions and executor failures
/// are all reported as phase outcomes, and a complete result is always
/// returned.
pub async fn execute_multi_phase_workflow(
    phases: &[WorkflowPhase],
    mut context: WorkflowContext,
    registry: &AgentRegistry,
    executor: &dyn AgentExecutor,
    options: &WorkflowOptions,
) -> MultiPhaseWorkflowResult {
    let start = Instant::now();
    let run_id = Uuid::new_v4();

    info!(%run_id, workflow = %options.workflow_name, phases = phases.len(), "starting workflow");
    log_workflow_start!(options.workflow_name, phases.len());

    let mut phase_results = run_phases(phases, 0, phases.len(), &mut context, executor).await;

    if options.engage_specialists && !context.findings.domains.is_empty() {
        let specialists =
            select_domain_specialists(&context.findings, registry, options.max_specialists);

        if specialists.is_empty() {
            debug!(domains = ?context.findings.domains, "no registered specialists for identified domains");
        } else {
            log_specialists_selected!(context.findings.domains, specialists);

            let depends_on = options
                .specialist_depends_on
                .clone()
                .unwrap_or_else(|| sequential_agent_ids(phases));
            let specialist_phase =
                create_domain_specialist_phase(&specialists, options.max_specialists, depends_on);

            let total = phases.len() + 1;
            let mut specialist_results = run_phases(
                std::slice::from_ref(&specialist_phase),
                phases.len(),
                total,
                &mut context,
                executor,
            )
            .await;
            phase_results.append(&mut specialist_results);
        }
    }

    let total_duration_ms = start.elapsed().as_millis() as u64;
    let summary = generate_workflow_summary(&phase_results, &context.findings, total_duration_ms);

    info!(
        %run_id,
        quality_score = summary.quality_score,
        successful = summary.successful_agents,
        failed = summary.failed_agents,
        "workflow finished"
    );
    log_workflow_complete!(options.workflow_name, summary.quality_score, total_duration_ms);

    MultiPhaseWorkflowResult {
        run_id,
        workflow: options.workflow_name.clone(),
        phases: phase_results,
        context,
        summary,
        timestamp: Utc::now(),
    }
}

/// Shared phase loop; `offset` shifts the 1-based phase numbers in events
async fn run_phases(
    phases: &[WorkflowPhase],
    offset: usize,
    total: usize,
    context: &mut WorkflowContext,
    executor: &dyn AgentExecutor,
) -> Vec<PhaseResult> {
    let mut results = Vec::with_capacity(phases.len());

    for (i, phase) in phases.iter().enumerate() {
        let number = offset + i + 1;

        match evaluate_phase_gate(phase, context) {
            GateDecision::Skip { reason } => {
                log_phase_skipped!(number, &phase.name, &reason);
                results.push(PhaseResult::skipped(phase, reason));
                continue;
            }
            GateDecision::Fail { reason } => {
                warn!(phase = %phase.name, %reason, "phase gated out");
                log_phase_failed!(number, &phase.name, &reason);
                results.push(PhaseResult::failed(phase, reason));
                continue;
            }
            GateDecision::Run => {}
        }

        log_phase_start!(number, &phase.name, phase.phase_type, total);
        let phase_start = Instant::now();

        match dispatch_phase(number, phase, context, executor).await {
            Ok(agent_results) => {
                let duration_ms = phase_start.elapsed().as_millis() as u64;
                context.record_results(&agent_results);

                let added = update_workflow_findings(&mut context.findings, &agent_results);
                if !added.is_empty() {
                    debug!(phase = %phase.name, domains = ?added, "new domains identified");
                }

                log_phase_complete!(number, &phase.name, duration_ms, agent_results.len());
                results.push(PhaseResult::completed(phase, agent_results, duration_ms));
            }
            Err(e) => {
                warn!(phase = %phase.name, error = %e, "phase dispatch failed");
                log_phase_failed!(number, &phase.name, e.to_string());
                results.push(PhaseResult::failed(phase, e.to_string()));
            }
        }
    }

    results
}

fn sequential_agent_ids(phases: &[WorkflowPhase]) -> Vec<String> {
    phases
        .iter()
        .filter(|p| p.phase_type == PhaseType::Sequential)
        .flat_map(|p| p.agent_ids())
        .collect()
}

/// Aggregate counts, quality score, insights and next steps for a run
pub fn generate_workflow_summary(
    phases: &[PhaseResult],
    findings: &WorkflowFindings,
    total_duration_ms: u64,
) -> WorkflowSummary {
    let total_agents: usize = phases.iter().map(|p| p.results.len()).sum();
    let successful_agents: usize = phases.iter().map(PhaseResult::successful_agents).sum();
    let failed_agents: usize = phases.iter().map(PhaseResult::failed_agents).sum();

    let metrics = calculate_run_metrics(phases, findings);

    let mut insights = Vec::new();
    if !findings.domains.is_empty() {
        insights.push(format!(
            "Identified {} domain(s): {}",
            findings.domains.len(),
            findings.domains.join(", ")
        ));
    }
    if successful_agents > 0 {
        insights.push(format!("Successfully executed {} agent(s)", successful_agents));
    }
    if failed_agents > 0 {
        insights.push(format!("{} agent(s) encountered errors", failed_agents));
    }

    let mut next_steps = Vec::new();
    if findings.needs_deep_analysis {
        next_steps.push("Consider engaging domain specialists for deeper analysis".to_string());
    }
    if findings.has_domain("security") {
        next_steps.push("Review security findings and implement recommendations".to_string());
    }
    if metrics.overall_score < 70 {
        next_steps.push("Re-run workflow with adjusted parameters for better coverage".to_string());
    }
    next_steps.push("Use findings to create implementation plan with /plan command".to_string());

    WorkflowSummary {
        total_agents,
        successful_agents,
        failed_agents,
        total_duration_ms,
        quality_score: metrics.overall_score,
        confidence: metrics.confidence,
        insights,
        next_steps,
    }
}
