//! Research workflow against the simulated executor

use std::sync::Arc;
use workflow_orchestrator::orchestrator::{Confidence, PhaseStatus};
use workflow_orchestrator::registry::{AgentDefinition, AgentRegistry};
use workflow_orchestrator::research::{
    format_research_report, run_research_workflow, ResearchWorkflowOptions,
};
use workflow_orchestrator::workflow_utils::SimulatedExecutor;

fn executor(registry: &Arc<AgentRegistry>) -> SimulatedExecutor {
    SimulatedExecutor::new(registry.clone()).with_max_concurrency(2)
}

#[tokio::test]
async fn test_builtin_research_run() {
    let registry = Arc::new(AgentRegistry::builtin());
    let options = ResearchWorkflowOptions::new("How is configuration loaded?");

    let outcome = run_research_workflow(&options, &registry, &executor(&registry)).await;

    let statuses: Vec<PhaseStatus> = outcome.workflow.phases.iter().map(|p| p.status).collect();
    assert_eq!(statuses, vec![PhaseStatus::Completed, PhaseStatus::Completed]);

    let metrics = &outcome.validation.metrics;
    assert_eq!(metrics.coverage, 40);
    assert_eq!(metrics.overall_score, 88);
    assert!(outcome.validation.valid);

    let report = &outcome.report;
    assert_eq!(report.summary.objective, "How is configuration loaded?");
    assert_eq!(report.confidence, Confidence::High);
    assert_eq!(report.quality_score, 88);
    assert_eq!(
        report.summary.key_findings,
        vec![
            "Successfully executed 4 agent(s)",
            "Successfully analyzed codebase with 4 specialized agent(s)",
        ]
    );
    assert!(report.specialists.is_empty());
    assert!(!report.external_research_completed);
    assert_eq!(report.recommendations.len(), 1);
}

#[tokio::test]
async fn test_analysis_prompts_include_locator_summaries() {
    let registry = Arc::new(AgentRegistry::builtin());
    let mut options = ResearchWorkflowOptions::new("Trace request handling");
    options.domain = Some("api".to_string());

    let outcome = run_research_workflow(&options, &registry, &executor(&registry)).await;

    let analyzer = outcome.workflow.context.latest_result("codebase-analyzer").unwrap();
    assert!(analyzer.task.contains("**Domain**: api"));
    assert!(analyzer
        .task
        .contains("- codebase-locator: Codebase Locator completed successfully"));
    assert!(analyzer.prompt.starts_with("# Codebase Analyzer\n"));
    assert!(analyzer.prompt.contains("## Current Task\n**Purpose**: Understand implementation details"));
}

#[tokio::test]
async fn test_external_research_phase() {
    let registry = Arc::new(AgentRegistry::builtin());
    let mut options = ResearchWorkflowOptions::new("q");
    options.include_external_research = true;

    let outcome = run_research_workflow(&options, &registry, &executor(&registry)).await;

    assert_eq!(outcome.workflow.phases.len(), 3);
    assert!(outcome.report.external_research_completed);
    assert!(format_research_report(&outcome.report).contains("## External Research"));
}

#[tokio::test]
async fn test_missing_locator_blocks_analysis() {
    let builtin = AgentRegistry::builtin();
    let registry: Arc<AgentRegistry> = Arc::new(
        builtin
            .ids()
            .iter()
            .filter(|id| *id != "thoughts-locator")
            .filter_map(|id| builtin.get(id).cloned())
            .collect(),
    );
    let options = ResearchWorkflowOptions::new("q");

    let outcome = run_research_workflow(&options, &registry, &executor(&registry)).await;

    let discovery = &outcome.workflow.phases[0];
    assert_eq!(discovery.status, PhaseStatus::Completed);
    assert_eq!(
        discovery.results[1].error.as_deref(),
        Some("Agent thoughts-locator not found in registry")
    );

    let analysis = &outcome.workflow.phases[1];
    assert_eq!(analysis.status, PhaseStatus::Failed);
    assert_eq!(
        analysis.reason.as_deref(),
        Some("Dependencies not resolved: thoughts-locator")
    );
    assert_eq!(outcome.validation.metrics.overall_score, 47);
    assert!(!outcome.validation.valid);
    assert!(outcome
        .report
        .recommendations
        .iter()
        .any(|r| r.action == "Re-run research with more specific query"));
}

#[tokio::test]
async fn test_specialists_require_identified_domains() {
    let mut registry = AgentRegistry::builtin();
    registry.insert(AgentDefinition::new(
        "security-scanner",
        "Security Scanner",
        "Scans for vulnerabilities",
    ));
    let registry = Arc::new(registry);
    let mut options = ResearchWorkflowOptions::new("q");
    options.engage_specialists = true;

    let outcome = run_research_workflow(&options, &registry, &executor(&registry)).await;

    assert!(outcome.workflow.context.findings.domains.is_empty());
    assert_eq!(outcome.workflow.phases.len(), 2);
    assert!(outcome.report.specialists.is_empty());
}

#[test]
fn test_report_serializes_categories_in_kebab_case() {
    let outcome = tokio_test::block_on(async {
        let registry = Arc::new(AgentRegistry::builtin());
        run_research_workflow(&ResearchWorkflowOptions::new("q"), &registry, &executor(&registry))
            .await
    });

    let json = serde_json::to_value(&outcome.report).unwrap();
    assert_eq!(json["recommendations"][0]["category"], "short-term");
    assert_eq!(json["recommendations"][0]["priority"], "medium");
    assert_eq!(json["confidence"], "high");
}
