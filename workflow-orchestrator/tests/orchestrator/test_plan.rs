//! YAML plans driven end to end

use super::common::*;
use std::io::Write;
use workflow_orchestrator::config::WorkflowPlan;
use workflow_orchestrator::orchestrator::{
    execute_multi_phase_workflow, PhaseStatus, WorkflowContext, SPECIALIST_PHASE_NAME,
};

const PLAN: &str = r#"
name: storage-review
description: Review the storage layer
phases:
  - name: Discovery
    type: parallel
    agents:
      - name: database-locator
        purpose: Find storage code
      - name: codebase-locator
        purpose: Find entry points
  - name: Analysis
    type: sequential
    depends_on: [database-locator, codebase-locator]
    timeout: 10 minutes
    agents:
      - agent_id: codebase-analyzer
        purpose: Trace the write path
        depends_on: [database-locator]
  - name: Performance Review
    type: conditional
    condition:
      kind: domain_identified
      domain: performance
    agents:
      - name: performance-engineer
        purpose: Profile hot paths
options:
  engage_specialists: true
  max_specialists: 2
"#;

fn write_plan(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_plan_file_runs_through_driver() {
    let file = write_plan(PLAN);
    let (phases, options) = WorkflowPlan::from_yaml_file(file.path()).unwrap().into_phases();

    let executor = StubExecutor::new();
    let registry = registry_with(&["database-expert", "database-optimizer", "database-admin"]);

    let result = execute_multi_phase_workflow(
        &phases,
        WorkflowContext::new("Where are writes buffered?", None, None),
        &registry,
        &executor,
        &options,
    )
    .await;

    assert_eq!(result.workflow, "storage-review");

    let statuses: Vec<(&str, PhaseStatus)> = result
        .phases
        .iter()
        .map(|p| (p.phase_name.as_str(), p.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("Discovery", PhaseStatus::Completed),
            ("Analysis", PhaseStatus::Completed),
            ("Performance Review", PhaseStatus::Skipped),
            (SPECIALIST_PHASE_NAME, PhaseStatus::Completed),
        ]
    );

    let specialists: Vec<&str> = result.phases[3]
        .results
        .iter()
        .map(|r| r.agent_id.as_str())
        .collect();
    assert_eq!(specialists, vec!["database-expert", "database-optimizer"]);

    let task = executor.task_for("codebase-analyzer").unwrap();
    assert!(task.contains("**Time Budget**: 10 minutes"));
    assert!(task.contains("- database-locator: database-locator completed successfully"));
}

#[tokio::test]
async fn test_plan_condition_met_runs_phase() {
    let plan = PLAN.replace("database-locator", "performance-locator");
    let (phases, mut options) = WorkflowPlan::from_yaml_str(&plan).unwrap().into_phases();
    options.engage_specialists = false;

    let result = execute_multi_phase_workflow(
        &phases,
        WorkflowContext::new("q", None, None),
        &registry_with(&[]),
        &StubExecutor::new(),
        &options,
    )
    .await;

    assert_eq!(result.phases.len(), 3);
    assert_eq!(result.phases[2].status, PhaseStatus::Completed);
    assert_eq!(result.context.findings.domains, vec!["performance"]);
}
