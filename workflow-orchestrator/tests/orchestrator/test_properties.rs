//! Run-level properties: ordering, alignment, idempotence, monotonicity, determinism

use super::common::*;
use workflow_orchestrator::orchestrator::{
    execute_multi_phase_workflow, execute_phase_parallel, AgentSpec, PhaseResult, PhaseStatus,
    WorkflowContext, WorkflowFindings, WorkflowOptions, WorkflowPhase,
};
use workflow_orchestrator::quality::{calculate_quality_metrics, calculate_run_metrics};
use workflow_orchestrator::registry::AgentRegistry;
use workflow_orchestrator_sdk::AgentExecutionResult;

#[tokio::test]
async fn test_one_result_per_phase_in_declaration_order() {
    let executor = StubExecutor::new();
    // Declared out of dependency order on purpose: the driver must not reorder.
    let phases = vec![
        WorkflowPhase::sequential("Analysis", vec![AgentSpec::new("analyzer", "a")])
            .depends_on(["locator"]),
        WorkflowPhase::parallel("Discovery", vec![AgentSpec::new("locator", "l")]),
        WorkflowPhase::conditional("Never", vec![AgentSpec::new("x", "x")], |_| false),
        WorkflowPhase::optional("Extra", vec![AgentSpec::new("web", "w")]),
    ];

    let result = execute_multi_phase_workflow(
        &phases,
        WorkflowContext::new("q", None, None),
        &AgentRegistry::new(),
        &executor,
        &WorkflowOptions::default(),
    )
    .await;

    let names: Vec<&str> = result.phases.iter().map(|p| p.phase_name.as_str()).collect();
    assert_eq!(names, vec!["Analysis", "Discovery", "Never", "Extra"]);

    let statuses: Vec<PhaseStatus> = result.phases.iter().map(|p| p.status).collect();
    assert_eq!(
        statuses,
        vec![
            PhaseStatus::Failed,
            PhaseStatus::Completed,
            PhaseStatus::Skipped,
            PhaseStatus::Completed,
        ]
    );
}

#[tokio::test]
async fn test_parallel_results_index_aligned_under_latency() {
    let executor = LatencyExecutor::new(&[("slow", 60), ("fast", 0), ("medium", 20)]);
    let phase = WorkflowPhase::parallel(
        "Discovery",
        vec![
            AgentSpec::new("slow", "s"),
            AgentSpec::new("fast", "f"),
            AgentSpec::new("medium", "m"),
        ],
    );

    let results = execute_phase_parallel(1, &phase, &WorkflowContext::new("q", None, None), &executor)
        .await
        .unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.agent_id.as_str()).collect();
    assert_eq!(ids, vec!["slow", "fast", "medium"]);
    assert_eq!(executor.completion_order(), vec!["fast", "medium", "slow"]);
}

#[tokio::test]
async fn test_domain_aggregation_is_idempotent_across_phases() {
    let phases = vec![
        WorkflowPhase::parallel(
            "One",
            vec![
                AgentSpec::new("security-scanner", "a"),
                AgentSpec::new("database-security-review", "b"),
            ],
        ),
        WorkflowPhase::parallel("Two", vec![AgentSpec::new("security-auditor", "c")]),
    ];

    let result = execute_multi_phase_workflow(
        &phases,
        WorkflowContext::new("q", None, None),
        &AgentRegistry::new(),
        &StubExecutor::new(),
        &WorkflowOptions::default(),
    )
    .await;

    assert_eq!(result.context.findings.domains, vec!["security", "database"]);
}

#[test]
fn test_overall_score_monotone_in_successful_agents() {
    let phase = WorkflowPhase::parallel("p", vec![]);
    let baseline = PhaseResult::completed(&phase, vec![ready_result("anchor", "t")], 1);

    let mut previous = 0;
    for successes in 0..8 {
        let mut results: Vec<AgentExecutionResult> = (0..successes)
            .map(|i| ready_result(&format!("ok-{}", i), "t"))
            .collect();
        results.push(AgentExecutionResult::failed("bad-1", "bad", "t", "e"));
        results.push(AgentExecutionResult::failed("bad-2", "bad", "t", "e"));

        let phases = vec![baseline.clone(), PhaseResult::completed(&phase, results, 1)];
        let score = calculate_run_metrics(&phases, &WorkflowFindings::default()).overall_score;

        assert!(
            score >= previous,
            "score dropped from {} to {} at {} successes",
            previous,
            score,
            successes
        );
        previous = score;
    }
}

#[tokio::test]
async fn test_metrics_deterministic_across_runs() {
    let phases = vec![
        WorkflowPhase::parallel(
            "Discovery",
            vec![AgentSpec::new("performance-probe", "p"), AgentSpec::new("locator", "l")],
        ),
        WorkflowPhase::sequential("Analysis", vec![AgentSpec::new("analyzer", "a")])
            .depends_on(["locator"]),
    ];

    let mut scores = Vec::new();
    for _ in 0..3 {
        let executor = StubExecutor::new().failing(&["performance-probe"]);
        let result = execute_multi_phase_workflow(
            &phases,
            WorkflowContext::new("q", None, None),
            &AgentRegistry::new(),
            &executor,
            &WorkflowOptions::default(),
        )
        .await;
        scores.push(calculate_quality_metrics(&result));
    }

    assert_eq!(scores[0], scores[1]);
    assert_eq!(scores[1], scores[2]);
}
