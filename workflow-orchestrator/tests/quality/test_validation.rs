//! Validation results for complete runs

use super::common::*;
use workflow_orchestrator::orchestrator::{Confidence, PhaseResult, PhaseType};
use workflow_orchestrator::quality::{
    format_validation_result, validate_workflow_quality, GateSeverity, IssueKind,
};

#[test]
fn test_clean_run_only_warns_about_coverage() {
    let result = run_with(
        vec![PhaseResult::completed(
            &phase("Discovery", PhaseType::Parallel),
            vec![ready("alpha"), ready("beta")],
            5,
        )],
        &[],
    );

    let validation = validate_workflow_quality(&result);

    assert!(validation.valid);
    assert_eq!(validation.metrics.overall_score, 84);
    assert_eq!(validation.error_count(), 0);
    assert_eq!(validation.warning_count(), 1);
    assert_eq!(validation.issues[0].message, "Quality gate warning: Coverage (20/60)");
    assert_eq!(
        validation.issues[0].suggestion.as_deref(),
        Some("Consider improving coverage")
    );
    assert_eq!(
        validation.recommendations,
        vec!["Enhance coverage by including more specialized agents or additional research phases"]
    );
}

#[test]
fn test_failed_agent_and_skipped_phase() {
    let result = run_with(
        vec![
            PhaseResult::completed(
                &phase("Discovery", PhaseType::Parallel),
                vec![ready("a"), failed("b", "timed out")],
                5,
            ),
            PhaseResult::skipped(&phase("Deep Dive", PhaseType::Conditional), "Condition not met"),
        ],
        &[],
    );

    let validation = validate_workflow_quality(&result);
    let metrics = &validation.metrics;

    assert_eq!(
        (metrics.completeness, metrics.accuracy, metrics.coverage, metrics.consistency),
        (50, 40, 20, 98)
    );
    assert_eq!(metrics.overall_score, 51);
    assert_eq!(metrics.confidence, Confidence::Medium);
    assert!(!validation.valid);

    let messages: Vec<(IssueKind, &str)> = validation
        .issues
        .iter()
        .map(|i| (i.kind, i.message.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            (IssueKind::Error, "Quality gate failed: Completeness (50/70)"),
            (IssueKind::Warning, "Quality gate warning: Accuracy (40/75)"),
            (IssueKind::Warning, "Quality gate warning: Coverage (20/60)"),
            (IssueKind::Error, "Quality gate failed: Overall Quality (51/70)"),
            (IssueKind::Error, "Agent b failed: timed out"),
            (IssueKind::Info, "1 phase(s) were skipped"),
        ]
    );

    let agent_issue = &validation.issues[4];
    assert_eq!(agent_issue.category, "agent-execution");
    assert_eq!(agent_issue.agent_id.as_deref(), Some("b"));

    assert_eq!(validation.recommendations.len(), 5);
    assert!(validation
        .recommendations
        .contains(&"Resolve 3 error(s) to improve overall quality".to_string()));
    assert!(!validation
        .recommendations
        .contains(&"Address warnings to enhance workflow reliability".to_string()));
}

#[test]
fn test_gate_severity_reported_per_outcome() {
    let result = run_with(
        vec![PhaseResult::completed(
            &phase("Discovery", PhaseType::Parallel),
            vec![ready("alpha"), ready("beta")],
            5,
        )],
        &[],
    );

    let validation = validate_workflow_quality(&result);
    for gate in &validation.metrics.gates {
        if gate.passed {
            assert_eq!(gate.severity, GateSeverity::Info, "{}", gate.name);
        } else {
            assert_eq!(gate.name, "Coverage");
            assert_eq!(gate.severity, GateSeverity::Warning);
        }
    }
}

#[test]
fn test_empty_run_is_invalid() {
    let validation = validate_workflow_quality(&run_with(vec![], &[]));

    assert_eq!(validation.metrics.completeness, 0);
    assert_eq!(validation.metrics.accuracy, 0);
    assert_eq!(validation.metrics.consistency, 100);
    assert_eq!(validation.metrics.overall_score, 20);
    assert_eq!(validation.metrics.confidence, Confidence::Low);
    assert!(!validation.valid);
}

#[test]
fn test_dependency_failures_lower_consistency() {
    let gated = phase("Analysis", PhaseType::Sequential);
    let result = run_with(
        vec![
            PhaseResult::completed(&phase("Discovery", PhaseType::Parallel), vec![ready("a")], 1),
            PhaseResult::failed(&gated, "Dependencies not resolved: x"),
            PhaseResult::failed(&gated, "Dependencies not resolved: y"),
        ],
        &[],
    );

    let validation = validate_workflow_quality(&result);
    assert_eq!(validation.metrics.consistency, 60);
    assert!(validation
        .issues
        .iter()
        .any(|i| i.message == "Quality gate warning: Consistency (60/70)"));
}

#[test]
fn test_formatted_validation_reports_status() {
    let validation = validate_workflow_quality(&run_with(vec![], &["security"]));
    let text = format_validation_result(&validation);

    assert!(text.contains("**Status**: ❌ INVALID"));
    assert!(text.contains("### Recommendations"));
    assert!(text.contains("[quality-gate] Quality gate failed: Completeness (0/70)"));
}

#[test]
fn test_validation_serializes_issue_kind_as_type() {
    let result = run_with(
        vec![PhaseResult::completed(
            &phase("Discovery", PhaseType::Parallel),
            vec![failed("scanner", "boom")],
            1,
        )],
        &[],
    );
    let json = serde_json::to_value(validate_workflow_quality(&result)).unwrap();

    let agent_issue = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["category"] == "agent-execution")
        .unwrap();
    assert_eq!(agent_issue["type"], "error");
    assert_eq!(agent_issue["agent_id"], "scanner");
}
