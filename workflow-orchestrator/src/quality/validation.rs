//! Validation of a finished run against the quality gates

use serde::{Deserialize, Serialize};

use crate::{
    orchestrator::types::{MultiPhaseWorkflowResult, PhaseStatus},
    quality::metrics::{
        calculate_quality_metrics, GateSeverity, QualityMetrics, ACCURACY_THRESHOLD,
        COMPLETENESS_THRESHOLD, CONSISTENCY_THRESHOLD, COVERAGE_THRESHOLD,
    },
};

/// Overall score a run needs to count as valid
pub const VALID_THRESHOLD: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    fn new(kind: IssueKind, category: &str, message: String, suggestion: impl Into<String>) -> Self {
        Self {
            kind,
            category: category.to_string(),
            message,
            agent_id: None,
            suggestion: Some(suggestion.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub metrics: QualityMetrics,
    pub issues: Vec<ValidationIssue>,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    pub fn error_count(&self) -> usize {
        self.count(IssueKind::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(IssueKind::Warning)
    }

    fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

/// Score a finished run and collect its issues and recommendations
pub fn validate_workflow_quality(result: &MultiPhaseWorkflowResult) -> ValidationResult {
    let metrics = calculate_quality_metrics(result);
    let issues = identify_validation_issues(result, &metrics);
    let recommendations = generate_quality_recommendations(&metrics, &issues);

    ValidationResult {
        valid: metrics.overall_score >= VALID_THRESHOLD,
        metrics,
        issues,
        recommendations,
    }
}

/// Issues in order: failed gates, failed agents, skipped phases
pub fn identify_validation_issues(
    result: &MultiPhaseWorkflowResult,
    metrics: &QualityMetrics,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for gate in metrics.gates.iter().filter(|g| !g.passed) {
        let lower = gate.name.to_lowercase();
        match gate.severity {
            GateSeverity::Critical => issues.push(ValidationIssue::new(
                IssueKind::Error,
                "quality-gate",
                format!(
                    "Quality gate failed: {} ({}/{})",
                    gate.name, gate.score, gate.threshold
                ),
                format!("Improve {} by re-running workflow or adjusting parameters", lower),
            )),
            GateSeverity::Warning => issues.push(ValidationIssue::new(
                IssueKind::Warning,
                "quality-gate",
                format!(
                    "Quality gate warning: {} ({}/{})",
                    gate.name, gate.score, gate.threshold
                ),
                format!("Consider improving {}", lower),
            )),
            GateSeverity::Info => {}
        }
    }

    for phase in &result.phases {
        for agent in phase.results.iter().filter(|r| r.is_error()) {
            let mut issue = ValidationIssue::new(
                IssueKind::Error,
                "agent-execution",
                format!(
                    "Agent {} failed: {}",
                    agent.agent_id,
                    agent.error.as_deref().unwrap_or("unknown error")
                ),
                "Check agent configuration and availability",
            );
            issue.agent_id = Some(agent.agent_id.clone());
            issues.push(issue);
        }
    }

    let skipped = result
        .phases
        .iter()
        .filter(|p| p.status == PhaseStatus::Skipped)
        .count();
    if skipped > 0 {
        issues.push(ValidationIssue::new(
            IssueKind::Info,
            "workflow",
            format!("{} phase(s) were skipped", skipped),
            "Review conditional phase logic if this was unexpected",
        ));
    }

    issues
}

pub fn generate_quality_recommendations(
    metrics: &QualityMetrics,
    issues: &[ValidationIssue],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.completeness < COMPLETENESS_THRESHOLD {
        recommendations.push(
            "Increase workflow completeness by ensuring all phases execute successfully"
                .to_string(),
        );
    }
    if metrics.accuracy < ACCURACY_THRESHOLD {
        recommendations.push(
            "Improve agent accuracy by validating agent configurations and dependencies"
                .to_string(),
        );
    }
    if metrics.coverage < COVERAGE_THRESHOLD {
        recommendations.push(
            "Enhance coverage by including more specialized agents or additional research phases"
                .to_string(),
        );
    }
    if metrics.consistency < CONSISTENCY_THRESHOLD {
        recommendations.push(
            "Improve consistency by ensuring proper dependency resolution and uniform agent quality"
                .to_string(),
        );
    }

    let errors = issues.iter().filter(|i| i.kind == IssueKind::Error).count();
    let warnings = issues.iter().filter(|i| i.kind == IssueKind::Warning).count();

    if errors > 0 {
        recommendations.push(format!(
            "Resolve {} error(s) to improve overall quality",
            errors
        ));
    }
    if warnings > 2 {
        recommendations.push("Address warnings to enhance workflow reliability".to_string());
    }
    if metrics.overall_score < 80 {
        recommendations.push(
            "Consider re-running workflow with adjusted parameters or additional agents"
                .to_string(),
        );
    }

    recommendations
}
