//! Quality metric calculation and gate evaluation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::orchestrator::types::{
    Confidence, MultiPhaseWorkflowResult, PhaseResult, PhaseStatus, PhaseType, WorkflowFindings,
};

pub const COMPLETENESS_THRESHOLD: u32 = 70;
pub const ACCURACY_THRESHOLD: u32 = 75;
pub const COVERAGE_THRESHOLD: u32 = 60;
pub const CONSISTENCY_THRESHOLD: u32 = 70;
pub const OVERALL_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityGate {
    pub name: String,
    pub passed: bool,
    pub score: u32,
    pub threshold: u32,
    pub message: String,
    pub severity: GateSeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub completeness: u32,
    pub accuracy: u32,
    pub coverage: u32,
    pub consistency: u32,
    pub overall_score: u32,
    pub confidence: Confidence,
    pub gates: Vec<QualityGate>,
}

/// Counts over a run's phase results that the metrics are derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total_phases: usize,
    pub completed_phases: usize,
    pub completed_sequential_phases: usize,
    pub total_agents: usize,
    pub successful_agents: usize,
    pub failed_agents: usize,
    pub unique_agents: usize,
}

impl RunStats {
    pub fn from_phases(phases: &[PhaseResult]) -> Self {
        let mut stats = RunStats {
            total_phases: phases.len(),
            ..Default::default()
        };
        let mut unique: HashSet<&str> = HashSet::new();

        for phase in phases {
            if phase.status == PhaseStatus::Completed {
                stats.completed_phases += 1;
                if phase.phase_type == PhaseType::Sequential {
                    stats.completed_sequential_phases += 1;
                }
            }
            stats.total_agents += phase.results.len();
            stats.successful_agents += phase.successful_agents();
            stats.failed_agents += phase.failed_agents();
            unique.extend(phase.results.iter().map(|r| r.agent_id.as_str()));
        }

        stats.unique_agents = unique.len();
        stats
    }
}

/// Calculate all metrics and gates for a finished run
pub fn calculate_quality_metrics(result: &MultiPhaseWorkflowResult) -> QualityMetrics {
    calculate_run_metrics(&result.phases, &result.context.findings)
}

/// Calculate metrics from phase results and the findings they produced
pub fn calculate_run_metrics(phases: &[PhaseResult], findings: &WorkflowFindings) -> QualityMetrics {
    let stats = RunStats::from_phases(phases);

    let completeness = calculate_completeness(&stats);
    let accuracy = calculate_accuracy(&stats);
    let coverage = calculate_coverage(&stats, findings);
    let consistency = calculate_consistency(phases);

    let overall_score = round_score(
        completeness as f64 * 0.3
            + accuracy as f64 * 0.3
            + coverage as f64 * 0.2
            + consistency as f64 * 0.2,
    );

    let mut metrics = QualityMetrics {
        completeness,
        accuracy,
        coverage,
        consistency,
        overall_score,
        confidence: Confidence::from_score(overall_score),
        gates: Vec::new(),
    };
    metrics.gates = evaluate_quality_gates(&metrics);
    metrics
}

/// Weighted phase completion (60%) and agent success (40%)
pub fn calculate_completeness(stats: &RunStats) -> u32 {
    if stats.total_phases == 0 || stats.total_agents == 0 {
        return 0;
    }

    let phase_completion = ratio(stats.completed_phases, stats.total_phases) * 100.0;
    let agent_completion = ratio(stats.successful_agents, stats.total_agents) * 100.0;

    round_score(phase_completion * 0.6 + agent_completion * 0.4)
}

/// Success rate with a 20-point penalty scaled by the failure rate
pub fn calculate_accuracy(stats: &RunStats) -> u32 {
    if stats.total_agents == 0 {
        return 0;
    }

    let success_rate = ratio(stats.successful_agents, stats.total_agents) * 100.0;
    let failure_penalty = ratio(stats.failed_agents, stats.total_agents) * 20.0;

    round_score(success_rate - failure_penalty)
}

/// Domains (max 50), agent variety (max 30) and sequential depth (max 20)
pub fn calculate_coverage(stats: &RunStats, findings: &WorkflowFindings) -> u32 {
    let domain_score = (findings.domains.len() * 20).min(50);
    let variety_score = (stats.unique_agents * 10).min(30);
    let depth_score = (stats.completed_sequential_phases * 10).min(20);

    ((domain_score + variety_score + depth_score) as u32).min(100)
}

/// Penalizes failed-before-running phases and uneven success across phases
///
/// A phase without results counts as a perfect 1.0 success ratio.
pub fn calculate_consistency(phases: &[PhaseResult]) -> u32 {
    let failed_dependencies = phases
        .iter()
        .filter(|p| p.status == PhaseStatus::Failed && p.results.is_empty())
        .count() as i64;

    let success_ratios: Vec<f64> = phases
        .iter()
        .map(|phase| {
            if phase.results.is_empty() {
                1.0
            } else {
                ratio(phase.successful_agents(), phase.results.len())
            }
        })
        .collect();

    let variance_penalty = (variance(&success_ratios) * 30.0).round() as i64;
    let score = 100 - failed_dependencies * 20 - variance_penalty;

    score.max(0) as u32
}

/// Population variance; 0 for an empty slice
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

struct GateSpec {
    name: &'static str,
    threshold: u32,
    failure_severity: GateSeverity,
    passed_message: &'static str,
    failed_message: &'static str,
    score: fn(&QualityMetrics) -> u32,
}

const GATES: &[GateSpec] = &[
    GateSpec {
        name: "Completeness",
        threshold: COMPLETENESS_THRESHOLD,
        failure_severity: GateSeverity::Critical,
        passed_message: "Workflow achieved sufficient completeness",
        failed_message: "Workflow completeness below threshold",
        score: |m| m.completeness,
    },
    GateSpec {
        name: "Accuracy",
        threshold: ACCURACY_THRESHOLD,
        failure_severity: GateSeverity::Warning,
        passed_message: "Agent execution accuracy is acceptable",
        failed_message: "High agent failure rate detected",
        score: |m| m.accuracy,
    },
    GateSpec {
        name: "Coverage",
        threshold: COVERAGE_THRESHOLD,
        failure_severity: GateSeverity::Warning,
        passed_message: "Analysis coverage is sufficient",
        failed_message: "Limited analysis coverage",
        score: |m| m.coverage,
    },
    GateSpec {
        name: "Consistency",
        threshold: CONSISTENCY_THRESHOLD,
        failure_severity: GateSeverity::Warning,
        passed_message: "Results are consistent across phases",
        failed_message: "Inconsistencies detected in results",
        score: |m| m.consistency,
    },
    GateSpec {
        name: "Overall Quality",
        threshold: OVERALL_THRESHOLD,
        failure_severity: GateSeverity::Critical,
        passed_message: "Workflow meets quality standards",
        failed_message: "Workflow quality below acceptable threshold",
        score: |m| m.overall_score,
    },
];

/// Evaluate the five fixed gates in order
///
/// A passing gate reports `Info`; a failing gate reports its fixed severity.
pub fn evaluate_quality_gates(metrics: &QualityMetrics) -> Vec<QualityGate> {
    GATES
        .iter()
        .map(|gate| {
            let score = (gate.score)(metrics);
            let passed = score >= gate.threshold;
            QualityGate {
                name: gate.name.to_string(),
                passed,
                score,
                threshold: gate.threshold,
                message: if passed {
                    gate.passed_message
                } else {
                    gate.failed_message
                }
                .to_string(),
                severity: if passed {
                    GateSeverity::Info
                } else {
                    gate.failure_severity
                },
            }
        })
        .collect()
}

fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

fn round_score(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
