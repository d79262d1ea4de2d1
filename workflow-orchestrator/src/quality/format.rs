//! Human-readable rendering of quality results

use crate::quality::{
    metrics::{GateSeverity, QualityMetrics},
    validation::{IssueKind, ValidationResult},
};

fn severity_icon(severity: GateSeverity) -> &'static str {
    match severity {
        GateSeverity::Critical => "🔴",
        GateSeverity::Warning => "🟡",
        GateSeverity::Info => "🔵",
    }
}

fn metrics_lines(metrics: &QualityMetrics) -> Vec<String> {
    let mut lines = vec![
        "## Quality Metrics".to_string(),
        String::new(),
        format!(
            "**Overall Score**: {}/100 ({} confidence)",
            metrics.overall_score,
            metrics.confidence.as_str().to_uppercase()
        ),
        String::new(),
        format!("- Completeness: {}/100", metrics.completeness),
        format!("- Accuracy: {}/100", metrics.accuracy),
        format!("- Coverage: {}/100", metrics.coverage),
        format!("- Consistency: {}/100", metrics.consistency),
        String::new(),
        "### Quality Gates".to_string(),
    ];

    for gate in &metrics.gates {
        lines.push(format!(
            "{} {} {}: {}/{} - {}",
            if gate.passed { "✅" } else { "❌" },
            severity_icon(gate.severity),
            gate.name,
            gate.score,
            gate.threshold,
            gate.message
        ));
    }

    lines
}

pub fn format_quality_metrics(metrics: &QualityMetrics) -> String {
    metrics_lines(metrics).join("\n")
}

pub fn format_validation_result(validation: &ValidationResult) -> String {
    let mut lines = metrics_lines(&validation.metrics);

    lines.push(String::new());
    lines.push(format!(
        "**Status**: {}",
        if validation.valid { "✅ VALID" } else { "❌ INVALID" }
    ));

    if !validation.issues.is_empty() {
        lines.push(String::new());
        lines.push(format!("### Issues ({})", validation.issues.len()));
        for issue in &validation.issues {
            let icon = match issue.kind {
                IssueKind::Error => "🔴",
                IssueKind::Warning => "🟡",
                IssueKind::Info => "🔵",
            };
            lines.push(format!("{} [{}] {}", icon, issue.category, issue.message));
            if let Some(suggestion) = &issue.suggestion {
                lines.push(format!("   💡 {}", suggestion));
            }
        }
    }

    if !validation.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("### Recommendations".to_string());
        for (i, rec) in validation.recommendations.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, rec));
        }
    }

    lines.join("\n")
}
