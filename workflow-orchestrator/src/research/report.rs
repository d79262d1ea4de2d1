//! Research report generation and markdown rendering

use crate::{
    orchestrator::{MultiPhaseWorkflowResult, PhaseStatus, SPECIALIST_PHASE_NAME},
    research::{
        types::{Priority, Recommendation, RecommendationCategory, ResearchReport, ResearchSummary},
        workflow::EXTERNAL_RESEARCH_PHASE,
    },
};

const MAX_KEY_FINDINGS: usize = 5;

pub fn generate_research_report(objective: &str, result: &MultiPhaseWorkflowResult) -> ResearchReport {
    let summary = ResearchSummary {
        objective: objective.to_string(),
        key_findings: extract_key_findings(result),
        domains_identified: result.context.findings.domains.clone(),
        confidence: result.summary.confidence,
        timestamp: result.timestamp,
    };

    let external_research_completed = result
        .phase(EXTERNAL_RESEARCH_PHASE)
        .is_some_and(|p| p.status == PhaseStatus::Completed);

    let specialists = result
        .phase(SPECIALIST_PHASE_NAME)
        .filter(|p| p.status == PhaseStatus::Completed)
        .map(|p| p.results.iter().map(|r| r.agent_id.clone()).collect())
        .unwrap_or_default();

    ResearchReport {
        summary,
        quality_score: result.summary.quality_score,
        external_research_completed,
        specialists,
        recommendations: generate_recommendations(result),
        confidence: result.summary.confidence,
        next_steps: result.summary.next_steps.clone(),
    }
}

fn extract_key_findings(result: &MultiPhaseWorkflowResult) -> Vec<String> {
    let mut findings = result.summary.insights.clone();

    if result.summary.successful_agents > 0 {
        findings.push(format!(
            "Successfully analyzed codebase with {} specialized agent(s)",
            result.summary.successful_agents
        ));
    }

    findings.truncate(MAX_KEY_FINDINGS);
    findings
}

fn generate_recommendations(result: &MultiPhaseWorkflowResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if result.summary.quality_score < 70 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Immediate,
            priority: Priority::High,
            action: "Re-run research with more specific query".to_string(),
            rationale: "Quality score indicates incomplete analysis".to_string(),
            risks: Vec::new(),
        });
    }

    if result.context.findings.has_domain("security") {
        recommendations.push(Recommendation {
            category: RecommendationCategory::ShortTerm,
            priority: Priority::High,
            action: "Conduct security audit".to_string(),
            rationale: "Security concerns identified during research".to_string(),
            risks: vec![
                "Potential vulnerabilities".to_string(),
                "Compliance issues".to_string(),
            ],
        });
    }

    recommendations.push(Recommendation {
        category: RecommendationCategory::ShortTerm,
        priority: Priority::Medium,
        action: "Create implementation plan using /plan command".to_string(),
        rationale: "Research provides sufficient context for planning".to_string(),
        risks: Vec::new(),
    });

    recommendations
}

/// Render a report as markdown
pub fn format_research_report(report: &ResearchReport) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push("# Research Report\n".to_string());

    sections.push("## Summary\n".to_string());
    sections.push(format!("**Objective**: {}\n", report.summary.objective));
    sections.push(format!("**Confidence Level**: {}\n", report.confidence));
    sections.push(format!("**Quality Score**: {}/100\n", report.quality_score));
    sections.push(format!("**Timestamp**: {}\n", report.summary.timestamp.to_rfc3339()));

    sections.push("### Key Findings\n".to_string());
    for finding in &report.summary.key_findings {
        sections.push(format!("- {}", finding));
    }
    sections.push(String::new());

    if !report.summary.domains_identified.is_empty() {
        sections.push("### Domains Identified\n".to_string());
        sections.push(format!("{}\n", report.summary.domains_identified.join(", ")));
    }

    if !report.specialists.is_empty() {
        sections.push("## Domain Specialists\n".to_string());
        for specialist in &report.specialists {
            sections.push(format!("- {}", specialist));
        }
        sections.push(String::new());
    }

    if report.external_research_completed {
        sections.push("## External Research\n".to_string());
        sections.push("External research phase completed.\n".to_string());
    }

    sections.push("## Recommendations\n".to_string());
    for (category, heading) in [
        (RecommendationCategory::Immediate, "Immediate Actions"),
        (RecommendationCategory::ShortTerm, "Short-term Actions"),
        (RecommendationCategory::LongTerm, "Long-term Actions"),
    ] {
        let recs: Vec<&Recommendation> = report
            .recommendations
            .iter()
            .filter(|r| r.category == category)
            .collect();
        if recs.is_empty() {
            continue;
        }

        sections.push(format!("### {}\n", heading));
        for rec in recs {
            sections.push(format!("- **{}** (Priority: {})", rec.action, rec.priority));
            sections.push(format!("  - {}", rec.rationale));
            if !rec.risks.is_empty() {
                sections.push(format!("  - Risks: {}", rec.risks.join(", ")));
            }
        }
        sections.push(String::new());
    }

    sections.push("## Next Steps\n".to_string());
    for step in &report.next_steps {
        sections.push(format!("- {}", step));
    }
    sections.push(String::new());

    sections.join("\n")
}
