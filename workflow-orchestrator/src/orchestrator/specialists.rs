//! Domain specialist selection

use crate::{
    orchestrator::types::{AgentSpec, PhaseType, WorkflowFindings, WorkflowPhase},
    registry::AgentRegistry,
};

pub const DEFAULT_MAX_SPECIALISTS: usize = 5;

pub const SPECIALIST_PHASE_NAME: &str = "Domain Specialist Analysis";

const SPECIALIST_TIMEOUT: &str = "8 minutes";

/// Candidate specialist ids per domain, in preference order
pub const DOMAIN_SPECIALISTS: &[(&str, &[&str])] = &[
    (
        "security",
        &[
            "security-scanner",
            "security-auditor",
            "frontend-security-coder",
            "backend-security-coder",
        ],
    ),
    (
        "performance",
        &[
            "performance-engineer",
            "quality-testing-performance-tester",
            "database-optimizer",
        ],
    ),
    (
        "database",
        &["database-expert", "database-optimizer", "database-admin"],
    ),
    ("api", &["api-builder", "graphql-architect", "api-documenter"]),
    (
        "infrastructure",
        &[
            "infrastructure-builder",
            "devops-operations-specialist",
            "cloud-architect",
        ],
    ),
    (
        "frontend",
        &["frontend-developer", "ui-ux-designer", "accessibility-pro"],
    ),
    (
        "testing",
        &[
            "test-automator",
            "test-generator",
            "quality-testing-performance-tester",
        ],
    ),
];

/// Candidates for one domain; unknown domains have none
pub fn specialists_for_domain(domain: &str) -> &'static [&'static str] {
    DOMAIN_SPECIALISTS
        .iter()
        .find(|(name, _)| *name == domain)
        .map(|(_, ids)| *ids)
        .unwrap_or(&[])
}

/// Pick registered specialists for the identified domains
///
/// Candidates keep first-seen order across domains, appear once, and are
/// truncated to `max_specialists`.
pub fn select_domain_specialists(
    findings: &WorkflowFindings,
    registry: &AgentRegistry,
    max_specialists: usize,
) -> Vec<String> {
    let mut specialists: Vec<String> = Vec::new();

    for domain in &findings.domains {
        for id in specialists_for_domain(domain) {
            if registry.has(id) && !specialists.iter().any(|s| s == id) {
                specialists.push(id.to_string());
            }
        }
    }

    specialists.truncate(max_specialists);
    specialists
}

/// Synthesize the conditional phase that runs the selected specialists
pub fn create_domain_specialist_phase(
    specialists: &[String],
    max_specialists: usize,
    depends_on: Vec<String>,
) -> WorkflowPhase {
    let agents = specialists
        .iter()
        .take(max_specialists)
        .map(|id| {
            AgentSpec::new(
                id.clone(),
                format!("Provide specialized analysis in {} domain", id.replace('-', " ")),
            )
            .with_timeout(SPECIALIST_TIMEOUT)
        })
        .collect();

    WorkflowPhase::new(SPECIALIST_PHASE_NAME, PhaseType::Conditional, agents).depends_on(depends_on)
}
