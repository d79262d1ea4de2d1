//! Canned codebase research workflow
//!
//! Discovery (parallel locators), analysis (sequential analyzers that build
//! on the locators), optional external research, and finally domain
//! specialists when the run identified any domains.
//!
//! The primary entry point is [`run_research_workflow`].

use tracing::info;
use workflow_orchestrator_sdk::AgentExecutor;

use crate::{
    orchestrator::{
        execute_multi_phase_workflow, AgentSpec, MultiPhaseWorkflowResult, WorkflowContext,
        WorkflowOptions, WorkflowPhase, DEFAULT_MAX_SPECIALISTS,
    },
    quality::{validate_workflow_quality, ValidationResult},
    registry::AgentRegistry,
    research::{report::generate_research_report, types::ResearchReport},
};

pub const DISCOVERY_PHASE: &str = "Discovery Phase";
pub const ANALYSIS_PHASE: &str = "Analysis Phase";
pub const EXTERNAL_RESEARCH_PHASE: &str = "External Research";

const WORKFLOW_NAME: &str = "research";

/// Configuration for the research workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchWorkflowOptions {
    /// Research question put to every agent
    pub query: String,
    /// Domain hint, forwarded into task text
    pub domain: Option<String>,
    pub requirements: Option<String>,
    /// Add the web research phase
    pub include_external_research: bool,
    /// Run domain specialists after analysis
    pub engage_specialists: bool,
    pub max_specialists: usize,
}

impl ResearchWorkflowOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            domain: None,
            requirements: None,
            include_external_research: false,
            engage_specialists: false,
            max_specialists: DEFAULT_MAX_SPECIALISTS,
        }
    }
}

/// Everything a research run produces
#[derive(Debug, Clone)]
pub struct ResearchOutcome {
    pub workflow: MultiPhaseWorkflowResult,
    pub report: ResearchReport,
    pub validation: ValidationResult,
}

/// Phase plan for the research workflow
pub fn research_phases(options: &ResearchWorkflowOptions) -> Vec<WorkflowPhase> {
    let mut phases = vec![
        WorkflowPhase::parallel(
            DISCOVERY_PHASE,
            vec![
                AgentSpec::new("codebase-locator", "Find relevant files and components")
                    .with_timeout("5 minutes"),
                AgentSpec::new("thoughts-locator", "Discover existing documentation")
                    .with_timeout("3 minutes"),
            ],
        ),
        WorkflowPhase::sequential(
            ANALYSIS_PHASE,
            vec![
                AgentSpec::new("codebase-analyzer", "Understand implementation details")
                    .depends_on(["codebase-locator"])
                    .with_timeout("8 minutes"),
                AgentSpec::new("thoughts-analyzer", "Extract insights from documentation")
                    .depends_on(["thoughts-locator"])
                    .with_timeout("5 minutes"),
            ],
        )
        .depends_on(["codebase-locator", "thoughts-locator"]),
    ];

    if options.include_external_research {
        phases.push(WorkflowPhase::optional(
            EXTERNAL_RESEARCH_PHASE,
            vec![AgentSpec::new(
                "web-search-researcher",
                "Gather external context and best practices",
            )
            .with_timeout("10 minutes")],
        ));
    }

    phases
}

/// Run the research workflow, then build its report and quality validation
pub async fn run_research_workflow(
    options: &ResearchWorkflowOptions,
    registry: &AgentRegistry,
    executor: &dyn AgentExecutor,
) -> ResearchOutcome {
    info!(query = %options.query, domain = ?options.domain, "starting research workflow");

    let context = WorkflowContext::new(
        options.query.clone(),
        options.domain.clone(),
        options.requirements.clone(),
    );
    let phases = research_phases(options);
    let workflow_options = WorkflowOptions {
        workflow_name: WORKFLOW_NAME.to_string(),
        engage_specialists: options.engage_specialists,
        max_specialists: options.max_specialists,
        specialist_depends_on: Some(vec![
            "codebase-analyzer".to_string(),
            "thoughts-analyzer".to_string(),
        ]),
    };

    let workflow =
        execute_multi_phase_workflow(&phases, context, registry, executor, &workflow_options).await;
    let report = generate_research_report(&options.query, &workflow);
    let validation = validate_workflow_quality(&workflow);

    ResearchOutcome {
        workflow,
        report,
        validation,
    }
}
