/*
┌─────────────────────────────────────────────────────────────────────────────┐
│                         RESEARCH AGENT WORKFLOW                              │
└─────────────────────────────────────────────────────────────────────────────┘

  Phase 1: DISCOVERY (parallel)
    │
    ├─> codebase-locator   Find relevant files and components
    └─> thoughts-locator   Discover existing documentation

         ↓

  Phase 2: ANALYSIS (sequential, requires both locators)
    │
    ├─> codebase-analyzer  Understand implementation details
    └─> thoughts-analyzer  Extract insights from documentation

         ↓

  Phase 3: EXTERNAL RESEARCH (optional, --external)
    │
    └─> web-search-researcher

         ↓

  Phase 4: DOMAIN SPECIALISTS (--specialists, only if domains were found)
    │
    └─> Up to --max-specialists registered specialists per identified domain

         ↓

  QUALITY VALIDATION
    │
    └─> Completeness, accuracy, coverage, consistency, quality gates

EXAMPLE COMMANDS:

  # Research workflow with specialists
  cargo run --bin research-agent -- \
    --query "How does the authentication system work?" \
    --specialists

  # Custom plan, JSON output
  cargo run --bin research-agent -- \
    --query "Review the storage layer" \
    --plan plans/storage.yaml \
    --json

  Progress events are written to stderr; set RUST_LOG=debug for diagnostics.
*/

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use workflow_orchestrator::{
    config::WorkflowPlan,
    orchestrator::{execute_multi_phase_workflow, WorkflowContext},
    quality::{format_validation_result, validate_workflow_quality},
    registry::AgentRegistry,
    research::{
        cli::Args, format_research_report, run_research_workflow, ResearchWorkflowOptions,
    },
    workflow_utils::SimulatedExecutor,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let json = args.json;

    let registry = Arc::new(AgentRegistry::builtin());
    let executor = SimulatedExecutor::new(registry.clone());

    if let Some(plan_path) = args.plan.clone() {
        let plan = WorkflowPlan::from_yaml_file(&plan_path)
            .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;
        let (phases, options) = plan.into_phases();
        let context = WorkflowContext::new(args.query, args.domain, args.requirements);

        let result =
            execute_multi_phase_workflow(&phases, context, &registry, &executor, &options).await;
        let validation = validate_workflow_quality(&result);

        if json {
            let output = serde_json::json!({ "workflow": result, "validation": validation });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize result")?
            );
        } else {
            println!("# Workflow: {}\n", result.workflow);
            for phase in &result.phases {
                println!(
                    "- {} ({}): {:?}{}",
                    phase.phase_name,
                    phase.phase_type,
                    phase.status,
                    phase
                        .reason
                        .as_deref()
                        .map(|r| format!(" - {}", r))
                        .unwrap_or_default()
                );
            }
            println!();
            println!("{}", format_validation_result(&validation));
        }

        return Ok(());
    }

    let options: ResearchWorkflowOptions = args.into();
    let outcome = run_research_workflow(&options, &registry, &executor).await;

    if json {
        let output = serde_json::json!({
            "workflow": outcome.workflow,
            "report": outcome.report,
            "validation": outcome.validation,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize result")?
        );
    } else {
        println!("{}", format_research_report(&outcome.report));
        println!("{}", format_validation_result(&outcome.validation));
    }

    Ok(())
}
