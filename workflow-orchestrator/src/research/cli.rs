//! CLI argument parsing for the research agent

use clap::Parser;
use std::path::PathBuf;

use crate::{orchestrator::DEFAULT_MAX_SPECIALISTS, research::workflow::ResearchWorkflowOptions};

/// Research Agent CLI Arguments
#[derive(Parser, Debug, Clone)]
#[command(
    name = "research-agent",
    about = "Multi-phase research workflow: discover, analyze, consult specialists, score"
)]
pub struct Args {
    /// Research question
    #[arg(short, long)]
    pub query: String,

    /// Domain hint forwarded to every agent
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Extra requirements forwarded to every agent
    #[arg(short, long)]
    pub requirements: Option<String>,

    /// Include the external web research phase
    #[arg(long)]
    pub external: bool,

    /// Engage domain specialists after analysis
    #[arg(long)]
    pub specialists: bool,

    /// Maximum number of specialists to engage
    #[arg(long, default_value_t = DEFAULT_MAX_SPECIALISTS)]
    pub max_specialists: usize,

    /// Run a YAML workflow plan instead of the research workflow
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Print the full result as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<Args> for ResearchWorkflowOptions {
    fn from(args: Args) -> Self {
        ResearchWorkflowOptions {
            query: args.query,
            domain: args.domain,
            requirements: args.requirements,
            include_external_research: args.external,
            engage_specialists: args.specialists,
            max_specialists: args.max_specialists,
        }
    }
}
