//! Research workflow module
//!
//! A ready-made workflow that locates and analyzes code and documentation,
//! optionally consults external sources and domain specialists, and turns
//! the run into a [`ResearchReport`].

pub mod cli;
pub mod report;
pub mod types;
pub mod workflow;

// Re-export commonly used types
pub use report::{format_research_report, generate_research_report};
pub use types::{Priority, Recommendation, RecommendationCategory, ResearchReport, ResearchSummary};
pub use workflow::{
    research_phases, run_research_workflow, ResearchOutcome, ResearchWorkflowOptions,
};
