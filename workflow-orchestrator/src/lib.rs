// Phase gating, dispatch and the workflow driver
pub mod orchestrator;

// Quality metrics, gates and validation
pub mod quality;

// Agent definitions and registry
pub mod registry;

// YAML workflow plans
pub mod config;

pub mod error;

// Research workflow module
pub mod research;

// Executors and batch helpers
pub mod workflow_utils;

pub use error::{OrchestratorError, Result};
