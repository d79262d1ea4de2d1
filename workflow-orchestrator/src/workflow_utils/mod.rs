//! Workflow utilities for agent execution
//!
//! - **batch**: Parallel execution with concurrency control
//! - **agent**: Registry-backed executor and prompt assembly

pub mod agent;
pub mod batch;

// Re-export commonly used types and functions
pub use agent::{build_agent_prompt, SimulatedExecutor};
pub use batch::{execute_batch, TaskContext};
