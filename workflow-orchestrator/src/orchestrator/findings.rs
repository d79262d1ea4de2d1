//! Findings aggregation from phase results

use crate::orchestrator::types::WorkflowFindings;
use workflow_orchestrator_sdk::AgentExecutionResult;

/// Domain tokens recognised in agent ids
pub const DOMAIN_KEYWORDS: &[&str] = &["security", "performance", "database"];

/// Record the domains signalled by a batch of results
///
/// Matches keywords against the agent id only, never the result content.
/// Returns the domains that were newly added.
pub fn update_workflow_findings(
    findings: &mut WorkflowFindings,
    results: &[AgentExecutionResult],
) -> Vec<String> {
    let mut added = Vec::new();

    for result in results {
        for keyword in DOMAIN_KEYWORDS {
            if result.agent_id.contains(keyword) && findings.add_domain(keyword) {
                added.push(keyword.to_string());
            }
        }
    }

    added
}
