//! Data structures for research reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::orchestrator::Confidence;

/// When a recommendation should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    Immediate,
    ShortTerm,
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub action: String,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchSummary {
    pub objective: String,
    /// At most five entries
    pub key_findings: Vec<String>,
    pub domains_identified: Vec<String>,
    pub confidence: Confidence,
    pub timestamp: DateTime<Utc>,
}

/// Report produced from a research run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub summary: ResearchSummary,
    pub quality_score: u32,
    pub external_research_completed: bool,
    /// Agents of the specialist phase, empty unless it completed
    pub specialists: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub confidence: Confidence,
    pub next_steps: Vec<String>,
}
