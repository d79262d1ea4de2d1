//! In-memory agent registry
//!
//! The orchestrator only asks the registry whether an id exists. Executors
//! may also read a definition to build the prompt they send. Loading
//! definitions from disk is left to the caller.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const DEFAULT_MODEL: &str = "model-not-specified";
const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    #[default]
    Subagent,
    Primary,
}

/// Static definition of an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Tool name to enabled flag
    #[serde(default)]
    pub tools: BTreeMap<String, bool>,
    #[serde(default)]
    pub mode: AgentMode,
    /// Body of the agent's instructions
    #[serde(default)]
    pub context: String,
}

impl AgentDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            model: None,
            temperature: None,
            tools: BTreeMap::new(),
            mode: AgentMode::Subagent,
            context: String::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>, enabled: bool) -> Self {
        self.tools.insert(tool.into(), enabled);
        self
    }

    pub fn with_mode(mut self, mode: AgentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn effective_temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Enabled tool names, sorted
    pub fn enabled_tools(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(tool, _)| tool.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<String, AgentDefinition>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the generic research agents
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for agent in builtin_agents() {
            registry.insert(agent);
        }
        registry
    }

    /// Insert or replace a definition, returning the one it replaced
    pub fn insert(&mut self, agent: AgentDefinition) -> Option<AgentDefinition> {
        self.agents.insert(agent.id.clone(), agent)
    }

    pub fn has(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&AgentDefinition> {
        self.agents.get(id)
    }

    /// All ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.agents.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl FromIterator<AgentDefinition> for AgentRegistry {
    fn from_iter<I: IntoIterator<Item = AgentDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for agent in iter {
            registry.insert(agent);
        }
        registry
    }
}

fn builtin_agents() -> Vec<AgentDefinition> {
    vec![
        AgentDefinition::new(
            "codebase-locator",
            "Codebase Locator",
            "Finds and locates specific files, components, or code patterns within a codebase",
        )
        .with_model("github-copilot/gpt-4.1")
        .with_temperature(0.1)
        .with_context(
            "You are a specialized codebase locator agent. Find specific files, components, \
             functions, or patterns and report file paths with line numbers when possible.",
        )
        .with_tool("grep", true)
        .with_tool("glob", true)
        .with_tool("read", true),
        AgentDefinition::new(
            "codebase-analyzer",
            "Codebase Analyzer",
            "Analyzes and explains how specific code components work and their relationships",
        )
        .with_model("github-copilot/gpt-4.1")
        .with_temperature(0.2)
        .with_context(
            "You are a specialized code analysis agent. Explain implementation details, data \
             flow and the relationships between components.",
        )
        .with_tool("read", true)
        .with_tool("grep", true),
        AgentDefinition::new(
            "thoughts-locator",
            "Thoughts Locator",
            "Discovers existing documentation, decision records and research notes",
        )
        .with_model("github-copilot/gpt-4.1")
        .with_temperature(0.1)
        .with_context("You locate documentation relevant to the research question.")
        .with_tool("glob", true)
        .with_tool("read", true),
        AgentDefinition::new(
            "thoughts-analyzer",
            "Thoughts Analyzer",
            "Extracts decisions, constraints and insights from documentation",
        )
        .with_model("github-copilot/gpt-4.1")
        .with_temperature(0.2)
        .with_context("You extract past decisions and known issues from documentation.")
        .with_tool("read", true),
        AgentDefinition::new(
            "web-search-researcher",
            "Web Search Researcher",
            "Conducts targeted web research to gather information on specific topics",
        )
        .with_model("github-copilot/gpt-4.1")
        .with_temperature(0.3)
        .with_context("You gather external best practices, alternatives and standards.")
        .with_tool("webfetch", true)
        .with_tool("websearch", true),
    ]
}

/// Pre-flight check of whether an agent can be executed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Similar ids when the agent is unknown
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Validate that an agent exists and is reasonably configured
pub fn validate_agent_execution(agent_id: &str, registry: &AgentRegistry) -> AgentValidation {
    let Some(agent) = registry.get(agent_id) else {
        let prefix = agent_id.split('-').next().unwrap_or(agent_id);
        let suggestions = registry
            .ids()
            .into_iter()
            .filter(|id| id.contains(prefix))
            .take(3)
            .collect();

        return AgentValidation {
            valid: false,
            errors: vec![format!("Agent {} not found in registry", agent_id)],
            warnings: Vec::new(),
            suggestions,
        };
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if agent.description.trim().is_empty() {
        errors.push("Agent missing description".to_string());
    }

    if agent.context.trim().is_empty() {
        warnings.push("Agent context is empty - may produce generic responses".to_string());
    }

    if agent.model.is_none() {
        warnings.push("No model specified, using default".to_string());
    }

    if let Some(temperature) = agent.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            warnings.push("Temperature outside normal range (0-2)".to_string());
        }
    }

    AgentValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
        suggestions: Vec::new(),
    }
}
