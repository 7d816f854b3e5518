use serde::{Deserialize, Serialize};

use super::identifiers::ToolId;

/// One AI tool from the catalog. `name` is the only key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTool {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub primary_use: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Pricing tier tag such as `free`, `freemium` or `paid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
}

impl AgentTool {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            primary_use: Vec::new(),
            strengths: Vec::new(),
            mark: None,
        }
    }

    #[must_use]
    pub fn with_primary_use<I, S>(mut self, uses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_use = uses.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_strengths<I, S>(mut self, strengths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strengths = strengths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }
}

/// Agent recruited for one workflow phase of a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAgent {
    pub phase_id: String,
    pub agent: AgentTool,
    pub phase_name: String,
}

impl SelectedAgent {
    #[must_use]
    pub fn new(phase_id: impl Into<String>, phase_name: impl Into<String>, agent: AgentTool) -> Self {
        Self {
            phase_id: phase_id.into(),
            agent,
            phase_name: phase_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub tool_id: ToolId,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChecklist {
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPhase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub checklist: PhaseChecklist,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub ai_recommendations: Vec<AiRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSubcategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases: Vec<WorkflowPhase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowCategory {
    pub id: u8,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hybrid_team_notes: String,
    #[serde(default)]
    pub subcategories: Vec<WorkflowSubcategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub total_categories: u32,
    #[serde(default)]
    pub total_subcategories: u32,
    #[serde(default)]
    pub total_phases: u32,
    #[serde(default)]
    pub ai_tools_count: u32,
    #[serde(default)]
    pub trends_count: u32,
    #[serde(default)]
    pub scalability: String,
    #[serde(default)]
    pub phase_patterns: Vec<String>,
    #[serde(default)]
    pub last_verified: String,
    #[serde(default)]
    pub compliance_notes: String,
}
