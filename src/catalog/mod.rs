#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod fallback;
mod normalize;

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Result, WorkforceError};
use crate::types::{
    AgentTool, AiRecommendation, CatalogMetadata, ToolId, WorkflowCategory, WorkflowPhase,
    WorkflowSubcategory,
};

pub use fallback::fallback_agents;
pub use normalize::{normalize_catalog, NormalizedCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Fallback,
}

/// Agent catalog plus the workflow tree it was published with. Immutable
/// once loaded.
#[derive(Debug, Clone)]
pub struct Catalog {
    agents: Vec<AgentTool>,
    tool_ids: Vec<Option<ToolId>>,
    categories: Vec<WorkflowCategory>,
    metadata: CatalogMetadata,
    version: Option<String>,
    source: CatalogSource,
}

impl Catalog {
    #[must_use]
    pub fn from_normalized(normalized: NormalizedCatalog, source: CatalogSource) -> Self {
        let (tool_ids, agents) = normalized.tools.into_iter().unzip();
        Self {
            agents,
            tool_ids,
            categories: normalized.categories,
            metadata: normalized.metadata,
            version: normalized.version,
            source,
        }
    }

    #[must_use]
    pub fn fallback() -> Self {
        let agents = fallback_agents();
        Self {
            tool_ids: vec![None; agents.len()],
            agents,
            categories: Vec::new(),
            metadata: CatalogMetadata::default(),
            version: None,
            source: CatalogSource::Fallback,
        }
    }

    /// Parses a catalog document from JSON text.
    ///
    /// # Errors
    /// Returns `WorkforceError::CatalogError` if the text is not JSON or has an
    /// unsupported shape.
    pub fn from_json_str(text: &str, source: CatalogSource) -> Result<Self> {
        let document = serde_json::from_str(text)
            .map_err(|e| WorkforceError::CatalogError(format!("malformed catalog JSON: {e}")))?;
        normalize_catalog(document).map(|normalized| Self::from_normalized(normalized, source))
    }

    /// Reads and normalizes the catalog at `path`.
    ///
    /// # Errors
    /// Returns `WorkforceError::IoError` if the file cannot be read, or
    /// `WorkforceError::CatalogError` if its contents are not a catalog.
    pub async fn read(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json_str(&text, CatalogSource::File(path.to_path_buf()))?;
        debug!(
            "Loaded {} agents from {}",
            catalog.agents.len(),
            path.display()
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn agents(&self) -> &[AgentTool] {
        &self.agents
    }

    #[must_use]
    pub fn categories(&self) -> &[WorkflowCategory] {
        &self.categories
    }

    #[must_use]
    pub const fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::Fallback
    }

    #[must_use]
    pub fn agent_by_name(&self, name: &str) -> Option<&AgentTool> {
        self.agents.iter().find(|agent| agent.name == name)
    }

    #[must_use]
    pub fn agent_by_tool_id(&self, tool_id: &ToolId) -> Option<&AgentTool> {
        self.tool_ids
            .iter()
            .position(|id| id.as_ref() == Some(tool_id))
            .and_then(|index| self.agents.get(index))
    }

    fn subcategory(&self, category_id: u8, subcategory_id: &str) -> Option<&WorkflowSubcategory> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)?
            .subcategories
            .iter()
            .find(|sub| sub.id == subcategory_id)
    }

    /// Phases of a subcategory in workflow order; empty when unknown.
    #[must_use]
    pub fn phases(&self, category_id: u8, subcategory_id: &str) -> &[WorkflowPhase] {
        self.subcategory(category_id, subcategory_id)
            .map(|sub| sub.phases.as_slice())
            .unwrap_or_default()
    }

    /// Recommendations for a single phase; empty when any level is unknown.
    #[must_use]
    pub fn phase_recommendations(
        &self,
        category_id: u8,
        subcategory_id: &str,
        phase_id: &str,
    ) -> &[AiRecommendation] {
        self.phases(category_id, subcategory_id)
            .iter()
            .find(|phase| phase.id == phase_id)
            .map(|phase| phase.ai_recommendations.as_slice())
            .unwrap_or_default()
    }

    /// Recommendations for every phase of a subcategory, keyed by phase id.
    #[must_use]
    pub fn subcategory_recommendations(
        &self,
        category_id: u8,
        subcategory_id: &str,
    ) -> Vec<(&str, &[AiRecommendation])> {
        self.phases(category_id, subcategory_id)
            .iter()
            .map(|phase| (phase.id.as_str(), phase.ai_recommendations.as_slice()))
            .collect()
    }

    /// Resolves recommendation tool ids to catalog entries, skipping unknown ids.
    #[must_use]
    pub fn resolve_recommendations(&self, recommendations: &[AiRecommendation]) -> Vec<AgentTool> {
        recommendations
            .iter()
            .filter_map(|rec| {
                let found = self.agent_by_tool_id(&rec.tool_id);
                if found.is_none() {
                    debug!("Recommendation references unknown tool {}", rec.tool_id);
                }
                found.cloned()
            })
            .collect()
    }
}

/// Loads the catalog, substituting the built-in roster when no path is
/// configured or the document cannot be read. Never fails.
pub async fn load_catalog(path: Option<&Path>) -> Catalog {
    let Some(path) = path else {
        info!("No catalog configured, using built-in agent roster");
        return Catalog::fallback();
    };

    match Catalog::read(path).await {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(
                "Failed to load agent catalog from {}: {}; using built-in roster",
                path.display(),
                err
            );
            Catalog::fallback()
        }
    }
}
