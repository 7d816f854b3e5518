mod agent;
mod draft;
mod identifiers;
pub(crate) mod mission;

pub use agent::{
    AgentTool, AiRecommendation, CatalogMetadata, PhaseChecklist, SelectedAgent, WorkflowCategory,
    WorkflowPhase, WorkflowSubcategory,
};
pub use draft::MissionDraft;
pub use identifiers::{MissionId, ToolId};
pub use mission::{
    ApproxLength, Category, CodingContext, CodingDomain, CodingIntent, CodingPurpose, Complexity,
    Constraints, DomainPayload, Environment, Language, Mission, MissionCore, MissionStatus,
    QualityFocus, StackLanguage, Subcategory, TechnicalDirection, Timeline, Tone, WritingContext,
    WritingDomain, WritingIntent, WritingPreference, WritingPurpose,
};
