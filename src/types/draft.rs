use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::agent::SelectedAgent;
use super::identifiers::MissionId;
use super::mission::{Category, DomainPayload, Mission, MissionCore, MissionStatus};
use crate::error::{Result, WorkforceError};

/// In-progress mission assembled one form stage at a time.
///
/// Nothing here is persisted directly: the record store only ever receives a
/// complete [`Mission`] produced by [`MissionDraft::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionDraft {
    pub mission_id: Option<MissionId>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: MissionStatus,
    pub name: Option<String>,
    pub description: Option<String>,
    pub intent_summary: Option<String>,
    pub category: Option<Category>,
    pub domain: Option<DomainPayload>,
    pub ai_team: Option<Vec<SelectedAgent>>,
}

impl Default for MissionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionDraft {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mission_id: None,
            created_at: None,
            status: MissionStatus::Draft,
            name: None,
            description: None,
            intent_summary: None,
            category: None,
            domain: None,
            ai_team: None,
        }
    }

    /// Assigns a fresh id unless one is already present, and returns it.
    pub fn ensure_id(&mut self) -> &MissionId {
        self.mission_id.get_or_insert_with(MissionId::generate)
    }

    /// Stage one: core fields. Switching category drops a payload from the
    /// other domain.
    pub fn apply_core(&mut self, core: MissionCore) -> &mut Self {
        if self
            .domain
            .as_ref()
            .is_some_and(|domain| domain.category() != core.category)
        {
            self.domain = None;
        }
        self.name = Some(core.name);
        self.description = Some(core.description);
        self.intent_summary = Some(core.intent_summary);
        self.category = Some(core.category);
        self
    }

    /// Stage two: domain payload.
    ///
    /// # Errors
    /// Returns `WorkforceError::InvalidMission` if the payload belongs to a
    /// different category than the one chosen in stage one.
    pub fn apply_domain(&mut self, domain: DomainPayload) -> Result<&mut Self> {
        if let Some(category) = self.category {
            if category != domain.category() {
                return Err(WorkforceError::InvalidMission(format!(
                    "{} payload submitted for a {category} mission",
                    domain.category()
                )));
            }
        }
        self.category = Some(domain.category());
        self.domain = Some(domain);
        Ok(self)
    }

    /// Stage three: per-phase agent assignments.
    pub fn assign_team(&mut self, team: Vec<SelectedAgent>) -> &mut Self {
        self.ai_team = Some(team);
        self
    }

    /// Produces a complete mission.
    ///
    /// # Errors
    /// Returns `WorkforceError::InvalidMission` if the id, name, category or
    /// domain payload is still missing.
    pub fn build(&self) -> Result<Mission> {
        let missing: Vec<&str> = [
            ("mission_id", self.mission_id.as_ref().is_none_or(MissionId::is_blank)),
            ("name", self.name.as_deref().is_none_or(|n| n.trim().is_empty())),
            ("category", self.category.is_none()),
            ("domain", self.domain.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (&self.mission_id, &self.name, self.category, &self.domain) {
            (Some(mission_id), Some(name), Some(category), Some(domain)) if missing.is_empty() => {
                let created_at = self.created_at.unwrap_or_else(Utc::now);
                Ok(Mission {
                    mission_id: mission_id.clone(),
                    created_at,
                    updated_at: Some(Utc::now()),
                    status: self.status,
                    name: name.clone(),
                    description: self.description.clone().unwrap_or_default(),
                    intent_summary: self.intent_summary.clone().unwrap_or_default(),
                    category,
                    domain: domain.clone(),
                    ai_team: self.ai_team.clone(),
                })
            }
            _ => Err(WorkforceError::InvalidMission(format!(
                "incomplete mission draft, missing: {}",
                missing.join(", ")
            ))),
        }
    }
}

impl From<Mission> for MissionDraft {
    fn from(mission: Mission) -> Self {
        Self {
            mission_id: Some(mission.mission_id),
            created_at: Some(mission.created_at),
            status: mission.status,
            name: Some(mission.name),
            description: Some(mission.description),
            intent_summary: Some(mission.intent_summary),
            category: Some(mission.category),
            domain: Some(mission.domain),
            ai_team: mission.ai_team,
        }
    }
}
