use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::agent::SelectedAgent;
use super::identifiers::MissionId;
use crate::error::{Result, WorkforceError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionStatus {
    #[default]
    Draft,
    Active,
    Completed,
    Failed,
}

impl MissionStatus {
    pub const ALL: [Self; 4] = [Self::Draft, Self::Active, Self::Completed, Self::Failed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for MissionStatus {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, String> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown mission status: {s}")),
        }
    }
}

/// Mission category. Persisted as `{ "id": 1|2, "name": ... }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CategoryRepr", into = "CategoryRepr")]
pub enum Category {
    Writing,
    CodingProgramming,
}

impl Category {
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Writing => 1,
            Self::CodingProgramming => 2,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Writing => "Writing",
            Self::CodingProgramming => "Coding & Programming",
        }
    }

    /// # Errors
    /// Returns `WorkforceError::InvalidMission` for ids other than 1 and 2.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::Writing),
            2 => Ok(Self::CodingProgramming),
            other => Err(WorkforceError::InvalidMission(format!(
                "unknown category id {other}"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Serialize, Deserialize)]
struct CategoryRepr {
    id: u8,
    #[serde(default)]
    name: String,
}

impl TryFrom<CategoryRepr> for Category {
    type Error = String;

    /// A blank `name` is accepted; any other name must agree with `id`.
    fn try_from(repr: CategoryRepr) -> std::result::Result<Self, String> {
        let category = Self::from_id(repr.id).map_err(|e| e.to_string())?;
        let name = repr.name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(category.name()) {
            Ok(category)
        } else {
            Err(format!(
                "category name '{name}' does not match id {} ({category})",
                repr.id
            ))
        }
    }
}

impl From<Category> for CategoryRepr {
    fn from(category: Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Subcategory {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

const WRITING_SUBCATEGORY_COUNT: u8 = 12;
const CODING_SUBCATEGORY_COUNT: u8 = 6;

// ---------------------------------------------------------------------------
// Writing domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WritingPurpose {
    Educate,
    Inform,
    Entertain,
    Persuade,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Id,
    En,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Formal,
    Casual,
    Technical,
    Storytelling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproxLength {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingIntent {
    pub purpose: WritingPurpose,
    pub target_audience: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingPreference {
    pub tone: Tone,
    pub approx_length: ApproxLength,
}

/// Optional context. Uploaded assets are stored as path references, never as
/// file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub existing_assets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingDomain {
    pub subcategory: Subcategory,
    pub intent_schema: WritingIntent,
    pub preference_schema: WritingPreference,
    #[serde(default)]
    pub context_schema: WritingContext,
}

// ---------------------------------------------------------------------------
// Coding domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodingPurpose {
    Build,
    Refactor,
    Optimize,
    Debug,
    Integrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Web,
    Mobile,
    Backend,
    #[serde(rename = "CLI")]
    Cli,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackLanguage {
    JavaScript,
    Python,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "1-2 days")]
    Days,
    #[serde(rename = "1 week")]
    Week,
    #[serde(rename = "2-4 weeks")]
    Weeks,
    #[serde(rename = "1-3 months")]
    Months,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityFocus {
    Performance,
    Security,
    Maintainability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingIntent {
    pub purpose: CodingPurpose,
    pub target_users: String,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalDirection {
    pub environment: Environment,
    #[serde(default)]
    pub preferred_stack: Vec<StackLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub timeline: Timeline,
    #[serde(default)]
    pub quality_focus: Vec<QualityFocus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub existing_codebase: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingDomain {
    pub subcategory: Subcategory,
    pub intent_schema: CodingIntent,
    pub technical_direction_schema: TechnicalDirection,
    pub constraint_schema: Constraints,
    #[serde(default)]
    pub context_schema: CodingContext,
}

/// Domain payload, tagged by the `domain` field of the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "domain")]
pub enum DomainPayload {
    #[serde(rename = "writing")]
    Writing(WritingDomain),
    #[serde(rename = "coding_programming")]
    Coding(CodingDomain),
}

impl DomainPayload {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Writing(_) => Category::Writing,
            Self::Coding(_) => Category::CodingProgramming,
        }
    }

    #[must_use]
    pub const fn subcategory(&self) -> &Subcategory {
        match self {
            Self::Writing(domain) => &domain.subcategory,
            Self::Coding(domain) => &domain.subcategory,
        }
    }

    #[must_use]
    pub fn references(&self) -> &[String] {
        match self {
            Self::Writing(domain) => &domain.context_schema.references,
            Self::Coding(domain) => &domain.context_schema.references,
        }
    }

    fn validate_subcategory(&self) -> Result<()> {
        let category = self.category();
        let allowed = match category {
            Category::Writing => WRITING_SUBCATEGORY_COUNT,
            Category::CodingProgramming => CODING_SUBCATEGORY_COUNT,
        };
        let id = &self.subcategory().id;
        let in_range = id
            .split_once('.')
            .filter(|(prefix, _)| prefix.parse::<u8>().ok() == Some(category.id()))
            .and_then(|(_, index)| index.parse::<u8>().ok())
            .is_some_and(|index| (1..=allowed).contains(&index));

        if in_range {
            Ok(())
        } else {
            Err(WorkforceError::InvalidMission(format!(
                "subcategory {id} does not belong to {category}"
            )))
        }
    }
}

/// Core fields collected by the first stage of the mission form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionCore {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub intent_summary: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default)]
    pub mission_id: MissionId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: MissionStatus,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub intent_summary: String,
    pub category: Category,
    #[serde(flatten)]
    pub domain: DomainPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_team: Option<Vec<SelectedAgent>>,
}

impl Mission {
    /// New draft mission with a generated id; the category follows the payload.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        intent_summary: impl Into<String>,
        domain: DomainPayload,
    ) -> Self {
        let now = Utc::now();
        Self {
            mission_id: MissionId::generate(),
            created_at: now,
            updated_at: Some(now),
            status: MissionStatus::Draft,
            name: name.into(),
            description: description.into(),
            intent_summary: intent_summary.into(),
            category: domain.category(),
            domain,
            ai_team: None,
        }
    }

    /// Marks the record as modified now. `created_at` is never touched.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Checks the fields required before the record may be written.
    ///
    /// # Errors
    /// Returns `WorkforceError::InvalidMission` when the id or name is blank,
    /// the payload does not match the category, the subcategory belongs to the
    /// other domain, or a reference is not an absolute URL.
    pub fn validate(&self) -> Result<()> {
        if self.mission_id.is_blank() {
            return Err(WorkforceError::InvalidMission(
                "mission_id is required".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(WorkforceError::InvalidMission(format!(
                "mission {} has no name",
                self.mission_id
            )));
        }
        if self.domain.category() != self.category {
            return Err(WorkforceError::InvalidMission(format!(
                "category {} does not match {} payload",
                self.category,
                self.domain.category()
            )));
        }
        self.domain.validate_subcategory()?;

        self.domain
            .references()
            .iter()
            .find(|reference| url::Url::parse(reference).is_err())
            .map_or(Ok(()), |bad| {
                Err(WorkforceError::InvalidMission(format!(
                    "reference is not a valid URL: {bad}"
                )))
            })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{coding_domain, coding_mission, writing_mission};
    use super::{Category, Mission, MissionId, MissionStatus, Subcategory};
    use crate::error::WorkforceError;
    use crate::types::DomainPayload;

    #[test]
    fn status_round_trips_through_str() {
        for status in MissionStatus::ALL {
            assert_eq!(MissionStatus::try_from(status.as_str()), Ok(status));
        }
        assert!(MissionStatus::try_from("archived").is_err());
    }

    #[test]
    fn category_serializes_with_id_and_display_name() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(Category::CodingProgramming)?;
        assert_eq!(
            value,
            serde_json::json!({ "id": 2, "name": "Coding & Programming" })
        );
        Ok(())
    }

    #[test]
    fn unknown_category_id_is_rejected() {
        let parsed: Result<Category, _> = serde_json::from_str(r#"{"id": 3, "name": "Music"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn category_name_must_agree_with_id() -> Result<(), serde_json::Error> {
        let mismatched: Result<Category, _> =
            serde_json::from_str(r#"{"id": 1, "name": "Coding & Programming"}"#);
        assert!(mismatched.is_err());

        let nameless: Category = serde_json::from_str(r#"{"id": 2}"#)?;
        assert_eq!(nameless, Category::CodingProgramming);
        let lowercase: Category = serde_json::from_str(r#"{"id": 1, "name": "writing"}"#)?;
        assert_eq!(lowercase, Category::Writing);
        Ok(())
    }

    #[test]
    fn record_is_flat_with_domain_tag() -> Result<(), serde_json::Error> {
        let mission = coding_mission("intake");
        let value = serde_json::to_value(&mission)?;
        assert_eq!(value["domain"], "coding_programming");
        assert_eq!(value["category"]["id"], 2);
        assert_eq!(value["constraint_schema"]["timeline"], "2-4 weeks");
        assert_eq!(value["technical_direction_schema"]["environment"], "Backend");
        assert!(value.get("ai_team").is_none());

        let back: Mission = serde_json::from_value(value)?;
        assert_eq!(back, mission);
        Ok(())
    }

    #[test]
    fn valid_mission_passes() {
        assert!(writing_mission("guide").validate().is_ok());
        assert!(coding_mission("api").validate().is_ok());
    }

    #[test]
    fn blank_id_is_invalid() {
        let mut mission = writing_mission("guide");
        mission.mission_id = MissionId::new("");
        assert!(matches!(
            mission.validate(),
            Err(WorkforceError::InvalidMission(_))
        ));
    }

    #[test]
    fn payload_must_match_category() {
        let mut mission = writing_mission("guide");
        mission.domain = coding_domain();
        assert!(matches!(
            mission.validate(),
            Err(WorkforceError::InvalidMission(msg)) if msg.contains("does not match")
        ));
    }

    #[test]
    fn subcategory_must_belong_to_domain() {
        let mut mission = coding_mission("api");
        if let DomainPayload::Coding(domain) = &mut mission.domain {
            domain.subcategory = Subcategory::new("2.7", "Out of range");
        }
        assert!(mission.validate().is_err());

        if let DomainPayload::Coding(domain) = &mut mission.domain {
            domain.subcategory = Subcategory::new("1.2", "Writing one");
        }
        assert!(mission.validate().is_err());
    }

    #[test]
    fn references_must_be_urls() {
        let mut mission = writing_mission("guide");
        if let DomainPayload::Writing(domain) = &mut mission.domain {
            domain.context_schema.references.push("not a url".to_string());
        }
        assert!(matches!(
            mission.validate(),
            Err(WorkforceError::InvalidMission(msg)) if msg.contains("not a url")
        ));
    }

    #[test]
    fn touch_keeps_created_at() {
        let mut mission = writing_mission("guide");
        let created = mission.created_at;
        mission.updated_at = None;
        mission.touch();
        assert_eq!(mission.created_at, created);
        assert!(mission.updated_at.is_some());
    }
}
