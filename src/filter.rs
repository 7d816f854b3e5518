#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Search and ordering over the agent catalog.
//!
//! Everything here is pure: the catalog slice is never mutated and the same
//! inputs always produce the same order, so it is safe to call on every
//! keystroke.

use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::AgentTool;

pub const DEFAULT_FEATURED: &[&str] = &["ChatGPT", "Claude", "Gemini", "Perplexity", "Midjourney"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    #[default]
    NameAscending,
    NameDescending,
    Featured,
}

impl SortMode {
    pub const ALL: [Self; 3] = [Self::NameAscending, Self::NameDescending, Self::Featured];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NameAscending => "name-asc",
            Self::NameDescending => "name-desc",
            Self::Featured => "featured",
        }
    }

    /// Short label shown on the sort control.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NameAscending => "A-Z",
            Self::NameDescending => "Z-A",
            Self::Featured => "Featured",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortMode {
    pub input: String,
    pub suggestion: Option<&'static str>,
}

impl fmt::Display for UnknownSortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort mode '{}'", self.input)?;
        if let Some(suggestion) = self.suggestion {
            write!(f, ", did you mean '{suggestion}'?")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownSortMode {}

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| UnknownSortMode {
                input: s.to_string(),
                suggestion: suggest_mode(&normalized),
            })
    }
}

fn suggest_mode(typo: &str) -> Option<&'static str> {
    SortMode::ALL
        .iter()
        .map(|mode| (mode.as_str(), strsim::levenshtein(typo, mode.as_str())))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name)
}

/// Curated names that lead the `featured` ordering, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedList(Vec<String>);

impl Default for FeaturedList {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURED.iter().copied())
    }
}

impl FeaturedList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|featured| featured == name)
    }
}

/// Locale-style name comparison. Primary order ignores case and accents
/// (`Éclair` sorts with `eclair`), then accented after unaccented, then lower
/// case before upper case so equal-looking names still order deterministically.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(fold(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| b.cmp(a))
}

fn lowercase(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

fn fold(name: &str) -> impl Iterator<Item = char> + '_ {
    lowercase(name).nfd().filter(|c| !is_combining_mark(*c))
}

/// Whether `agent` matches an already lower-cased, non-blank needle.
fn matches_needle(agent: &AgentTool, needle: &str) -> bool {
    let hit = |text: &String| text.to_lowercase().contains(needle);
    hit(&agent.name) || agent.primary_use.iter().any(hit) || agent.strengths.iter().any(hit)
}

/// Agents whose name, primary uses or strengths contain `query`
/// (case-insensitive), in catalog order. A blank query keeps everything.
#[must_use]
pub fn filter_agents<'a>(catalog: &'a [AgentTool], query: &str) -> Vec<&'a AgentTool> {
    if query.trim().is_empty() {
        return catalog.iter().collect();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|agent| matches_needle(agent, &needle))
        .collect()
}

/// Orders agents for display. The sort is stable.
#[must_use]
pub fn sort_agents<'a>(
    agents: impl IntoIterator<Item = &'a AgentTool>,
    mode: SortMode,
    featured: &FeaturedList,
) -> Vec<&'a AgentTool> {
    match mode {
        SortMode::NameAscending => agents
            .into_iter()
            .sorted_by(|a, b| compare_names(&a.name, &b.name))
            .collect(),
        SortMode::NameDescending => agents
            .into_iter()
            .sorted_by(|a, b| compare_names(&b.name, &a.name))
            .collect(),
        SortMode::Featured => agents
            .into_iter()
            .sorted_by(|a, b| {
                match (featured.position(&a.name), featured.position(&b.name)) {
                    (Some(ai), Some(bi)) => ai.cmp(&bi),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => compare_names(&a.name, &b.name),
                }
            })
            .collect(),
    }
}

/// Filter then sort, returning owned copies ready for rendering.
#[must_use]
pub fn filter_and_sort(
    catalog: &[AgentTool],
    query: &str,
    mode: SortMode,
    featured: &FeaturedList,
) -> Vec<AgentTool> {
    sort_agents(filter_agents(catalog, query), mode, featured)
        .into_iter()
        .cloned()
        .collect()
}
