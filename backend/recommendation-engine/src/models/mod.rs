use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Investor profile snapshot handed in per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Preferred industries / categories
    #[serde(default)]
    pub focus: Vec<String>,
    /// Preferred country or region
    #[serde(
        rename = "geographicPreferences",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub geographic_preferences: Option<String>,
    /// Companies the user has viewed, oldest first
    #[serde(default)]
    pub history: Vec<String>,
    /// Companies the user explicitly saved
    #[serde(rename = "saveList", default)]
    pub save_list: Vec<String>,
}

/// Company (organization) catalog entry.
///
/// Catalog documents are not guaranteed to carry well-formed `Industry` /
/// `Country` values. Anything that is not a string deserializes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(
        rename = "Industry",
        alias = "industry",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub industry: Option<String>,
    #[serde(
        rename = "Country",
        alias = "country",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientField {
    Text(String),
    Other(IgnoredAny),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientField::deserialize(deserializer)? {
        LenientField::Text(value) => Some(value),
        LenientField::Other(_) => None,
    })
}

/// Where an interaction fact was derived from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteractionSource {
    History,
    SaveList,
}

impl InteractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionSource::History => "history",
            InteractionSource::SaveList => "save_list",
        }
    }
}

/// A single (user, item) engagement, reduced to binary presence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionFact {
    pub user_id: String,
    pub item_id: String,
    pub strength: u8,
    pub source: InteractionSource,
}

impl InteractionFact {
    pub fn new(
        user_id: impl Into<String>,
        item_id: impl Into<String>,
        source: InteractionSource,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            strength: 1,
            source,
        }
    }

    /// Strength is binary; anything above 1 is clamped.
    pub fn with_strength(mut self, strength: u8) -> Self {
        self.strength = strength.min(1);
        self
    }
}

/// Recommended company identifiers. Ordered only so output is reproducible.
pub type RecommendationSet = BTreeSet<String>;

/// Result of a recommendation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// The user has neither viewed nor saved anything yet
    NoInteractions { user_id: String },
    Recommended { items: RecommendationSet },
}

impl RecommendationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationOutcome::NoInteractions { .. } => "no_interactions",
            RecommendationOutcome::Recommended { .. } => "recommended",
        }
    }

    pub fn items(&self) -> Option<&RecommendationSet> {
        match self {
            RecommendationOutcome::NoInteractions { .. } => None,
            RecommendationOutcome::Recommended { items } => Some(items),
        }
    }

    /// Message for the transport layer to show instead of an empty list
    pub fn explanation(&self) -> Option<&'static str> {
        match self {
            RecommendationOutcome::NoInteractions { .. } => Some(
                "No interactions found yet. View or save a few companies to get recommendations.",
            ),
            RecommendationOutcome::Recommended { .. } => None,
        }
    }
}

/// Per-request counters, used for logging and metrics only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationReport {
    pub interaction_facts: usize,
    pub known_users: usize,
    pub neighbors_consulted: usize,
    pub collaborative_count: usize,
    pub content_count: usize,
    pub final_count: usize,
}
