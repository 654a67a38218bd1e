use serde::{Deserialize, Serialize};
use validator::Validate;

/// Industrial by-product listing shown on a swipe card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub generator: String,
    #[serde(default)]
    pub purity: f64,
    #[serde(default)]
    pub price: String,
    #[serde(rename = "location")]
    pub location_tag: String,
    #[serde(rename = "compatibilityScore")]
    pub base_score: f64,
    #[serde(rename = "enrichedScore", default, skip_serializing_if = "Option::is_none")]
    pub enriched_score: Option<f64>,
    #[serde(default)]
    pub description: String,
}

impl Item {
    /// Enriched score when known, otherwise the score loaded with the item
    pub fn display_score(&self) -> f64 {
        self.enriched_score.unwrap_or(self.base_score)
    }

    /// Whether the location tag mentions the given region key
    #[inline]
    pub fn is_local_to(&self, region: &str) -> bool {
        self.location_tag.contains(region)
    }
}

/// Direction of a committed swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Reject
    Left,
    /// Accept (match)
    Right,
}

/// Outcome of a released drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Commit(SwipeDirection),
    /// Card returns to center, deck untouched
    SnapBack,
}

/// Most recent right-committed item, drives the match notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub item: Item,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

/// Operating region preference for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locality {
    Global,
    Region(String),
}

impl Locality {
    /// Parse a locality signal; the sentinel (case-insensitive) or a blank value means Global
    pub fn parse(value: &str, global_sentinel: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(global_sentinel.trim()) {
            Locality::Global
        } else {
            Locality::Region(trimmed.to_string())
        }
    }

    pub fn region(&self) -> Option<&str> {
        match self {
            Locality::Global => None,
            Locality::Region(key) => Some(key),
        }
    }

    /// Human-readable label passed to the analyzer
    pub fn label(&self) -> &str {
        self.region().unwrap_or("global")
    }
}

/// Result of a compatibility analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub score: f64,
    pub reasoning: String,
}
