//! Request/response records and graph-derived entities.
//!
//! Everything crossing the engine boundary is an explicit serde struct,
//! validated at construction by the type system rather than assembled as
//! loosely-typed maps.

pub mod enums;

pub use enums::LifestyleLabel;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Herb name → herbs to avoid combining with. Directed as stored; the
/// engine never symmetrizes it.
pub type ContraindicationMap = BTreeMap<String, Vec<String>>;

// ---------------------------------------------------------------------------
// Graph facts
// ---------------------------------------------------------------------------

/// One (herb, condition) edge matched by a symptom query.
///
/// Facts arrive raw from the store: duplicates are legitimate and are only
/// collapsed by the ranker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbFact {
    pub herb: String,
    pub condition: String,
    /// Free-text rationale on the helps-with edge, when the graph has one.
    #[serde(default)]
    pub evidence: Option<String>,
    #[serde(default)]
    pub properties: Vec<String>,
}

/// Search result row for herb lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbSummary {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<String>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
    #[serde(default)]
    pub conditions_history: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// A ranked herb suggestion with merged rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbSuggestion {
    pub name: String,
    /// "; "-joined deduplicated reasons, first-seen order.
    pub why: String,
    pub how_to_use: String,
    /// Empty when the graph has no interaction entry; never absent.
    #[serde(default)]
    pub avoid_with: Vec<String>,
}

/// Raw narrative kept for debugging, capped at 1200 characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugNarrative {
    pub narrative: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// At most 5, first-appearance order.
    pub suggestions: Vec<HerbSuggestion>,
    pub tips: Vec<String>,
    pub disclaimer: String,
    pub debug: DebugNarrative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    /// At most 3, store order.
    pub probable_conditions: Vec<String>,
    /// In [0.3, 1.0]; crude monotonic heuristic, not a calibrated probability.
    pub confidence: f64,
    pub rationale: String,
    pub disclaimer: String,
}

/// Output of free-text signal extraction. Both lists are insertion-ordered
/// and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSignals {
    pub symptoms: Vec<String>,
    pub lifestyle: Vec<LifestyleLabel>,
}
