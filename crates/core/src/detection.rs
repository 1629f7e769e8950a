//! Detection results

use serde::{Deserialize, Serialize};

use crate::entity::Entities;

/// Intent name reported when nothing clears its threshold
pub const UNKNOWN_INTENT: &str = "unknown";

/// An intent together with its combined score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredIntent {
    pub intent: String,
    pub confidence: f32,
}

/// Outcome of a single `detect` call
///
/// Owns all of its data; safe to keep after the engine is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Winning intent, or [`UNKNOWN_INTENT`]
    pub intent: String,
    /// Confidence in [0, 1]; 0.0 for unknown
    pub confidence: f32,
    /// Extracted entities, regardless of which intent won
    pub entities: Entities,
    /// Winning intent's response template, empty for unknown
    pub response_template: String,
    /// Runner-up intents with a non-zero score, best first
    #[serde(default)]
    pub alternatives: Vec<ScoredIntent>,
    /// Best sub-threshold candidate when the result is unknown
    #[serde(default)]
    pub best_guess: Option<ScoredIntent>,
}

impl DetectionResult {
    /// Result for input that matched nothing
    pub fn unknown(entities: Entities) -> Self {
        Self {
            intent: UNKNOWN_INTENT.to_string(),
            confidence: 0.0,
            entities,
            response_template: String::new(),
            alternatives: Vec::new(),
            best_guess: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == UNKNOWN_INTENT
    }
}
