//! Intent definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A registered intent as supplied by the caller.
///
/// Holds raw text only. Normalized forms are derived by the engine at
/// registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    /// Unique intent name
    pub name: String,
    /// Reference phrases, in priority order
    pub patterns: Vec<String>,
    /// Weaker lexical cues
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Minimum confidence; the engine default applies when `None`
    #[serde(default)]
    pub threshold: Option<f32>,
    /// Response template returned with a match, may contain placeholders like `{time}`
    #[serde(default)]
    pub response: String,
    /// Extra gazetteer terms recognized while this intent is registered,
    /// keyed by entity name (e.g. "food_item")
    #[serde(default)]
    pub gazetteer: BTreeMap<String, Vec<String>>,
}

impl IntentDefinition {
    pub fn new<S: Into<String>>(name: impl Into<String>, patterns: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            keywords: Vec::new(),
            threshold: None,
            response: String::new(),
            gazetteer: BTreeMap::new(),
        }
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Add gazetteer terms recognized under `entity_name`
    pub fn with_gazetteer<S: Into<String>>(
        mut self,
        entity_name: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        self.gazetteer
            .entry(entity_name.into())
            .or_default()
            .extend(terms.into_iter().map(Into::into));
        self
    }
}
