//! Scoring
//!
//! combined = pattern_weight × pattern_signal + keyword_weight × keyword_signal
//!
//! - pattern_signal: best Jaccard similarity between the query's token set
//!   and any pattern's token set, on the accented and on the folded forms,
//!   whichever is higher. A query equal to a pattern (in either form) scores
//!   1.0 overall regardless of keywords.
//! - keyword_signal: fraction of keywords present in the query as whole,
//!   consecutive tokens (in either form). 0 when the intent has no keywords.

use serde::Serialize;
use std::collections::HashSet;

use viet_intent_config::EngineSettings;

use super::index::IndexedIntent;
use crate::normalizer::NormalizedText;

/// Per-intent score with the signals behind it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub pattern_signal: f32,
    pub keyword_signal: f32,
    pub combined: f32,
    /// Query equals one of the patterns
    pub exact: bool,
    /// The exact match also agrees on diacritics
    pub exact_accents: bool,
    /// Index of the best-matching pattern
    pub best_pattern: Option<usize>,
}

/// Token sets of a query, built once per detection
#[derive(Debug)]
pub struct QueryTokens<'a> {
    text: &'a NormalizedText,
    accented: HashSet<&'a str>,
    folded: HashSet<&'a str>,
}

impl<'a> QueryTokens<'a> {
    pub fn new(text: &'a NormalizedText) -> Self {
        Self {
            text,
            accented: text.accented_tokens().iter().map(String::as_str).collect(),
            folded: text.folded_tokens().iter().map(String::as_str).collect(),
        }
    }

    pub fn text(&self) -> &NormalizedText {
        self.text
    }
}

/// |A ∩ B| / |A ∪ B|, 0 when both are empty
pub fn jaccard(query: &HashSet<&str>, pattern: &HashSet<String>) -> f32 {
    let intersection = query.iter().filter(|t| pattern.contains(**t)).count();
    let union = query.len() + pattern.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    pattern_weight: f32,
    keyword_weight: f32,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

impl Scorer {
    pub fn new(pattern_weight: f32, keyword_weight: f32) -> Self {
        Self {
            pattern_weight,
            keyword_weight,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.pattern_weight, settings.keyword_weight)
    }

    pub fn score(&self, query: &QueryTokens<'_>, intent: &IndexedIntent) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();

        for (index, pattern) in intent.patterns().iter().enumerate() {
            if query.text.same_accents(pattern.text()) {
                breakdown.pattern_signal = 1.0;
                breakdown.best_pattern = Some(index);
                breakdown.exact = true;
                breakdown.exact_accents = true;
                break;
            }
            if breakdown.exact {
                continue;
            }
            if query.text.same_as(pattern.text()) {
                // keep looking for a pattern that also agrees on diacritics
                breakdown.pattern_signal = 1.0;
                breakdown.best_pattern = Some(index);
                breakdown.exact = true;
                continue;
            }

            let similarity = jaccard(&query.accented, pattern.accented_set())
                .max(jaccard(&query.folded, pattern.folded_set()));
            if similarity > breakdown.pattern_signal {
                breakdown.pattern_signal = similarity;
                breakdown.best_pattern = Some(index);
            }
        }

        let keywords = intent.keywords();
        if !keywords.is_empty() {
            let hits = keywords
                .iter()
                .filter(|k| query.text.contains_phrase(k))
                .count();
            breakdown.keyword_signal = hits as f32 / keywords.len() as f32;
        }

        breakdown.combined = if breakdown.exact {
            1.0
        } else {
            (self.pattern_weight * breakdown.pattern_signal
                + self.keyword_weight * breakdown.keyword_signal)
                .clamp(0.0, 1.0)
        };

        breakdown
    }
}
