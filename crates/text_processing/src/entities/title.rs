//! Forms of address
//!
//! Vietnamese speakers address each other by kinship terms, which also tell
//! the listener who they are talking to. A term counts only where it is used
//! as address: right after a greeting or thanks ("chào anh", "cảm ơn chị"),
//! or before the vocative "ơi" ("em ơi").

use viet_intent_core::{Entity, EntityType};

use super::EntityRecognizer;
use crate::normalizer::{normalize, NormalizedText};
use crate::vietnamese::{self, ADDRESS_CUES, VOCATIVE};

/// Produces `title` (the term, e.g. "chị") and `gender` (what it implies,
/// e.g. "female")
#[derive(Debug)]
pub struct TitleRecognizer {
    vocative: NormalizedText,
}

impl Default for TitleRecognizer {
    fn default() -> Self {
        Self {
            vocative: normalize(VOCATIVE),
        }
    }
}

impl TitleRecognizer {
    const CONFIDENCE: f32 = 0.85;

    fn addressed_at(&self, text: &NormalizedText, i: usize) -> bool {
        let after_cue = ADDRESS_CUES
            .iter()
            .any(|cue| cue.len() <= i && text.matches_at(i - cue.len(), cue));
        after_cue || text.matches_at(i + 1, &self.vocative)
    }
}

impl EntityRecognizer for TitleRecognizer {
    fn name(&self) -> &'static str {
        "title"
    }

    fn recognize(&self, text: &NormalizedText) -> Vec<Entity> {
        let accented = text.accented_tokens();
        let folded = text.folded_tokens();

        for i in 0..text.len() {
            let Some((title, role)) = vietnamese::honorific(&accented[i], &folded[i]) else {
                continue;
            };
            if !self.addressed_at(text, i) {
                continue;
            }
            return vec![
                Entity::new("title", EntityType::Title, title, accented[i].as_str(), Self::CONFIDENCE),
                Entity::new("gender", EntityType::Title, role, accented[i].as_str(), Self::CONFIDENCE),
            ];
        }
        Vec::new()
    }
}
