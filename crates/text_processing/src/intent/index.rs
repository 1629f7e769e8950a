//! Pattern index
//!
//! Registered intents with their patterns and keywords normalized once, at
//! registration time, so detection only normalizes the query.

use std::collections::{HashMap, HashSet};

use viet_intent_core::{Error, IntentDefinition, Result};

use crate::entities::Gazetteer;
use crate::normalizer::{normalize, NormalizedText};

/// A normalized pattern with its token sets
#[derive(Debug, Clone)]
pub struct IndexedPattern {
    text: NormalizedText,
    accented_set: HashSet<String>,
    folded_set: HashSet<String>,
}

impl IndexedPattern {
    fn new(text: NormalizedText) -> Self {
        Self {
            accented_set: text.accented_tokens().iter().cloned().collect(),
            folded_set: text.folded_tokens().iter().cloned().collect(),
            text,
        }
    }

    pub fn text(&self) -> &NormalizedText {
        &self.text
    }

    pub fn accented_set(&self) -> &HashSet<String> {
        &self.accented_set
    }

    pub fn folded_set(&self) -> &HashSet<String> {
        &self.folded_set
    }
}

/// A validated, normalized intent
#[derive(Debug, Clone)]
pub struct IndexedIntent {
    definition: IntentDefinition,
    threshold: f32,
    patterns: Vec<IndexedPattern>,
    keywords: Vec<NormalizedText>,
    gazetteer: Gazetteer,
}

impl IndexedIntent {
    /// Validate and normalize a definition
    ///
    /// `default_threshold` applies when the definition has none.
    pub fn build(definition: IntentDefinition, default_threshold: f32) -> Result<Self> {
        let name = definition.name.as_str();
        if name.trim().is_empty() {
            return Err(Error::invalid_config(name, "intent name must not be empty"));
        }

        if definition.patterns.is_empty() {
            return Err(Error::invalid_config(name, "at least one pattern is required"));
        }

        let threshold = definition.threshold.unwrap_or(default_threshold);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::invalid_config(
                name,
                format!("threshold {} is outside [0, 1]", threshold),
            ));
        }

        let mut patterns = Vec::with_capacity(definition.patterns.len());
        for raw in &definition.patterns {
            let text = normalize(raw);
            if text.is_empty() {
                return Err(Error::invalid_config(
                    name,
                    format!("pattern '{}' is empty after normalization", raw),
                ));
            }
            patterns.push(IndexedPattern::new(text));
        }

        let mut keywords: Vec<NormalizedText> = Vec::with_capacity(definition.keywords.len());
        for raw in &definition.keywords {
            let text = normalize(raw);
            if text.is_empty() {
                return Err(Error::invalid_config(
                    name,
                    format!("keyword '{}' is empty after normalization", raw),
                ));
            }
            // "chào" and "chao" are the same keyword
            if !keywords.iter().any(|k| k.folded() == text.folded()) {
                keywords.push(text);
            }
        }

        let mut gazetteer = Gazetteer::new();
        for (entity, terms) in &definition.gazetteer {
            if entity.trim().is_empty() {
                return Err(Error::invalid_config(name, "gazetteer entity name must not be empty"));
            }
            for term in terms {
                if normalize(term).is_empty() {
                    return Err(Error::invalid_config(
                        name,
                        format!("gazetteer term '{}' for '{}' is empty after normalization", term, entity),
                    ));
                }
                gazetteer.add_term(entity, term);
            }
        }

        Ok(Self {
            definition,
            threshold,
            patterns,
            keywords,
            gazetteer,
        })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The definition as registered
    pub fn definition(&self) -> &IntentDefinition {
        &self.definition
    }

    /// Effective threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn response(&self) -> &str {
        &self.definition.response
    }

    pub fn patterns(&self) -> &[IndexedPattern] {
        &self.patterns
    }

    /// Keywords, deduplicated ignoring diacritics
    pub fn keywords(&self) -> &[NormalizedText] {
        &self.keywords
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }
}

/// Registered intents in registration order
#[derive(Debug, Default)]
pub struct IntentRegistry {
    intents: Vec<IndexedIntent>,
    positions: HashMap<String, usize>,
}

impl IntentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an intent; fails if the name is taken
    pub fn insert(&mut self, intent: IndexedIntent) -> Result<()> {
        if self.positions.contains_key(intent.name()) {
            return Err(Error::DuplicateIntent(intent.name().to_string()));
        }
        self.positions.insert(intent.name().to_string(), self.intents.len());
        self.intents.push(intent);
        Ok(())
    }

    /// Swap in a new version of an intent, keeping its registration
    /// position; appends when the name is new
    pub fn replace(&mut self, intent: IndexedIntent) -> Option<IndexedIntent> {
        match self.positions.get(intent.name()) {
            Some(&position) => Some(std::mem::replace(&mut self.intents[position], intent)),
            None => {
                self.positions.insert(intent.name().to_string(), self.intents.len());
                self.intents.push(intent);
                None
            },
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<IndexedIntent> {
        let position = self.positions.remove(name)?;
        let removed = self.intents.remove(position);
        for index in self.positions.values_mut() {
            if *index > position {
                *index -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, name: &str) -> Option<&IndexedIntent> {
        self.positions.get(name).map(|&position| &self.intents[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexedIntent> {
        self.intents.iter()
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<String> {
        self.intents.iter().map(|i| i.name().to_string()).collect()
    }

    /// Per-intent gazetteers that have terms
    pub fn gazetteers(&self) -> impl Iterator<Item = &Gazetteer> {
        self.intents
            .iter()
            .map(IndexedIntent::gazetteer)
            .filter(|g| !g.is_empty())
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn clear(&mut self) {
        self.intents.clear();
        self.positions.clear();
    }
}
