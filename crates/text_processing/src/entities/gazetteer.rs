//! Noun gazetteers
//!
//! Fixed term lists matched against normalized input. When several terms
//! of the same entity match, the one covering the most tokens wins
//! ("bánh mì" over "mì"), then the earliest.

use std::collections::HashMap;

use viet_intent_core::{Entity, EntityType};

use crate::normalizer::{normalize, NormalizedText};

/// Entity name for dishes and drinks
pub const FOOD_ITEM: &str = "food_item";
/// Entity name for goods
pub const PRODUCT: &str = "product";

const FOOD_ITEMS: &[&str] = &[
    "phở",
    "phở bò",
    "phở gà",
    "bún",
    "bún chả",
    "bún bò",
    "bún bò huế",
    "cơm",
    "cơm tấm",
    "cơm rang",
    "bánh mì",
    "bánh xèo",
    "bánh canh",
    "bánh cuốn",
    "gỏi cuốn",
    "hủ tiếu",
    "mì",
    "mì quảng",
    "xôi",
    "chè",
    "nem",
    "nem rán",
    "chả",
    "chả giò",
    "cà phê",
    "cà phê sữa",
    "trà đá",
    "trà sữa",
    "nước cam",
    "sinh tố",
];

const PRODUCTS: &[&str] = &[
    "áo",
    "áo dài",
    "quần",
    "điện thoại",
    "máy tính",
    "laptop",
    "xe máy",
    "ô tô",
    "oto",
    "tủ lạnh",
    "tivi",
    "tv",
];

const GAZETTEER_CONFIDENCE: f32 = 0.9;

#[derive(Debug, Clone)]
struct GazetteerTerm {
    entity: String,
    canonical: String,
    normalized: NormalizedText,
}

/// A gazetteer hit in a particular input
#[derive(Debug, Clone, PartialEq)]
pub struct GazetteerMatch {
    pub entity: String,
    /// Term as registered
    pub canonical: String,
    /// Token range in the input
    pub start: usize,
    pub end: usize,
}

impl GazetteerMatch {
    fn beats(&self, other: &GazetteerMatch) -> bool {
        let (len, other_len) = (self.end - self.start, other.end - other.start);
        len > other_len || (len == other_len && self.start < other.start)
    }

    pub fn into_entity(self, text: &NormalizedText) -> Entity {
        let span = text.span(self.start, self.end);
        Entity::new(self.entity, EntityType::Noun, self.canonical, span, GAZETTEER_CONFIDENCE)
    }
}

/// Keep the better of `candidate` and whatever is already recorded for its entity
pub(crate) fn keep_best(best: &mut HashMap<String, GazetteerMatch>, candidate: GazetteerMatch) {
    match best.get(&candidate.entity) {
        Some(current) if !candidate.beats(current) => {},
        _ => {
            best.insert(candidate.entity.clone(), candidate);
        },
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    terms: Vec<GazetteerTerm>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vietnamese dishes, drinks and common products
    pub fn builtin() -> Self {
        let mut gazetteer = Self::new();
        gazetteer.add_terms(FOOD_ITEM, FOOD_ITEMS.iter().copied());
        gazetteer.add_terms(PRODUCT, PRODUCTS.iter().copied());
        gazetteer
    }

    /// Add a term; returns false when it normalizes to nothing or is
    /// already present (compared without diacritics)
    pub fn add_term(&mut self, entity: &str, term: &str) -> bool {
        let normalized = normalize(term);
        if normalized.is_empty() {
            return false;
        }
        let duplicate = self
            .terms
            .iter()
            .any(|t| t.entity == entity && t.normalized.folded() == normalized.folded());
        if duplicate {
            return false;
        }
        self.terms.push(GazetteerTerm {
            entity: entity.to_string(),
            canonical: term.trim().to_string(),
            normalized,
        });
        true
    }

    pub fn add_terms<'a>(&mut self, entity: &str, terms: impl IntoIterator<Item = &'a str>) {
        for term in terms {
            self.add_term(entity, term);
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Distinct entity names, in first-registration order
    pub fn entity_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for term in &self.terms {
            if !names.contains(&term.entity.as_str()) {
                names.push(&term.entity);
            }
        }
        names
    }

    /// Best match per entity name
    pub fn find_matches(&self, text: &NormalizedText) -> Vec<GazetteerMatch> {
        let mut best = HashMap::new();
        self.collect_matches(text, &mut best);
        let mut matches: Vec<GazetteerMatch> = best.into_values().collect();
        matches.sort_by(|a, b| a.entity.cmp(&b.entity));
        matches
    }

    pub(crate) fn collect_matches(
        &self,
        text: &NormalizedText,
        best: &mut HashMap<String, GazetteerMatch>,
    ) {
        for term in &self.terms {
            for start in 0..text.len() {
                if text.matches_at(start, &term.normalized) {
                    keep_best(
                        best,
                        GazetteerMatch {
                            entity: term.entity.clone(),
                            canonical: term.canonical.clone(),
                            start,
                            end: start + term.normalized.len(),
                        },
                    );
                }
            }
        }
    }
}
