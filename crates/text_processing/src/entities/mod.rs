//! Entity Extraction
//!
//! Pulls slot values out of normalized Vietnamese text:
//! - Prices with Vietnamese units ("50k", "20 nghìn", "1,5 triệu", "50.000đ")
//! - Quantities ("2", "hai tô")
//! - Times ("7:30", "7 giờ tối", "ngày mai")
//! - Gazetteer nouns (food items, products, plus terms registered with intents)
//! - Forms of address and the gender/role they imply
//!
//! Each recognizer sees the input on its own; results are merged by entity
//! name, first value per name.
//!
//! # Example
//!
//! ```
//! use viet_intent_text_processing::entities::EntityExtractor;
//! use viet_intent_text_processing::normalizer::normalize;
//!
//! let extractor = EntityExtractor::new();
//! let entities = extractor.extract(&normalize("cho tôi hai tô phở bò, giá 50k"));
//!
//! assert_eq!(entities["quantity"].value, "2");
//! assert_eq!(entities["food_item"].value, "phở bò");
//! assert_eq!(entities["price"].amount(), Some(50_000.0));
//! ```

mod gazetteer;
mod numeric;
mod time;
mod title;

pub use gazetteer::{Gazetteer, GazetteerMatch, FOOD_ITEM, PRODUCT};
pub use numeric::{PriceRecognizer, QuantityRecognizer};
pub use time::{TimeRecognizer, RELATIVE_UNIT};
pub use title::TitleRecognizer;

use std::collections::HashMap;
use std::iter;

use viet_intent_core::{Entities, Entity};

use crate::normalizer::{normalize, NormalizedText};

/// A source of entities
///
/// Implementations must not depend on each other's output.
pub trait EntityRecognizer: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Entities found in `text`, in input order
    fn recognize(&self, text: &NormalizedText) -> Vec<Entity>;
}

/// Runs every recognizer and gazetteer over an input
pub struct EntityExtractor {
    recognizers: Vec<Box<dyn EntityRecognizer>>,
    gazetteer: Gazetteer,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntityExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityExtractor")
            .field(
                "recognizers",
                &self.recognizers.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("gazetteer_terms", &self.gazetteer.len())
            .finish()
    }
}

impl EntityExtractor {
    /// Built-in recognizers and the built-in food/product gazetteer
    pub fn new() -> Self {
        Self {
            recognizers: vec![
                Box::new(PriceRecognizer),
                Box::new(QuantityRecognizer),
                Box::new(TimeRecognizer),
                Box::new(TitleRecognizer::default()),
            ],
            gazetteer: Gazetteer::builtin(),
        }
    }

    /// Extractor with nothing registered
    pub fn empty() -> Self {
        Self {
            recognizers: Vec::new(),
            gazetteer: Gazetteer::new(),
        }
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn EntityRecognizer>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    /// Add terms to the extractor's own gazetteer
    pub fn with_terms<'a>(mut self, entity: &str, terms: impl IntoIterator<Item = &'a str>) -> Self {
        self.gazetteer.add_terms(entity, terms);
        self
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Normalize and extract
    pub fn extract_str(&self, text: &str) -> Entities {
        self.extract(&normalize(text))
    }

    pub fn extract(&self, text: &NormalizedText) -> Entities {
        self.extract_with(text, iter::empty())
    }

    /// Extract, also consulting `extra` gazetteers
    ///
    /// Gazetteer hits for the same entity name compete across all
    /// gazetteers: the longest match wins, then the earliest.
    pub fn extract_with<'a>(
        &self,
        text: &NormalizedText,
        extra: impl IntoIterator<Item = &'a Gazetteer>,
    ) -> Entities {
        let mut entities = Entities::new();
        if text.is_empty() {
            return entities;
        }

        for recognizer in &self.recognizers {
            for entity in recognizer.recognize(text) {
                entities.entry(entity.name.clone()).or_insert(entity);
            }
        }

        let mut best: HashMap<String, GazetteerMatch> = HashMap::new();
        for gazetteer in iter::once(&self.gazetteer).chain(extra.into_iter().map(|g| -> &Gazetteer { g })) {
            gazetteer.collect_matches(text, &mut best);
        }
        for (name, found) in best {
            entities.entry(name).or_insert_with(|| found.into_entity(text));
        }

        tracing::trace!(count = entities.len(), "Extracted entities");
        entities
    }
}
