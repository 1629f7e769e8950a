//! Vietnamese Text Processing
//!
//! This crate turns raw Vietnamese utterances into intents and entities:
//! - **Normalization**: NFC, lowercasing, punctuation stripping, and a
//!   diacritic-free folded form kept alongside the accented one
//! - **Intent Detection**: pattern/keyword scoring against registered intents
//! - **Entity Extraction**: prices, quantities, times, gazetteer nouns and
//!   forms of address
//!
//! # Example
//!
//! ```
//! use viet_intent_text_processing::IntentEngine;
//!
//! let engine = IntentEngine::with_default_intents();
//! let result = engine.detect("xin chao");
//!
//! assert_eq!(result.intent, "greeting");
//! println!("{}", result.response_template);
//! ```

pub mod entities;
pub mod intent;
pub mod normalizer;
pub mod vietnamese;

pub use entities::{EntityExtractor, EntityRecognizer, Gazetteer};
pub use intent::{default_intents, IntentEngine, ScoreBreakdown};
pub use normalizer::{normalize, NormalizedText};

// Re-export core and config types callers need alongside the engine
pub use viet_intent_config::{LoadWarning, ModelDescription, ModelFormat};
pub use viet_intent_core::{
    DetectionResult, Entities, Entity, EntityType, Error, IntentDefinition, Result, ScoredIntent,
    UNKNOWN_INTENT,
};
