//! Intent Detection
//!
//! Matches Vietnamese utterances against registered intents and extracts
//! entities in the same pass.
//!
//! # Features
//!
//! - Patterns and keywords normalized once at registration
//! - Diacritic-insensitive matching ("xin chao" finds "xin chào")
//! - Per-intent thresholds with an engine-wide default
//! - Model descriptions in JSON or YAML
//! - Built-in chit-chat intents
//!
//! # Example
//!
//! ```
//! use viet_intent_text_processing::intent::IntentEngine;
//!
//! let engine = IntentEngine::with_default_intents();
//! let result = engine.detect("Giá bánh mì bao nhiêu?");
//!
//! assert_eq!(result.intent, "ask_price");
//! assert_eq!(result.entities["food_item"].value, "bánh mì");
//! ```

mod defaults;
mod engine;
mod index;
mod scorer;

pub use defaults::default_intents;
pub use engine::IntentEngine;
pub use index::{IndexedIntent, IndexedPattern, IntentRegistry};
pub use scorer::{jaccard, QueryTokens, ScoreBreakdown, Scorer};
