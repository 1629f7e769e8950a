//! Core types for the Vietnamese intent engine
//!
//! This crate provides the foundational types shared by every other crate:
//! - Intent definitions as supplied by callers or a model description
//! - Detection results handed back to callers
//! - Extracted entities
//! - Error types
//!
//! Nothing in here performs matching; see `viet-intent-text-processing`.

pub mod detection;
pub mod entity;
pub mod error;
pub mod intent;

pub use detection::{DetectionResult, ScoredIntent, UNKNOWN_INTENT};
pub use entity::{Entities, Entity, EntityType};
pub use error::{Error, Result};
pub use intent::IntentDefinition;
