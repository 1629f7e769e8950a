//! Extracted entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Amount of money ("50k", "20 nghìn")
    Price,
    /// Count of items ("2", "hai tô")
    Quantity,
    /// Clock time or relative time phrase
    Time,
    /// Gazetteer noun (food, product, or caller-registered)
    Noun,
    /// Honorific used to address someone, and what it implies
    Title,
}

/// A single extracted slot value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name, also the key in [`Entities`]
    pub name: String,
    pub entity_type: EntityType,
    /// Canonical value ("50", "19:30", "phở bò")
    pub value: String,
    /// Unit as written ("k", "đồng", "tô"), if any
    pub unit: Option<String>,
    /// Multiplier implied by the unit (1000 for "k")
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Matched span of the normalized input
    pub text: String,
    pub confidence: f32,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        entity_type: EntityType,
        value: impl Into<String>,
        text: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            name: name.into(),
            entity_type,
            value: value.into(),
            unit: None,
            multiplier: 1.0,
            text: text.into(),
            confidence,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>, multiplier: f64) -> Self {
        self.unit = Some(unit.into());
        self.multiplier = multiplier;
        self
    }

    /// Numeric value scaled by the unit multiplier, for price and quantity
    ///
    /// Accepts both `.` and `,` as separators: "50.000" is fifty thousand,
    /// "1,5" is one and a half.
    pub fn amount(&self) -> Option<f64> {
        let raw = &self.value;
        let parsed = if raw.contains(',') && !raw.contains('.') {
            let parts: Vec<&str> = raw.split(',').collect();
            if parts.len() == 2 && parts[1].len() != 3 {
                raw.replace(',', ".").parse::<f64>().ok()
            } else {
                raw.replace(',', "").parse::<f64>().ok()
            }
        } else if raw.matches('.').count() == 1 && raw.split('.').nth(1).map(str::len) != Some(3) {
            raw.parse::<f64>().ok()
        } else {
            raw.replace(['.', ','], "").parse::<f64>().ok()
        }?;
        Some(parsed * self.multiplier)
    }
}

/// Entities keyed by entity name
pub type Entities = HashMap<String, Entity>;
