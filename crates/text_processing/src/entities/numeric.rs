//! Price and quantity recognizers

use once_cell::sync::Lazy;
use regex::Regex;

use viet_intent_core::{Entity, EntityType};

use super::EntityRecognizer;
use crate::normalizer::NormalizedText;
use crate::vietnamese;

/// Number, optionally glued to a unit suffix ("50k", "50.000đ" folded to "50.000d")
static NUMBER_WITH_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+(?:[.,][0-9]+)*)([a-z]*)$").unwrap());

static PLAIN_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Amounts of money: "50k", "50.000đ", "20 nghìn", "1,5 triệu"
///
/// `value` is the number as written, `unit` the unit as written and
/// `multiplier` its scale, so [`Entity::amount`] gives the amount in đồng.
#[derive(Debug, Default)]
pub struct PriceRecognizer;

impl PriceRecognizer {
    const CONFIDENCE: f32 = 0.95;

    fn price_at(text: &NormalizedText, i: usize) -> Option<Entity> {
        let accented = &text.accented_tokens()[i];
        let caps = NUMBER_WITH_SUFFIX.captures(&text.folded_tokens()[i])?;
        let number = caps.get(1)?.as_str();
        let folded_suffix = caps.get(2)?.as_str();

        if !folded_suffix.is_empty() {
            // digits are identical in both forms, so the suffix starts at the same byte
            let suffix = accented.get(number.len()..)?;
            let multiplier = vietnamese::currency_multiplier(suffix, folded_suffix)?;
            return Some(
                Entity::new("price", EntityType::Price, number, accented.as_str(), Self::CONFIDENCE)
                    .with_unit(suffix, multiplier),
            );
        }

        let unit = text.accented_tokens().get(i + 1)?;
        let multiplier = vietnamese::currency_multiplier(unit, &text.folded_tokens()[i + 1])?;
        Some(
            Entity::new("price", EntityType::Price, number, text.span(i, i + 2), Self::CONFIDENCE)
                .with_unit(unit.as_str(), multiplier),
        )
    }
}

impl EntityRecognizer for PriceRecognizer {
    fn name(&self) -> &'static str {
        "price"
    }

    fn recognize(&self, text: &NormalizedText) -> Vec<Entity> {
        (0..text.len()).filter_map(|i| Self::price_at(text, i)).collect()
    }
}

/// Counts: a bare integer ("2 phở"), or a number word before a classifier
/// ("hai tô phở")
///
/// Integers followed by a currency or time unit belong to other recognizers
/// and are skipped.
#[derive(Debug, Default)]
pub struct QuantityRecognizer;

impl QuantityRecognizer {
    fn quantity_at(text: &NormalizedText, i: usize) -> Option<Entity> {
        let accented = text.accented_tokens();
        let folded = text.folded_tokens();
        let next = accented.get(i + 1).map(|a| (a.as_str(), folded[i + 1].as_str()));

        let classifier = next.filter(|(a, f)| vietnamese::is_classifier(a, f));

        if PLAIN_INTEGER.is_match(&folded[i]) {
            if let Some((a, f)) = next {
                if vietnamese::currency_multiplier(a, f).is_some()
                    || vietnamese::time_unit(a, f).is_some()
                {
                    return None;
                }
            }
            let value = folded[i].trim_start_matches('0');
            let value = if value.is_empty() { "0" } else { value };
            return Some(match classifier {
                Some((unit, _)) => {
                    Entity::new("quantity", EntityType::Quantity, value, text.span(i, i + 2), 0.9)
                        .with_unit(unit, 1.0)
                },
                None => Entity::new("quantity", EntityType::Quantity, value, accented[i].as_str(), 0.85),
            });
        }

        let (unit, _) = classifier?;
        let n = vietnamese::number_word(&accented[i], &folded[i])?;
        Some(
            Entity::new("quantity", EntityType::Quantity, n.to_string(), text.span(i, i + 2), 0.8)
                .with_unit(unit, 1.0),
        )
    }
}

impl EntityRecognizer for QuantityRecognizer {
    fn name(&self) -> &'static str {
        "quantity"
    }

    fn recognize(&self, text: &NormalizedText) -> Vec<Entity> {
        (0..text.len()).filter_map(|i| Self::quantity_at(text, i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;

    fn first(recognizer: &dyn EntityRecognizer, input: &str) -> Option<Entity> {
        recognizer.recognize(&normalize(input)).into_iter().next()
    }

    #[test]
    fn test_price_glued_unit() {
        let price = first(&PriceRecognizer, "giá 50k").unwrap();
        assert_eq!(price.value, "50");
        assert_eq!(price.unit.as_deref(), Some("k"));
        assert_eq!(price.text, "50k");
        assert_eq!(price.amount(), Some(50_000.0));
    }

    #[test]
    fn test_price_accented_suffix() {
        let price = first(&PriceRecognizer, "hết 50.000đ").unwrap();
        assert_eq!(price.value, "50.000");
        assert_eq!(price.unit.as_deref(), Some("đ"));
        assert_eq!(price.amount(), Some(50_000.0));
    }

    #[test]
    fn test_price_separate_unit() {
        let price = first(&PriceRecognizer, "khoảng 20 nghìn").unwrap();
        assert_eq!(price.value, "20");
        assert_eq!(price.unit.as_deref(), Some("nghìn"));
        assert_eq!(price.text, "20 nghìn");
        assert_eq!(price.amount(), Some(20_000.0));

        let price = first(&PriceRecognizer, "1,5 trieu").unwrap();
        assert_eq!(price.unit.as_deref(), Some("trieu"));
        assert_eq!(price.amount(), Some(1_500_000.0));
    }

    #[test]
    fn test_price_requires_unit() {
        assert!(first(&PriceRecognizer, "cho tôi 2 phở").is_none());
        assert!(first(&PriceRecognizer, "7h30").is_none());
    }

    #[test]
    fn test_quantity_digits() {
        let quantity = first(&QuantityRecognizer, "cho tôi 2 phở").unwrap();
        assert_eq!(quantity.value, "2");
        assert!(quantity.unit.is_none());
    }

    #[test]
    fn test_quantity_with_classifier() {
        let quantity = first(&QuantityRecognizer, "cho tôi 3 ly trà đá").unwrap();
        assert_eq!(quantity.value, "3");
        assert_eq!(quantity.unit.as_deref(), Some("ly"));
        assert_eq!(quantity.text, "3 ly");
    }

    #[test]
    fn test_quantity_number_word() {
        let quantity = first(&QuantityRecognizer, "cho tôi hai tô phở").unwrap();
        assert_eq!(quantity.value, "2");
        assert_eq!(quantity.unit.as_deref(), Some("tô"));
        assert_eq!(quantity.text, "hai tô");

        let quantity = first(&QuantityRecognizer, "cho toi hai to pho").unwrap();
        assert_eq!(quantity.value, "2");
    }

    #[test]
    fn test_number_word_needs_classifier() {
        // "ba" alone is ambiguous
        assert!(first(&QuantityRecognizer, "ba ơi").is_none());
    }

    #[test]
    fn test_quantity_skips_prices_and_times() {
        assert!(first(&QuantityRecognizer, "giá 20 nghìn").is_none());
        assert!(first(&QuantityRecognizer, "lúc 7 giờ").is_none());
        assert!(first(&QuantityRecognizer, "giá 50k").is_none());
    }
}
