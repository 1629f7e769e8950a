//! Time recognizer
//!
//! Clock times come out as 24-hour `HH:MM` ("7 giờ tối" → "19:00"); relative
//! phrases ("ngày mai", "bây giờ") come out as written in the lexicon with
//! unit "relative". A clock time takes precedence over a relative phrase in
//! the same input.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use viet_intent_core::{Entity, EntityType};

use super::EntityRecognizer;
use crate::normalizer::NormalizedText;
use crate::vietnamese::{self, TimeUnit, RELATIVE_TIME_PHRASES};

/// "7:30", "7h30", "7h"
static CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})(?::([0-9]{2})|h([0-9]{2})?)$").unwrap());

static SMALL_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,2}$").unwrap());

pub const RELATIVE_UNIT: &str = "relative";

#[derive(Debug, Default)]
pub struct TimeRecognizer;

impl TimeRecognizer {
    fn small_number(text: &NormalizedText, i: usize) -> Option<u32> {
        let folded = text.folded_tokens().get(i)?;
        if SMALL_INTEGER.is_match(folded) {
            return folded.parse().ok();
        }
        vietnamese::number_word(&text.accented_tokens()[i], folded)
    }

    fn unit_at(text: &NormalizedText, i: usize) -> Option<TimeUnit> {
        let accented = text.accented_tokens().get(i)?;
        vietnamese::time_unit(accented, &text.folded_tokens()[i])
    }

    /// Hour, minute and the token index just past the clock expression
    fn clock_at(text: &NormalizedText, i: usize) -> Option<(u32, u32, usize)> {
        if let Some(caps) = CLOCK.captures(&text.folded_tokens()[i]) {
            let hour = caps.get(1)?.as_str().parse().ok()?;
            let minute = match caps.get(2).or_else(|| caps.get(3)) {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            return Some((hour, minute, i + 1));
        }

        let hour = Self::small_number(text, i)?;
        if Self::unit_at(text, i + 1) != Some(TimeUnit::Hour) {
            return None;
        }
        let mut end = i + 2;
        let mut minute = 0;

        if Self::unit_at(text, end) == Some(TimeUnit::HalfHour) {
            minute = 30;
            end += 1;
        } else if let Some(m) = Self::small_number(text, end) {
            minute = m;
            end += 1;
            if Self::unit_at(text, end) == Some(TimeUnit::Minute) {
                end += 1;
            }
        }

        Some((hour, minute, end))
    }

    fn absolute(text: &NormalizedText) -> Option<Entity> {
        for i in 0..text.len() {
            let Some((hour, minute, mut end)) = Self::clock_at(text, i) else {
                continue;
            };

            let mut hour = hour;
            if let Some(accented) = text.accented_tokens().get(end) {
                if let Some(period) = vietnamese::day_period(accented, &text.folded_tokens()[end]) {
                    hour = period.to_24h(hour);
                    end += 1;
                }
            }

            let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                tracing::debug!(hour, minute, "Ignoring out-of-range clock time");
                continue;
            };

            return Some(Entity::new(
                "time",
                EntityType::Time,
                time.format("%H:%M").to_string(),
                text.span(i, end),
                0.9,
            ));
        }
        None
    }

    fn relative(text: &NormalizedText) -> Option<Entity> {
        (0..text.len()).find_map(|start| {
            RELATIVE_TIME_PHRASES.iter().find_map(|(phrase, normalized)| {
                text.matches_at(start, normalized).then(|| {
                    Entity::new(
                        "time",
                        EntityType::Time,
                        *phrase,
                        text.span(start, start + normalized.len()),
                        0.8,
                    )
                    .with_unit(RELATIVE_UNIT, 1.0)
                })
            })
        })
    }
}

impl EntityRecognizer for TimeRecognizer {
    fn name(&self) -> &'static str {
        "time"
    }

    fn recognize(&self, text: &NormalizedText) -> Vec<Entity> {
        Self::absolute(text)
            .or_else(|| Self::relative(text))
            .into_iter()
            .collect()
    }
}
