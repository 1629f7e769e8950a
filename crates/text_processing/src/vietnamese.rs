//! Vietnamese Language Utilities
//!
//! Word tables shared by the entity recognizers: number words, classifiers,
//! currency units, day periods, relative time phrases and honorifics.
//!
//! Single-word lookups take both forms of a token. A token typed with
//! diacritics must match the accented entry exactly (so "bà" is not "ba");
//! a token typed without any falls back to the folded comparison.

use once_cell::sync::Lazy;

use crate::normalizer::{fold_diacritics, normalize, NormalizedText};

struct Lexicon<T: 'static> {
    entries: Vec<(&'static str, String, T)>,
}

impl<T: Copy> Lexicon<T> {
    fn new(words: &[(&'static str, T)]) -> Self {
        Self {
            entries: words
                .iter()
                .map(|&(word, value)| (word, fold_diacritics(word), value))
                .collect(),
        }
    }

    fn lookup(&self, accented: &str, folded: &str) -> Option<(&'static str, T)> {
        let found = if accented.is_ascii() {
            self.entries.iter().find(|(_, f, _)| f == folded)
        } else {
            self.entries.iter().find(|(w, _, _)| *w == accented)
        };
        found.map(|&(word, _, value)| (word, value))
    }
}

static NUMBER_WORDS: Lazy<Lexicon<u32>> = Lazy::new(|| {
    Lexicon::new(&[
        ("một", 1),
        ("hai", 2),
        ("ba", 3),
        ("bốn", 4),
        ("tư", 4),
        ("năm", 5),
        ("lăm", 5),
        ("sáu", 6),
        ("bảy", 7),
        ("bẩy", 7),
        ("tám", 8),
        ("chín", 9),
        ("mười", 10),
    ])
});

static CLASSIFIERS: Lazy<Lexicon<()>> = Lazy::new(|| {
    Lexicon::new(&[
        ("bát", ()),
        ("tô", ()),
        ("ly", ()),
        ("cốc", ()),
        ("suất", ()),
        ("phần", ()),
        ("cái", ()),
        ("chiếc", ()),
        ("đĩa", ()),
        ("hộp", ()),
        ("chai", ()),
        ("lon", ()),
        ("miếng", ()),
        ("ổ", ()),
        ("gói", ()),
        ("quả", ()),
        ("con", ()),
        ("túi", ()),
        ("cuốn", ()),
        ("bộ", ()),
        ("đôi", ()),
        ("cân", ()),
        ("kg", ()),
    ])
});

static CURRENCY_UNITS: Lazy<Lexicon<f64>> = Lazy::new(|| {
    Lexicon::new(&[
        ("k", 1_000.0),
        ("nghìn", 1_000.0),
        ("ngàn", 1_000.0),
        ("triệu", 1_000_000.0),
        ("tr", 1_000_000.0),
        ("tỷ", 1_000_000_000.0),
        ("tỉ", 1_000_000_000.0),
        ("đồng", 1.0),
        ("đ", 1.0),
        ("vnd", 1.0),
        ("vnđ", 1.0),
    ])
});

static TIME_UNITS: Lazy<Lexicon<TimeUnit>> = Lazy::new(|| {
    Lexicon::new(&[
        ("giờ", TimeUnit::Hour),
        ("h", TimeUnit::Hour),
        ("phút", TimeUnit::Minute),
        ("giây", TimeUnit::Second),
        ("rưỡi", TimeUnit::HalfHour),
    ])
});

static DAY_PERIODS: Lazy<Lexicon<DayPeriod>> = Lazy::new(|| {
    Lexicon::new(&[
        ("sáng", DayPeriod::Morning),
        ("trưa", DayPeriod::Noon),
        ("chiều", DayPeriod::Afternoon),
        ("tối", DayPeriod::Evening),
        ("đêm", DayPeriod::Night),
    ])
});

/// Honorific → what it says about the addressee
static HONORIFICS: Lazy<Lexicon<&'static str>> = Lazy::new(|| {
    Lexicon::new(&[
        ("anh", "male"),
        ("chị", "female"),
        ("em", "younger"),
        ("ông", "elder_male"),
        ("bà", "elder_female"),
        ("cô", "miss"),
        ("chú", "uncle"),
    ])
});

/// Relative time phrases, longest first so overlapping phrases resolve to
/// the more specific one
pub static RELATIVE_TIME_PHRASES: Lazy<Vec<(&'static str, NormalizedText)>> = Lazy::new(|| {
    let mut phrases: Vec<(&'static str, NormalizedText)> = [
        "bây giờ",
        "mấy giờ",
        "bao giờ",
        "lúc nào",
        "hôm nay",
        "hôm qua",
        "ngày mai",
        "ngày kia",
        "sáng nay",
        "trưa nay",
        "chiều nay",
        "tối nay",
        "đêm nay",
        "sáng mai",
        "chiều mai",
        "tối mai",
        "tuần sau",
        "lát nữa",
    ]
    .into_iter()
    .map(|phrase| (phrase, normalize(phrase)))
    .collect();
    phrases.sort_by_key(|(_, normalized)| std::cmp::Reverse(normalized.len()));
    phrases
});

/// Words after which the next token is read as a form of address
pub static ADDRESS_CUES: Lazy<Vec<NormalizedText>> = Lazy::new(|| {
    ["chào", "xin chào", "cảm ơn", "cám ơn", "thưa", "dạ", "gửi", "tạm biệt", "hỏi"]
        .into_iter()
        .map(normalize)
        .collect()
});

/// Vocative particle ("anh ơi")
pub const VOCATIVE: &str = "ơi";

/// Words that measure or qualify time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hour,
    Minute,
    Second,
    /// "rưỡi", half past
    HalfHour,
}

/// Part of the day qualifying a clock hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Noon,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    /// Convert a 12-hour reading to 24-hour ("7 giờ tối" → 19)
    pub fn to_24h(self, hour: u32) -> u32 {
        match self {
            DayPeriod::Morning => hour,
            DayPeriod::Noon => {
                if (1..=4).contains(&hour) {
                    hour + 12
                } else {
                    hour
                }
            },
            DayPeriod::Afternoon | DayPeriod::Evening => {
                if hour < 12 {
                    hour + 12
                } else {
                    hour
                }
            },
            DayPeriod::Night => match hour {
                6..=11 => hour + 12,
                12 => 0,
                _ => hour,
            },
        }
    }
}

/// Convert a Vietnamese number word to its value
///
/// # Examples
/// ```
/// use viet_intent_text_processing::vietnamese::number_word;
/// assert_eq!(number_word("hai", "hai"), Some(2));
/// assert_eq!(number_word("mười", "muoi"), Some(10));
/// assert_eq!(number_word("muoi", "muoi"), Some(10));
/// ```
pub fn number_word(accented: &str, folded: &str) -> Option<u32> {
    NUMBER_WORDS.lookup(accented, folded).map(|(_, n)| n)
}

/// Whether the token is a counting classifier ("tô", "ly", "cái")
pub fn is_classifier(accented: &str, folded: &str) -> bool {
    CLASSIFIERS.lookup(accented, folded).is_some()
}

/// Multiplier for a currency unit ("k" → 1000, "triệu" → 1e6, "đồng" → 1)
pub fn currency_multiplier(accented: &str, folded: &str) -> Option<f64> {
    CURRENCY_UNITS.lookup(accented, folded).map(|(_, m)| m)
}

/// Time unit named by the token ("giờ", "phút", "h", "rưỡi")
pub fn time_unit(accented: &str, folded: &str) -> Option<TimeUnit> {
    TIME_UNITS.lookup(accented, folded).map(|(_, u)| u)
}

/// Day period named by the token, if any
pub fn day_period(accented: &str, folded: &str) -> Option<DayPeriod> {
    DAY_PERIODS.lookup(accented, folded).map(|(_, p)| p)
}

/// Canonical honorific and implied gender/role
///
/// Returns the accented form so "anh" and "chi" come back as "anh" and "chị".
pub fn honorific(accented: &str, folded: &str) -> Option<(&'static str, &'static str)> {
    HONORIFICS.lookup(accented, folded)
}
