//! Vietnamese Text Normalization
//!
//! Canonicalizes raw input so that stored patterns and runtime queries are
//! compared on equal terms. Every string goes through the same steps:
//!
//! 1. Unicode NFC composition (decomposed tone marks become precomposed letters)
//! 2. Unicode lowercasing (`Đ` → `đ`, `Ư` → `ư`, ...)
//! 3. Punctuation becomes a token boundary, whitespace runs collapse
//! 4. Whitespace tokenization
//!
//! Two forms are kept side by side: the accented form, and a folded form with
//! every diacritic removed (`chào` → `chao`, `đồng` → `dong`). Users type both,
//! so matchers accept a hit on either.
//!
//! # Example
//!
//! ```
//! use viet_intent_text_processing::normalizer::normalize;
//!
//! let text = normalize("  Xin CHÀO, bạn!! ");
//! assert_eq!(text.accented(), "xin chào bạn");
//! assert_eq!(text.folded(), "xin chao ban");
//! assert_eq!(text.len(), 3);
//! ```

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalized form of one input string
///
/// Built fresh for every input; holds no references to shared state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    accented: String,
    folded: String,
    accented_tokens: Vec<String>,
    folded_tokens: Vec<String>,
}

impl NormalizedText {
    /// Lowercased text with diacritics, single-space separated
    pub fn accented(&self) -> &str {
        &self.accented
    }

    /// Lowercased ASCII-folded text, single-space separated
    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn accented_tokens(&self) -> &[String] {
        &self.accented_tokens
    }

    pub fn folded_tokens(&self) -> &[String] {
        &self.folded_tokens
    }

    /// Token count
    pub fn len(&self) -> usize {
        self.accented_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accented_tokens.is_empty()
    }

    /// Whether either form equals the other text's corresponding form
    pub fn same_as(&self, other: &NormalizedText) -> bool {
        !self.is_empty() && (self.accented == other.accented || self.folded == other.folded)
    }

    /// Whether the accented forms are equal, tone marks included
    pub fn same_accents(&self, other: &NormalizedText) -> bool {
        !self.is_empty() && self.accented == other.accented
    }

    /// Whether `phrase` occurs as consecutive tokens, in either form
    pub fn contains_phrase(&self, phrase: &NormalizedText) -> bool {
        contains_sequence(&self.accented_tokens, &phrase.accented_tokens)
            || contains_sequence(&self.folded_tokens, &phrase.folded_tokens)
    }

    /// Whether `phrase` starts at token `start`, comparing token by token
    ///
    /// Stricter than [`contains_phrase`](Self::contains_phrase): when both
    /// tokens carry diacritics they must agree exactly, so "bảy giờ" does not
    /// match "bây giờ". A token typed without diacritics falls back to the
    /// folded comparison.
    pub fn matches_at(&self, start: usize, phrase: &NormalizedText) -> bool {
        let n = phrase.len();
        if n == 0 || start + n > self.len() {
            return false;
        }
        (0..n).all(|k| self.token_agrees(start + k, phrase, k))
    }

    /// Token-level variant of [`matches_at`](Self::matches_at)
    pub fn token_agrees(&self, index: usize, other: &NormalizedText, other_index: usize) -> bool {
        match (
            self.accented_tokens.get(index),
            other.accented_tokens.get(other_index),
        ) {
            (Some(a), Some(b)) => {
                if a.is_ascii() || b.is_ascii() {
                    self.folded_tokens[index] == other.folded_tokens[other_index]
                } else {
                    a == b
                }
            },
            _ => false,
        }
    }

    /// Accented tokens `start..end` joined with spaces
    pub fn span(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        self.accented_tokens[start..end].join(" ")
    }
}

fn contains_sequence(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Normalize raw text. Never fails; empty or punctuation-only input yields
/// an empty result.
pub fn normalize(text: &str) -> NormalizedText {
    let composed: String = text.nfc().collect();
    let lowered = composed.to_lowercase();
    let cleaned = replace_punctuation(&lowered);

    let accented_tokens: Vec<String> = cleaned.split_whitespace().map(str::to_string).collect();
    let folded_tokens: Vec<String> = accented_tokens.iter().map(|t| fold_diacritics(t)).collect();

    NormalizedText {
        accented: accented_tokens.join(" "),
        folded: folded_tokens.join(" "),
        accented_tokens,
        folded_tokens,
    }
}

/// Remove Vietnamese diacritics: tone marks, vowel hooks/breves/circumflexes,
/// and the stroke on `đ`
pub fn fold_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            _ => c,
        })
        .collect()
}

/// Replace everything that is not part of a word or a number with a space
///
/// `:`, `.` and `,` survive between two digits so "7:30", "50.000" and "1,5"
/// stay single tokens.
fn replace_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if matches!(c, ':' | '.' | ',')
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit())
        {
            out.push(c);
        } else {
            out.push(' ');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_fold() {
        let text = normalize("ĐẶT MÓN Phở Bò");
        assert_eq!(text.accented(), "đặt món phở bò");
        assert_eq!(text.folded(), "dat mon pho bo");
    }

    #[test]
    fn test_fold_all_vowel_families() {
        assert_eq!(fold_diacritics("àáảãạăắằẳẵặâấầẩẫậ"), "aaaaaaaaaaaaaaaaa");
        assert_eq!(fold_diacritics("èéẻẽẹêếềểễệ"), "eeeeeeeeeee");
        assert_eq!(fold_diacritics("ìíỉĩị"), "iiiii");
        assert_eq!(fold_diacritics("òóỏõọôốồổỗộơớờởỡợ"), "ooooooooooooooooo");
        assert_eq!(fold_diacritics("ùúủũụưứừửữự"), "uuuuuuuuuuu");
        assert_eq!(fold_diacritics("ỳýỷỹỵ"), "yyyyy");
        assert_eq!(fold_diacritics("đĐ"), "dD");
    }

    #[test]
    fn test_decomposed_input_matches_precomposed() {
        // "chào" typed as "a" + combining grave accent
        let decomposed = normalize("cha\u{0300}o");
        let precomposed = normalize("chào");
        assert_eq!(decomposed, precomposed);
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        let text = normalize("  giá...bao   nhiêu?!\t\n");
        assert_eq!(text.accented(), "giá bao nhiêu");
        assert_eq!(text.accented_tokens(), &["giá", "bao", "nhiêu"]);
    }

    #[test]
    fn test_numeric_literals_survive() {
        let text = normalize("hẹn lúc 7:30, giá 50.000đ hoặc 1,5 triệu.");
        assert_eq!(
            text.folded_tokens(),
            &["hen", "luc", "7:30", "gia", "50.000d", "hoac", "1,5", "trieu"]
        );
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "   ", "?!...", "\n\t"] {
            let text = normalize(input);
            assert!(text.is_empty());
            assert_eq!(text.accented(), "");
            assert_eq!(text.folded(), "");
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(normalize("Chào bạn nhé"), normalize("Chào bạn nhé"));
    }

    #[test]
    fn test_same_as_either_form() {
        let pattern = normalize("xin chào");
        assert!(normalize("Xin chào!").same_as(&pattern));
        assert!(normalize("xin chao").same_as(&pattern));
        assert!(!normalize("xin").same_as(&pattern));
        assert!(!normalize("").same_as(&normalize("")));

        assert!(normalize("XIN CHÀO").same_accents(&pattern));
        assert!(!normalize("xin chao").same_accents(&pattern));
    }

    #[test]
    fn test_contains_phrase() {
        let query = normalize("giá bánh mì bao nhiêu");
        assert!(query.contains_phrase(&normalize("bao nhiêu")));
        assert!(query.contains_phrase(&normalize("bao nhieu")));
        assert!(query.contains_phrase(&normalize("bánh mì")));
        // tokens must be consecutive
        assert!(!query.contains_phrase(&normalize("giá nhiêu")));
        // no substring matches inside tokens
        assert!(!query.contains_phrase(&normalize("an")));
    }

    #[test]
    fn test_matches_at_respects_diacritics() {
        let accented = normalize("bảy giờ tối");
        assert!(!accented.matches_at(0, &normalize("bây giờ")));
        assert!(accented.matches_at(0, &normalize("bảy giờ")));

        let plain = normalize("bay gio toi");
        assert!(plain.matches_at(0, &normalize("bây giờ")));

        let mixed = normalize("bánh mi");
        assert!(mixed.matches_at(0, &normalize("bánh mì")));
        assert!(!mixed.matches_at(1, &normalize("bánh mì")));
    }

    #[test]
    fn test_span() {
        let text = normalize("cho tôi hai tô phở");
        assert_eq!(text.span(2, 4), "hai tô");
        assert_eq!(text.span(3, 99), "tô phở");
        assert_eq!(text.span(4, 2), "");
    }
}
