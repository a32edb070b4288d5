//! Word normalization used for every word comparison in the crate.
//!
//! Stored and displayed words are never rewritten through [`normalize`]; it only
//! produces comparison keys.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Letters, digits and combining marks are kept so accented words survive.
    static ref NON_WORD_REGEX: Regex = Regex::new(r"[^\p{L}\p{N}\p{M}'\-]").unwrap();
    static ref EDGE_PUNCTUATION_REGEX: Regex =
        Regex::new(r"^[^\p{L}\p{N}\p{M}']+|[^\p{L}\p{N}\p{M}']+$").unwrap();
}

/// Returns the comparison key of `word`: everything except letters, digits,
/// apostrophes and hyphens is removed, and the result is lowercased.
///
/// ```rust
/// use decodec::normalize::normalize;
/// assert_eq!(normalize("Ich,"), "ich");
/// assert_eq!(normalize("¿Qué?"), "qué");
/// assert_eq!(normalize("Don't"), "don't");
/// ```
pub fn normalize(word: &str) -> String {
    NON_WORD_REGEX.replace_all(word, "").to_lowercase()
}

/// Returns `true` when both words share the same comparison key.
pub fn same_word(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Strips leading and trailing punctuation from a token while keeping its case
/// and any inner apostrophes or hyphens.
pub fn clean_token(word: &str) -> String {
    EDGE_PUNCTUATION_REGEX.replace_all(word, "").into_owned()
}
