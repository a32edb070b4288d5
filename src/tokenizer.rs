//! Whitespace/punctuation tokenization of sentences and running text.

use crate::normalize::clean_token;

/// Splits `text` into display words, keeping punctuation attached.
///
/// ```rust
/// use decodec::tokenizer::tokenize;
/// assert_eq!(tokenize("Hello, world!"), vec!["Hello,", "world!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Splits `text` into alignment tokens: surrounding punctuation is removed and
/// tokens left empty are dropped.
///
/// ```rust
/// use decodec::tokenizer::tokenize_clean;
/// assert_eq!(tokenize_clean("Don't worry-free!"), vec!["Don't", "worry-free"]);
/// ```
pub fn tokenize_clean(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(clean_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Splits running text into sentences.
///
/// A sentence ends after `.`, `!` or `?` when the terminator is followed by
/// whitespace and an uppercase letter, so "Mr. smith" stays together.
/// Terminators stay with their sentence.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = trimmed.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let end = idx + ch.len_utf8();
        let rest = &trimmed[end..];
        let after_space = rest.trim_start();
        if after_space.len() == rest.len() {
            continue;
        }
        if after_space.chars().next().is_some_and(char::is_uppercase) {
            let sentence = trimmed[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = trimmed.len() - after_space.len();
            while chars.peek().is_some_and(|&(next, _)| next < start) {
                chars.next();
            }
        }
    }

    let tail = trimmed[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}
