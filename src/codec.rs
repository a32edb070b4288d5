//! Encoding and decoding between persisted [`WordAlignment`]s and editable
//! [`ReconciliationSession`]s.
//!
//! Multiple target words of one source word are stored as a single expression
//! joined by [`DELIMITER`]. This is a lossy string codec: a target word that
//! contains a hyphen itself ("E-Mail") decodes as two words.
//!
//! Decoding never re-sorts its input. Positions that disagree with array order
//! are reported as [`Error::DataIntegrity`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::{
    error::Error,
    normalize::{normalize, same_word},
    options::SessionOptions,
    session::{ReconciliationSession, SourceEntry},
    tokenizer::tokenize_clean,
    types::{Sentence, WordAlignment},
};

/// Separator between the words of a multi-word target expression.
pub const DELIMITER: &str = "-";

/// Splits a target expression into its words, dropping empty pieces.
pub fn split_expression(expression: &str) -> Vec<String> {
    expression
        .split(DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins target words into one expression.
pub fn join_expression<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Checks that the i-th alignment carries position `i`.
pub fn check_positions(alignments: &[WordAlignment]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for alignment in alignments {
        if !seen.insert(alignment.position) {
            return Err(Error::data_integrity(format!(
                "duplicate position {} (source word `{}`)",
                alignment.position, alignment.source_word
            )));
        }
    }

    if let Some(missing) = (0..alignments.len()).find(|p| !seen.contains(p)) {
        return Err(Error::data_integrity(format!(
            "positions are not contiguous: {} is missing",
            missing
        )));
    }

    if let Some((index, alignment)) = alignments
        .iter()
        .enumerate()
        .find(|(index, alignment)| alignment.position != *index)
    {
        return Err(Error::data_integrity(format!(
            "position {} of `{}` found at index {}",
            alignment.position, alignment.source_word, index
        )));
    }

    Ok(())
}

/// Opens a session on an existing sentence.
pub fn decode(sentence: &Sentence, options: SessionOptions) -> Result<ReconciliationSession, Error> {
    decode_alignments(
        &sentence.source_text,
        &sentence.natural_translation,
        &sentence.word_alignments,
        options,
    )
}

/// Builds a session from persisted or drafted alignments.
///
/// Source words of `source_text` that no alignment mentions become empty
/// entries placed right after the nearest preceding source word, so the
/// validator can point at them. Alignments repeating a source word are merged
/// into one entry. Source words are compared with [`same_word`], as in
/// [`ReconciliationSession::new`].
pub fn decode_alignments(
    source_text: &str,
    natural_translation: &str,
    alignments: &[WordAlignment],
    options: SessionOptions,
) -> Result<ReconciliationSession, Error> {
    check_positions(alignments)?;

    let mut entries: Vec<SourceEntry> = Vec::new();
    let mut owners: HashMap<String, String> = HashMap::new();

    for alignment in alignments {
        let parts = split_expression(&alignment.target_expression);
        for part in &parts {
            let key = normalize(part);
            if key.is_empty() {
                continue;
            }
            if let Some(owner) = owners.insert(key, alignment.source_word.clone()) {
                return Err(Error::data_integrity(format!(
                    "target word `{}` is assigned to both `{}` and `{}`",
                    part, owner, alignment.source_word
                )));
            }
        }

        match entries
            .iter_mut()
            .find(|e| same_word(&e.source_word, &alignment.source_word))
        {
            Some(entry) => {
                warn!(
                    source_word = %alignment.source_word,
                    position = alignment.position,
                    "merging repeated source word"
                );
                entry.target_words.extend(parts);
            }
            None => entries.push(SourceEntry::new(alignment.source_word.clone(), parts)),
        }
    }

    let mut cursor: Option<usize> = None;
    for token in tokenize_clean(source_text) {
        if let Some(idx) = entries
            .iter()
            .position(|e| same_word(&e.source_word, &token))
        {
            // A repeated token must not pull the cursor back.
            cursor = Some(cursor.map_or(idx, |c| c.max(idx)));
            continue;
        }
        let at = cursor.map_or(0, |c| c + 1);
        entries.insert(at, SourceEntry::new(token, Vec::new()));
        cursor = Some(at);
    }

    debug!(
        alignments = alignments.len(),
        entries = entries.len(),
        "decoded alignments"
    );
    Ok(ReconciliationSession::from_entries(
        entries,
        natural_translation,
        options,
    ))
}

/// Encodes a session: one alignment per non-empty entry, in mapping order,
/// with positions numbered afresh from zero.
pub fn encode(session: &ReconciliationSession) -> Vec<WordAlignment> {
    session
        .entries()
        .iter()
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(position, entry)| {
            WordAlignment::new(
                entry.source_word.clone(),
                join_expression(&entry.target_words),
                position,
            )
        })
        .collect()
}
