//! The reconciliation session: mutable editing state for one sentence.
//!
//! A session maps every source word to an ordered list of target words taken
//! from the natural translation. Target words are compared through
//! [`normalize`], and a target word is assigned to at most one source word at
//! any time. Every mutation checks its preconditions before touching state, so
//! a failed call leaves the session exactly as it was and notifies nobody.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::{
    codec,
    error::Error,
    normalize::{normalize, same_word},
    notifier::{ChangeEvent, ChangeNotifier, Direction, SubscriptionId},
    options::SessionOptions,
    tokenizer::tokenize_clean,
    traits::Observer,
    types::Draft,
};

/// One source word with the target words assigned to it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntry {
    pub source_word: String,
    pub target_words: Vec<String>,
}

impl SourceEntry {
    pub fn new(source_word: impl Into<String>, target_words: Vec<String>) -> Self {
        Self {
            source_word: source_word.into(),
            target_words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.target_words.is_empty()
    }

    fn position_of(&self, key: &str) -> Option<usize> {
        self.target_words.iter().position(|w| normalize(w) == key)
    }
}

/// Summary of [`ReconciliationSession::resync_from_new_translation`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResyncReport {
    /// Assigned words removed because the new translation no longer has them.
    pub dropped: Vec<String>,
    /// Words of the new translation that were not known before.
    pub added: Vec<String>,
}

#[derive(Debug)]
pub struct ReconciliationSession {
    entries: Vec<SourceEntry>,
    natural_translation: String,
    /// Tokens of the natural translation in reading order, one per comparison key.
    target_words: Vec<String>,
    options: SessionOptions,
    notifier: ChangeNotifier,
}

impl ReconciliationSession {
    /// Starts a session for a sentence without alignment: every source word
    /// is unassigned and every natural-translation word is in the pool.
    ///
    /// Source words that compare equal through [`same_word`] share one entry,
    /// spelled as their first occurrence.
    pub fn new(source_text: &str, natural_translation: &str, options: SessionOptions) -> Self {
        let mut entries: Vec<SourceEntry> = Vec::new();
        for token in tokenize_clean(source_text) {
            if !entries.iter().any(|e| same_word(&e.source_word, &token)) {
                entries.push(SourceEntry::new(token, Vec::new()));
            }
        }
        Self::from_entries(entries, natural_translation, options)
    }

    /// Starts a session from a provider draft for `source_text`.
    pub fn from_draft(
        source_text: &str,
        draft: &Draft,
        options: SessionOptions,
    ) -> Result<Self, Error> {
        codec::decode_alignments(
            source_text,
            &draft.natural_translation,
            &draft.alignments,
            options,
        )
    }

    pub(crate) fn from_entries(
        entries: Vec<SourceEntry>,
        natural_translation: &str,
        options: SessionOptions,
    ) -> Self {
        let target_words = unique_tokens(options.target_tokens(natural_translation));
        Self {
            entries,
            natural_translation: natural_translation.to_string(),
            target_words,
            options,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn natural_translation(&self) -> &str {
        &self.natural_translation
    }

    /// Tokens of the natural translation, in reading order.
    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    /// All source entries, in mapping order.
    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    pub fn source_words(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.source_word.as_str()).collect()
    }

    /// Target words assigned to `source_word`, or `None` for an unknown key.
    pub fn assigned_words(&self, source_word: &str) -> Option<&[String]> {
        self.entry_index(source_word)
            .map(|idx| self.entries[idx].target_words.as_slice())
    }

    /// Natural-translation words not assigned to any source word.
    pub fn unassigned_pool(&self) -> Vec<String> {
        let assigned = self.assigned_keys(None);
        self.target_words
            .iter()
            .filter(|w| !assigned.contains(&normalize(w)))
            .cloned()
            .collect()
    }

    pub fn has_unassigned_words(&self) -> bool {
        !self.unassigned_pool().is_empty()
    }

    /// Assigned words that do not occur in the natural translation.
    pub fn foreign_words(&self) -> Vec<String> {
        let known: HashSet<String> = self.target_words.iter().map(|w| normalize(w)).collect();
        self.entries
            .iter()
            .flat_map(|e| e.target_words.iter())
            .filter(|w| !known.contains(&normalize(w)))
            .cloned()
            .collect()
    }

    /// Words that may appear in the column of `for_source_word` right now:
    /// the unassigned pool plus that column's own words, in the order they
    /// read in the natural translation.
    ///
    /// Foreign words of the column follow at the end, in their list order.
    /// An unknown source word contributes nothing.
    pub fn available_target_words(&self, for_source_word: Option<&str>) -> Vec<String> {
        let own = for_source_word.and_then(|s| self.entry_index(s));
        let taken = self.assigned_keys(own);
        let mut available: Vec<String> = self
            .target_words
            .iter()
            .filter(|w| !taken.contains(&normalize(w)))
            .cloned()
            .collect();

        if let Some(idx) = own {
            let known: HashSet<String> =
                self.target_words.iter().map(|w| normalize(w)).collect();
            available.extend(
                self.entries[idx]
                    .target_words
                    .iter()
                    .filter(|w| !known.contains(&normalize(w)))
                    .cloned(),
            );
        }
        available
    }

    /// Registers an observer for change events.
    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.notifier.len()
    }

    /// Appends `target_word` to the list of `source_word`, taking it away from
    /// wherever it currently is (another source word, the same one, or the pool).
    pub fn assign(&mut self, source_word: &str, target_word: &str) -> Result<(), Error> {
        let entry_idx = self
            .entry_index(source_word)
            .ok_or_else(|| Error::UnknownSourceWord(source_word.to_string()))?;

        let key = normalize(target_word);
        if key.is_empty() {
            return Err(Error::UnknownTargetWord(target_word.to_string()));
        }

        let located = self.locate(&key);
        let word = match located {
            Some((idx, pos)) => self.entries[idx].target_words[pos].clone(),
            None => match self.target_words.iter().find(|w| normalize(w) == key) {
                Some(known) => known.clone(),
                None if self.options.allow_foreign_words => target_word.to_string(),
                None => return Err(Error::UnknownTargetWord(target_word.to_string())),
            },
        };

        let previous_owner = located.map(|(idx, pos)| {
            self.entries[idx].target_words.remove(pos);
            self.entries[idx].source_word.clone()
        });
        self.entries[entry_idx].target_words.push(word.clone());

        debug!(source_word, target_word = %word, ?previous_owner, "assigned target word");
        self.emit(ChangeEvent::Assigned {
            source_word: self.entries[entry_idx].source_word.clone(),
            target_word: word,
            previous_owner,
        });
        Ok(())
    }

    /// Removes `target_word` from `source_word`, returning it to the pool.
    pub fn unassign(&mut self, source_word: &str, target_word: &str) -> Result<(), Error> {
        let entry_idx = self
            .entry_index(source_word)
            .ok_or_else(|| Error::UnknownSourceWord(source_word.to_string()))?;
        let pos = self.entries[entry_idx]
            .position_of(&normalize(target_word))
            .ok_or_else(|| Error::not_assigned(source_word, target_word))?;

        let word = self.entries[entry_idx].target_words.remove(pos);

        debug!(source_word, target_word = %word, "unassigned target word");
        self.emit(ChangeEvent::Unassigned {
            source_word: self.entries[entry_idx].source_word.clone(),
            target_word: word,
        });
        Ok(())
    }

    /// Moves `target_word` one step within the list of `source_word`.
    /// At either end of the list this is a no-op.
    pub fn reorder(
        &mut self,
        source_word: &str,
        target_word: &str,
        direction: Direction,
    ) -> Result<(), Error> {
        let entry_idx = self
            .entry_index(source_word)
            .ok_or_else(|| Error::UnknownSourceWord(source_word.to_string()))?;
        let entry = &mut self.entries[entry_idx];
        let from = entry
            .position_of(&normalize(target_word))
            .ok_or_else(|| Error::not_assigned(source_word, target_word))?;

        let to = match direction {
            Direction::Earlier => from.saturating_sub(1),
            Direction::Later => (from + 1).min(entry.target_words.len() - 1),
        };
        entry.target_words.swap(from, to);
        let word = entry.target_words[to].clone();
        let owner = entry.source_word.clone();

        debug!(source_word, target_word = %word, from, to, "reordered target word");
        self.emit(ChangeEvent::Reordered {
            source_word: owner,
            target_word: word,
            from,
            to,
        });
        Ok(())
    }

    /// Replaces the natural translation.
    ///
    /// Assigned words missing from the new text are dropped, new words join
    /// the pool, and every other assignment stays as it is.
    pub fn resync_from_new_translation(&mut self, new_text: &str) -> ResyncReport {
        let new_words = unique_tokens(self.options.target_tokens(new_text));
        let new_keys: HashSet<String> = new_words.iter().map(|w| normalize(w)).collect();
        let old_keys: HashSet<String> = self.target_words.iter().map(|w| normalize(w)).collect();

        let mut report = ResyncReport::default();
        for entry in &mut self.entries {
            entry.target_words.retain(|word| {
                let keep = new_keys.contains(&normalize(word));
                if !keep {
                    report.dropped.push(word.clone());
                }
                keep
            });
        }
        report.added = new_words
            .iter()
            .filter(|w| !old_keys.contains(&normalize(w)))
            .cloned()
            .collect();

        self.natural_translation = new_text.to_string();
        self.target_words = new_words;

        debug!(
            dropped = report.dropped.len(),
            added = report.added.len(),
            "resynced natural translation"
        );
        self.emit(ChangeEvent::Resynced {
            dropped: report.dropped.clone(),
            added: report.added.clone(),
        });
        report
    }

    /// Returns every assigned word to the pool.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.target_words.clear();
        }
        debug!("cleared all assignments");
        self.emit(ChangeEvent::Cleared);
    }

    fn entry_index(&self, source_word: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| same_word(&e.source_word, source_word))
    }

    fn locate(&self, key: &str) -> Option<(usize, usize)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(idx, e)| e.position_of(key).map(|pos| (idx, pos)))
    }

    /// Comparison keys of every assigned word, except those of `skip`.
    fn assigned_keys(&self, skip: Option<usize>) -> HashSet<String> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != skip)
            .flat_map(|(_, e)| e.target_words.iter().map(|w| normalize(w)))
            .collect()
    }

    fn emit(&mut self, event: ChangeEvent) {
        let mut observers = self.notifier.detach();
        ChangeNotifier::dispatch(&mut observers, &event, self);
        self.notifier.reattach(observers);
    }
}

/// Keeps the first token of every comparison key, dropping tokens that
/// normalize to nothing.
fn unique_tokens(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| {
            let key = normalize(token);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}
