//! Persisted alignment model: word alignments, sentences and translations.

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;
use uuid::Uuid;

use crate::{
    codec,
    error::Error,
    options::SessionOptions,
    pipeline::Pipeline,
    session::ReconciliationSession,
    tokenizer::split_into_sentences,
    traits::Parser,
};

impl Parser for Translation {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

impl Parser for Vec<Translation> {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

/// One source word and its word-by-word rendering.
///
/// `target_expression` holds one or more target words joined by
/// [`codec::DELIMITER`]. The encoding is lossy: a target word that itself
/// contains a hyphen cannot be told apart from two joined words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct WordAlignment {
    pub source_word: String,

    #[serde(rename = "target_word")]
    pub target_expression: String,

    /// Zero-based display order within the sentence.
    pub position: usize,
}

impl WordAlignment {
    pub fn new(
        source_word: impl Into<String>,
        target_expression: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            source_word: source_word.into(),
            target_expression: target_expression.into(),
            position,
        }
    }

    /// The individual target words of this alignment.
    pub fn target_words(&self) -> Vec<String> {
        codec::split_expression(&self.target_expression)
    }
}

/// A source sentence with its natural translation and word-by-word alignment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sentence {
    /// Stable identifier, persisted as `uuid`.
    #[serde(rename = "uuid", alias = "id")]
    pub id: Uuid,

    pub source_text: String,

    pub natural_translation: String,

    #[serde(default)]
    pub word_alignments: Vec<WordAlignment>,
}

impl Sentence {
    /// Creates a sentence without any alignment yet.
    pub fn new(source_text: impl Into<String>, natural_translation: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_text: source_text.into(),
            natural_translation: natural_translation.into(),
            word_alignments: Vec::new(),
        }
    }

    /// Opens an editing session on this sentence.
    pub fn begin_edit(&self, options: SessionOptions) -> Result<ReconciliationSession, Error> {
        codec::decode(self, options)
    }

    /// Commits a session back into this sentence.
    ///
    /// The session is validated and run through `pipeline`; on failure the
    /// sentence is left untouched.
    pub fn apply(
        &mut self,
        session: &ReconciliationSession,
        pipeline: &Pipeline,
    ) -> Result<(), Error> {
        let alignments = pipeline.commit(session)?;
        self.natural_translation = session.natural_translation().to_string();
        self.word_alignments = alignments;
        Ok(())
    }
}

/// A translated document: the aggregate root handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    #[serde(rename = "uuid", alias = "id")]
    pub id: Uuid,

    pub title: String,

    /// BCP-47 language code of the source text (e.g. "es").
    pub source_language: String,

    /// BCP-47 language code of the translations (e.g. "de").
    pub target_language: String,

    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl Translation {
    pub fn new(
        title: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            sentences: Vec::new(),
        }
    }

    pub fn add_sentence(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    /// Splits `text` into sentences and appends one untranslated sentence per
    /// piece. Returns the number of sentences added.
    pub fn push_source_text(&mut self, text: &str) -> usize {
        let pieces = split_into_sentences(text);
        let added = pieces.len();
        self.sentences
            .extend(pieces.into_iter().map(|piece| Sentence::new(piece, "")));
        added
    }

    pub fn find_sentence(&self, id: Uuid) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.id == id)
    }

    pub fn find_sentence_mut(&mut self, id: Uuid) -> Option<&mut Sentence> {
        self.sentences.iter_mut().find(|s| s.id == id)
    }

    pub fn parse_source_language(&self) -> Option<LanguageIdentifier> {
        self.source_language.parse().ok()
    }

    pub fn parse_target_language(&self) -> Option<LanguageIdentifier> {
        self.target_language.parse().ok()
    }
}

/// Output of a [`crate::traits::TranslationProvider`]: a natural translation and
/// a first-draft alignment for one source sentence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Draft {
    pub natural_translation: String,

    #[serde(default)]
    pub alignments: Vec<WordAlignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_translation() -> Translation {
        let mut translation = Translation::new("Unit 1", "es", "de");
        let mut sentence = Sentence::new("Yo te extrañaré", "Ich werde dich vermissen");
        sentence.word_alignments = vec![
            WordAlignment::new("Yo", "Ich", 0),
            WordAlignment::new("te", "dich", 1),
            WordAlignment::new("extrañaré", "werde-vermissen", 2),
        ];
        translation.add_sentence(sentence);
        translation
    }

    #[test]
    fn test_word_alignment_uses_persisted_field_names() {
        let alignment = WordAlignment::new("extrañaré", "werde-vermissen", 2);
        let json = serde_json::to_string(&alignment).unwrap();
        assert_eq!(
            json,
            r#"{"source_word":"extrañaré","target_word":"werde-vermissen","position":2}"#
        );
        let back: WordAlignment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alignment);
    }

    #[test]
    fn test_word_alignment_target_words() {
        let alignment = WordAlignment::new("extrañaré", "werde-vermissen", 0);
        assert_eq!(alignment.target_words(), vec!["werde", "vermissen"]);
    }

    #[test]
    fn test_translation_parser_roundtrip() {
        let translation = sample_translation();
        let mut buffer = Vec::new();
        translation.to_writer(&mut buffer).unwrap();
        let parsed = Translation::from_bytes(&buffer).unwrap();
        assert_eq!(parsed, translation);
    }

    #[test]
    fn test_ids_are_stable_across_loads() {
        let json = r#"{
            "uuid": "6f1c2a3e-0000-4000-8000-000000000001",
            "title": "Unidad 1",
            "source_language": "es",
            "target_language": "de",
            "sentences": [{
                "uuid": "6f1c2a3e-0000-4000-8000-000000000002",
                "source_text": "Hola",
                "natural_translation": "Hallo"
            }]
        }"#;
        let first = Translation::from_str(json).unwrap();
        let second = Translation::from_str(json).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id.to_string(), "6f1c2a3e-0000-4000-8000-000000000001");
        assert!(first.sentences[0].word_alignments.is_empty());

        let mut buffer = Vec::new();
        first.to_writer(&mut buffer).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert!(written.contains(r#""uuid": "6f1c2a3e-0000-4000-8000-000000000002""#));
    }

    #[test]
    fn test_id_key_is_accepted() {
        let json = r#"{"id":"6f1c2a3e-0000-4000-8000-000000000002","source_text":"Hola","natural_translation":"Hallo"}"#;
        let sentence: Sentence = serde_json::from_str(json).unwrap();
        assert_eq!(sentence.id.to_string(), "6f1c2a3e-0000-4000-8000-000000000002");
    }

    #[test]
    fn test_sentence_without_id_is_rejected() {
        let json = r#"{"source_text":"Hola","natural_translation":"Hallo"}"#;
        assert!(serde_json::from_str::<Sentence>(json).is_err());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Translation::from_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_push_source_text_splits_sentences() {
        let mut translation = Translation::new("Unit 2", "es", "de");
        let added = translation.push_source_text("Yo te extrañaré. Hasta luego!");
        assert_eq!(added, 2);
        assert_eq!(translation.sentences[0].source_text, "Yo te extrañaré.");
        assert_eq!(translation.sentences[1].source_text, "Hasta luego!");
        assert!(translation.sentences[1].natural_translation.is_empty());
    }

    #[test]
    fn test_find_sentence() {
        let mut translation = sample_translation();
        let id = translation.sentences[0].id;
        assert!(translation.find_sentence(id).is_some());
        assert!(translation.find_sentence(Uuid::new_v4()).is_none());

        translation.find_sentence_mut(id).unwrap().natural_translation = "Ich vermisse dich".into();
        assert_eq!(
            translation.find_sentence(id).unwrap().natural_translation,
            "Ich vermisse dich"
        );
    }

    #[test]
    fn test_language_identifiers() {
        let translation = sample_translation();
        assert_eq!(translation.parse_source_language().unwrap().language.as_str(), "es");
        assert_eq!(translation.parse_target_language().unwrap().language.as_str(), "de");

        let broken = Translation::new("x", "not a language!", "de");
        assert!(broken.parse_source_language().is_none());
    }
}
