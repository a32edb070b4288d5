#![forbid(unsafe_code)]
//! Word-by-word alignment toolkit for Rust.
//!
//! Every source sentence gets two translations: a fluent natural translation and
//! a strict word-by-word decoding. This crate holds the decoding side: the
//! persisted [`WordAlignment`] model, an editable [`ReconciliationSession`] that
//! keeps each target word assigned to at most one source word, the validator,
//! and the pipeline that encodes a finished session back into alignments.
//!
//! # Quick Start
//!
//! ```rust
//! use decodec::{Pipeline, ReconciliationSession, SessionOptions, validate_complete};
//!
//! let mut session = ReconciliationSession::new(
//!     "Yo te extrañaré",
//!     "Ich werde dich vermissen",
//!     SessionOptions::default(),
//! );
//! session.assign("Yo", "Ich")?;
//! session.assign("te", "dich")?;
//! session.assign("extrañaré", "werde")?;
//! session.assign("extrañaré", "vermissen")?;
//!
//! assert!(validate_complete(&session).is_valid());
//! let alignments = Pipeline::new().commit(&session)?;
//! assert_eq!(alignments[2].target_expression, "werde-vermissen");
//! # Ok::<(), decodec::Error>(())
//! ```
//!
//! Sessions are single-threaded and live only as long as one edit interaction.
//! Cancelling an edit is dropping the session.

pub mod codec;
pub mod error;
pub mod normalize;
pub mod notifier;
pub mod options;
pub mod pipeline;
pub mod session;
pub mod tokenizer;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{decode, encode},
    error::Error,
    normalize::normalize,
    notifier::{ChangeEvent, Direction, SubscriptionId},
    options::SessionOptions,
    pipeline::{HyphenJoin, Pipeline},
    session::{ReconciliationSession, ResyncReport, SourceEntry},
    traits::{AlignmentTransform, Observer, Parser, TranslationProvider},
    types::{Draft, Sentence, Translation, WordAlignment},
    validation::{ValidationError, ValidationResult, validate_complete},
};
