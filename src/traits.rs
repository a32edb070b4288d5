//! Traits at the seams of decodec: JSON (de)serialization of the model,
//! session observers, post-processing transforms and the draft provider.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{
    error::Error,
    notifier::ChangeEvent,
    session::ReconciliationSession,
    types::{Draft, WordAlignment},
};

/// A trait for reading and writing alignment data from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use decodec::{traits::Parser, types::Translation};
/// let translation = Translation::read_from("translations/unit-1.json")?;
/// translation.write_to("translations/unit-1-copy.json")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// Receives one call per successful session mutation.
///
/// Observers only get a shared reference to the session: they redraw from it,
/// all writes go through the session's own operations.
pub trait Observer {
    fn on_change(&mut self, event: &ChangeEvent, session: &ReconciliationSession);
}

impl<F> Observer for F
where
    F: FnMut(&ChangeEvent, &ReconciliationSession),
{
    fn on_change(&mut self, event: &ChangeEvent, session: &ReconciliationSession) {
        self(event, session)
    }
}

/// One stage of the post-processing pipeline.
pub trait AlignmentTransform {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Turns a completed session into persisted alignments.
    fn process(&self, session: &ReconciliationSession) -> Vec<WordAlignment>;
}

/// Produces a first-draft natural translation and alignment for a sentence.
///
/// Implementations typically call a remote model. The result is decoded into a
/// fresh session with [`ReconciliationSession::from_draft`]; providers never
/// touch a live session.
pub trait TranslationProvider {
    fn translate(
        &self,
        source_text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Draft, Error>;
}
