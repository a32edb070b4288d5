//! Post-processing pipeline turning a completed session into persisted
//! alignments.
//!
//! Transforms run in registration order and each one receives the session
//! itself, not the output of the previous transform. The output of the last
//! transform is the result.

use tracing::trace;

use crate::{
    codec,
    error::Error,
    session::ReconciliationSession,
    traits::AlignmentTransform,
    types::WordAlignment,
    validation::validate_complete,
};

/// Joins multiple target words of a source word with the codec delimiter
/// (`["werde", "vermissen"]` becomes `"werde-vermissen"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HyphenJoin;

impl AlignmentTransform for HyphenJoin {
    fn name(&self) -> &str {
        "hyphen_join"
    }

    fn process(&self, session: &ReconciliationSession) -> Vec<WordAlignment> {
        codec::encode(session)
    }
}

pub struct Pipeline {
    transforms: Vec<Box<dyn AlignmentTransform>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        let mut pipeline = Self::empty();
        pipeline.register(HyphenJoin);
        pipeline
    }
}

impl Pipeline {
    /// Creates the default pipeline with [`HyphenJoin`] registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline without transforms.
    pub fn empty() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn register<T: AlignmentTransform + 'static>(&mut self, transform: T) {
        self.transforms.push(Box::new(transform));
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Runs every transform and returns the last one's output. Does not validate.
    pub fn process(&self, session: &ReconciliationSession) -> Result<Vec<WordAlignment>, Error> {
        let mut output = None;
        for transform in &self.transforms {
            let alignments = transform.process(session);
            trace!(
                transform = transform.name(),
                alignments = alignments.len(),
                "ran alignment transform"
            );
            output = Some(alignments);
        }
        output.ok_or(Error::EmptyPipeline)
    }

    /// Validates `session` and, if it is complete, encodes it.
    pub fn commit(&self, session: &ReconciliationSession) -> Result<Vec<WordAlignment>, Error> {
        validate_complete(session).into_result()?;
        self.process(session)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("transforms", &self.names())
            .finish()
    }
}
