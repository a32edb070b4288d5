//! Behavior options for [`crate::ReconciliationSession`].

/// Options controlling how a session tokenizes its natural translation and
/// which target words it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionOptions {
    /// Keep punctuation attached to target words (`"vermissen."` instead of `"vermissen"`).
    pub keep_punctuation: bool,
    /// Accept target words that do not occur in the natural translation.
    pub allow_foreign_words: bool,
}

impl SessionOptions {
    /// Creates default session options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables punctuation-preserving target tokens.
    pub fn with_keep_punctuation(mut self, keep_punctuation: bool) -> Self {
        self.keep_punctuation = keep_punctuation;
        self
    }

    /// Enables/disables assignment of words outside the natural translation.
    pub fn with_foreign_words(mut self, allow_foreign_words: bool) -> Self {
        self.allow_foreign_words = allow_foreign_words;
        self
    }

    /// Tokenizes a natural translation the way these options ask for.
    pub(crate) fn target_tokens(&self, text: &str) -> Vec<String> {
        if self.keep_punctuation {
            crate::tokenizer::tokenize(text)
        } else {
            crate::tokenizer::tokenize_clean(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SessionOptions::new();
        assert!(!options.keep_punctuation);
        assert!(!options.allow_foreign_words);
    }

    #[test]
    fn test_target_tokens_follow_punctuation_flag() {
        let text = "Ich werde dich vermissen.";
        assert_eq!(
            SessionOptions::new().target_tokens(text),
            vec!["Ich", "werde", "dich", "vermissen"]
        );
        assert_eq!(
            SessionOptions::new()
                .with_keep_punctuation(true)
                .target_tokens(text),
            vec!["Ich", "werde", "dich", "vermissen."]
        );
    }
}
