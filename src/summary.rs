//! Summary struct - the text returned by the summarization agent.

/// Generated summary of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
}

impl Summary {
    /// Create a new summary
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
