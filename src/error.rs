use thiserror::Error;

/// Compile-time failures of the puzzle pipeline. Infeasible or
/// ambiguous puzzles are reported as solver results, never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The clue text does not match the grammar assembled from the
    /// current vocabulary. Unknown names surface here too: the lexicon
    /// simply does not contain them.
    #[error("clue does not match the grammar: {text:?}")]
    ClueSyntax { text: String },

    /// Malformed puzzle data: a defect in the authoring collaborator.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl PuzzleError {
    pub fn syntax(text: &str) -> Self {
        PuzzleError::ClueSyntax {
            text: text.to_string(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        PuzzleError::InvariantViolation(message.into())
    }
}
