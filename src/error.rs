//! Error types for scoring and feedback configuration.

use thiserror::Error;

/// Configuration errors surfaced by the feedback model.
///
/// These fail fast and are never retried. Numeric edge cases in the ranking
/// formulas are not errors: degenerate statistics propagate as non-finite
/// scores exactly as the formulas dictate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScorusError {
    /// No labeled feedback documents were supplied.
    #[error("no feedback documents supplied")]
    NoFeedbackDocuments,
    /// The number of top terms to keep was set to zero.
    #[error("top terms to keep must be at least 1")]
    ZeroTopTerms,
    /// A feedback document carried neither a document id nor inline content.
    #[error("feedback document has neither a doc id nor content")]
    EmptyFeedbackDocument,
}
