//! Core data types shared by the ranking and feedback models.

use serde::{Deserialize, Serialize};

/// Type alias for document identifiers.
///
/// Using a dedicated type alias makes it easier to change the underlying type
/// of the identifier in the future if needed. It also improves readability.
pub type DocId = String;

/// An immutable snapshot of corpus-level statistics for a single field.
///
/// A `CorpusStats` is supplied by the index collaborator once per query and
/// never mutated afterwards. Every ranking formula derives its average
/// document length from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CorpusStats {
  /// The total number of documents in the corpus. Always at least 1.
  pub total_docs: u64,
  /// The total number of term occurrences across the whole corpus.
  pub sum_total_term_freq: u64,
}

impl CorpusStats {
  /// Creates a new corpus snapshot.
  pub fn new(total_docs: u64, sum_total_term_freq: u64) -> Self {
    Self {
      total_docs,
      sum_total_term_freq,
    }
  }

  /// The average document length for this field.
  pub fn avg_doc_length(&self) -> f32 {
    self.sum_total_term_freq as f32 / self.total_docs as f32
  }
}

/// Per-term statistics for a single query term (or term group).
///
/// When a query carries several terms, each term's statistics are kept
/// separate; the ranking formulas aggregate them by summing the independently
/// computed idf contributions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TermStats {
  /// The number of documents containing the term.
  pub doc_freq: u64,
}

impl TermStats {
  /// Creates per-term statistics from a document frequency.
  pub fn new(doc_freq: u64) -> Self {
    Self { doc_freq }
  }
}

/// A term with an attached weight, as produced by the feedback model.
///
/// An ordered sequence of these is the feedback model's output format. It can
/// be rendered as a boosted term list for a query layer to merge, but carries
/// no coupling to any particular query syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
  /// The term itself, exactly as the tokenizer produced it.
  pub term: String,
  /// The term's expansion weight.
  pub weight: f64,
}

impl WeightedTerm {
  /// Creates a new weighted term.
  pub fn new(term: impl Into<String>, weight: f64) -> Self {
    Self {
      term: term.into(),
      weight,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_avg_doc_length() {
    let stats = CorpusStats::new(4, 100);
    assert!((stats.avg_doc_length() - 25.0).abs() < f32::EPSILON);
  }

  #[test]
  fn test_weighted_term_serializes() {
    let term = WeightedTerm::new("rust", 2.5);
    let json = serde_json::to_string(&term).unwrap();
    let back: WeightedTerm = serde_json::from_str(&json).unwrap();
    assert_eq!(back, term);
  }
}
