//! Okapi BM25 with the length normalizer evaluated at score time.

use super::{aggregate_idf, log2, QueryWeight, Similarity, SimilarityKind};
use crate::norm;
use crate::types::{CorpusStats, TermStats};

/// BM25 without the precomputed normalizer table.
///
/// Produces the same scores as [`Bm25`](super::Bm25) for the same
/// parameters; the per-document normalizer is recomputed from the decoded
/// norm byte on every call instead of being cached in the query weight.
/// Useful when weights are built far more often than documents are scored.
///
/// `k1` and `b` are per-instance immutable fields, never shared between
/// instances, so differently tuned instances can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct Bm25Direct {
  /// Term frequency saturation. The default is 1.2.
  pub k1: f32,
  /// Document length normalization strength. The default is 0.75.
  pub b: f32,
}

impl Default for Bm25Direct {
  fn default() -> Self {
    Self { k1: 1.2, b: 0.75 }
  }
}

impl Bm25Direct {
  /// Creates the similarity with explicit parameters.
  pub fn new(k1: f32, b: f32) -> Self {
    Self { k1, b }
  }

  fn idf(n_docs: f32, doc_freq: f32) -> f32 {
    log2(1.0 + (n_docs - doc_freq + 0.5) / (doc_freq + 0.5))
  }
}

impl Similarity for Bm25Direct {
  fn kind(&self) -> SimilarityKind {
    SimilarityKind::Bm25Direct
  }

  fn build_weight(&self, corpus: &CorpusStats, terms: &[TermStats]) -> QueryWeight {
    QueryWeight {
      idf: aggregate_idf(corpus, terms, Self::idf),
      avg_doc_len: corpus.avg_doc_length(),
      norm_table: None,
    }
  }

  fn score(&self, weight: &QueryWeight, norm_byte: u8, tf: f32) -> f32 {
    if tf == 0.0 {
      return 0.0;
    }
    let dl = norm::decode(norm_byte);
    let k = self.k1 * (1.0 - self.b + self.b * (dl / weight.avg_doc_len));
    ((self.k1 + 1.0) * tf) / (k + tf) * weight.idf
  }
}
