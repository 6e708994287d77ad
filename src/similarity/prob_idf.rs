//! Probabilistic-idf ranking with log-scaled term frequency.

use super::{aggregate_idf, log2, QueryWeight, Similarity, SimilarityKind};
use crate::norm;
use crate::types::{CorpusStats, TermStats};

/// Probabilistic idf over a log-scaled term frequency.
///
/// The idf is the Robertson-Sparck Jones estimate without the `1 +`
/// smoothing, so a term present in more than half the corpus gets a negative
/// idf. The score divides `log2(tf)` by `log2(dl)`.
///
/// Degenerate inputs are deliberately not guarded: `tf = 1` zeroes the
/// numerator, and a decoded document length of 1 zeroes the denominator, so
/// scores can be zero or non-finite exactly as the formula dictates. The
/// one exception is `tf = 0`, which scores 0 like every similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbIdf;

impl ProbIdf {
  fn idf(n_docs: f32, doc_freq: f32) -> f32 {
    log2((n_docs - doc_freq + 0.5) / (doc_freq + 0.5))
  }
}

impl Similarity for ProbIdf {
  fn kind(&self) -> SimilarityKind {
    SimilarityKind::ProbIdf
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
    let k = log2(norm::decode(norm_byte));
    log2(tf) / k * weight.idf
  }
}
