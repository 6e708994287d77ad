//! Okapi BM25 with a precomputed per-byte normalizer table.

use super::{aggregate_idf, log2, QueryWeight, Similarity, SimilarityKind};
use crate::norm;
use crate::types::{CorpusStats, TermStats};

/// The Okapi BM25 ranking formula.
///
/// `build_weight` evaluates the length normalizer at every one of the 256
/// possible norm bytes once per query, so scoring a document is a table
/// lookup plus a handful of arithmetic operations.
#[derive(Debug, Clone)]
pub struct Bm25 {
  /// The `k1` parameter controls term frequency saturation. A higher value
  /// means the score keeps growing with term frequency; a lower value means
  /// it saturates sooner. The default is 1.2.
  pub k1: f32,
  /// The `b` parameter controls document length normalization, from 0.0
  /// (none) to 1.0 (full). The default is 0.75.
  pub b: f32,
}

impl Default for Bm25 {
  fn default() -> Self {
    Self { k1: 1.2, b: 0.75 }
  }
}

impl Bm25 {
  /// Creates a BM25 similarity with explicit parameters.
  ///
  /// Parameters are per-instance and immutable, so instances with different
  /// tunings can score concurrent queries without interfering.
  pub fn new(k1: f32, b: f32) -> Self {
    Self { k1, b }
  }

  fn idf(n_docs: f32, doc_freq: f32) -> f32 {
    log2(1.0 + (n_docs - doc_freq + 0.5) / (doc_freq + 0.5))
  }
}

impl Similarity for Bm25 {
  fn kind(&self) -> SimilarityKind {
    SimilarityKind::Bm25
  }

  fn build_weight(&self, corpus: &CorpusStats, terms: &[TermStats]) -> QueryWeight {
    let idf = aggregate_idf(corpus, terms, Self::idf);
    let adl = corpus.avg_doc_length();

    let mut table = Box::new([0.0f32; 256]);
    for (byte, k) in table.iter_mut().enumerate() {
      let dl = norm::decode(byte as u8);
      *k = self.k1 * (1.0 - self.b + self.b * (dl / adl));
    }

    QueryWeight {
      idf,
      avg_doc_len: adl,
      norm_table: Some(table),
    }
  }

  fn score(&self, weight: &QueryWeight, norm_byte: u8, tf: f32) -> f32 {
    if tf == 0.0 {
      return 0.0;
    }
    let k = match &weight.norm_table {
      Some(table) => table[norm_byte as usize],
      // A weight built without a table still scores with the same formula.
      None => {
        self.k1 * (1.0 - self.b + self.b * (norm::decode(norm_byte) / weight.avg_doc_len))
      }
    };
    ((self.k1 + 1.0) * tf) / (k + tf) * weight.idf
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_zero_tf_scores_zero() {
    let sim = Bm25::default();
    let weight = sim.build_weight(&CorpusStats::new(100, 5000), &[TermStats::new(5)]);
    assert_eq!(sim.score(&weight, 150, 0.0), 0.0);
  }

  #[test]
  fn test_golden_score() {
    // N=1000, n=10, tf=3, k1=1.2, b=0.75. The corpus is sized so the average
    // length equals the decoded document length (byte 150 decodes to 96),
    // which makes the normalizer exactly k1.
    let sim = Bm25::default();
    let corpus = CorpusStats::new(1000, 96_000);
    let weight = sim.build_weight(&corpus, &[TermStats::new(10)]);

    assert!((weight.idf - 6.574_94).abs() < 1e-3);

    let doc_byte = norm::encode(96);
    let score = sim.score(&weight, doc_byte, 3.0);
    // ((k1+1)*tf)/(k1+tf) * idf = (2.2*3)/(1.2+3) * idf
    assert!((score - 10.332_05).abs() < 1e-3, "score was {}", score);
  }

  #[test]
  fn test_norm_table_matches_direct_formula() {
    let sim = Bm25::new(1.5, 0.4);
    let corpus = CorpusStats::new(500, 60_000);
    let weight = sim.build_weight(&corpus, &[TermStats::new(25)]);
    let table = weight.norm_table.as_ref().unwrap();

    let adl = corpus.avg_doc_length();
    for byte in [0u8, 1, 64, 150, 255] {
      let expected = 1.5 * (1.0 - 0.4 + 0.4 * (norm::decode(byte) / adl));
      assert!((table[byte as usize] - expected).abs() < 1e-6);
    }
  }

  #[test]
  fn test_shorter_documents_score_higher() {
    let sim = Bm25::default();
    let corpus = CorpusStats::new(1000, 100_000);
    let weight = sim.build_weight(&corpus, &[TermStats::new(10)]);

    let short = sim.score(&weight, norm::encode(20), 2.0);
    let long = sim.score(&weight, norm::encode(800), 2.0);
    assert!(short > long);
  }

  #[test]
  fn test_multi_term_idf_is_sum_of_singles() {
    let sim = Bm25::default();
    let corpus = CorpusStats::new(1000, 100_000);

    let single_a = sim.build_weight(&corpus, &[TermStats::new(10)]).idf;
    let single_b = sim.build_weight(&corpus, &[TermStats::new(100)]).idf;
    let both = sim
      .build_weight(&corpus, &[TermStats::new(10), TermStats::new(100)])
      .idf;

    assert!((both - (single_a + single_b)).abs() < 1e-5);
  }
}
