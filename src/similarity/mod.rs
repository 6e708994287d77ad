//! Interchangeable document-ranking formulas.
//!
//! Every formula implements the [`Similarity`] trait: it turns corpus and
//! per-term statistics into an immutable per-query [`QueryWeight`], then
//! scores `(document, term-frequency)` pairs against that weight during
//! retrieval. The retrieval engine owns summation across query terms and
//! clauses; a similarity only ever produces one term's contribution.
//!
//! # Available similarities
//!
//! - [`Bm25`]: Okapi BM25 with a precomputed 256-entry normalizer table.
//! - [`Bm25Direct`]: the same formula, evaluating the normalizer per scored
//!   document instead of precomputing the table.
//! - [`ProbIdf`]: probabilistic idf with log-scaled term frequency.
//! - [`LengthRatio`]: raw term frequency over a log length ratio.

/// Implements BM25 with a precomputed normalizer table.
pub mod bm25;
/// Implements BM25 with the normalizer evaluated at score time.
pub mod bm25_direct;
/// Implements the length-ratio formula.
pub mod length_ratio;
/// Implements the probabilistic-idf formula.
pub mod prob_idf;

pub use bm25::Bm25;
pub use bm25_direct::Bm25Direct;
pub use length_ratio::LengthRatio;
pub use prob_idf::ProbIdf;

use crate::types::{CorpusStats, TermStats};
use serde::{Deserialize, Serialize};

/// Base-2 logarithm, the log used throughout the ranking formulas.
pub(crate) fn log2(x: f32) -> f32 {
  x.log2()
}

/// An immutable, per-query weight object.
///
/// Built once per (query, field) pair at query-compilation time and shared
/// read-only across all documents scored for that query. There is no
/// post-hoc rescaling step: scores leave the similarity exactly as the
/// formula produced them.
#[derive(Debug, Clone)]
pub struct QueryWeight {
  /// Aggregated inverse document frequency across the query's terms.
  pub idf: f32,
  /// Average document length for the field.
  pub avg_doc_len: f32,
  /// Optional normalizer table, one entry per possible norm byte. Present
  /// only for similarities that precompute their per-document normalizer.
  pub norm_table: Option<Box<[f32; 256]>>,
}

/// A trait for interchangeable ranking formulas.
///
/// The `Send` and `Sync` bounds are required so a similarity can be shared
/// across concurrently executing queries; implementations hold only
/// immutable configuration.
pub trait Similarity: Send + Sync {
  /// Returns the `SimilarityKind` of this formula.
  fn kind(&self) -> SimilarityKind;

  /// Builds the per-query weight from corpus and per-term statistics.
  ///
  /// When several `TermStats` are supplied the aggregated idf is the sum of
  /// each term's independently computed idf. That is an approximation, not a
  /// joint probability, and is a fixed design choice. An empty slice yields
  /// a neutral idf of 1.
  fn build_weight(&self, corpus: &CorpusStats, terms: &[TermStats]) -> QueryWeight;

  /// Scores one (document, term) pair.
  ///
  /// Pure function of the weight, the document's stored norm byte and the
  /// raw term frequency. A term frequency of zero scores zero for every
  /// similarity. Other degenerate inputs are not guarded: they propagate as
  /// non-finite scores exactly as the formula dictates.
  fn score(&self, weight: &QueryWeight, norm_byte: u8, tf: f32) -> f32;
}

/// An enumeration of the available ranking formulas.
///
/// Used to select a similarity by configuration at query-compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimilarityKind {
  /// Okapi BM25 with a precomputed normalizer table.
  Bm25,
  /// Okapi BM25 with the normalizer evaluated per scored document.
  Bm25Direct,
  /// Probabilistic idf with log-scaled term frequency.
  ProbIdf,
  /// Raw term frequency over a log length ratio.
  LengthRatio,
}

impl SimilarityKind {
  /// Creates the similarity this kind names, with default parameters.
  pub fn similarity(self) -> Box<dyn Similarity> {
    match self {
      SimilarityKind::Bm25 => Box::new(Bm25::default()),
      SimilarityKind::Bm25Direct => Box::new(Bm25Direct::default()),
      SimilarityKind::ProbIdf => Box::new(ProbIdf),
      SimilarityKind::LengthRatio => Box::new(LengthRatio),
    }
  }
}

/// Sums per-term idf contributions over a term-statistics slice.
///
/// Each similarity supplies its own per-term formula; the combination rule
/// is shared. No statistics at all yields the neutral idf of 1.
pub(crate) fn aggregate_idf<F>(corpus: &CorpusStats, terms: &[TermStats], per_term: F) -> f32
where
  F: Fn(f32, f32) -> f32,
{
  let n_docs = corpus.total_docs as f32;
  match terms {
    [] => 1.0,
    [single] => per_term(n_docs, single.doc_freq as f32),
    many => many
      .iter()
      .map(|t| per_term(n_docs, t.doc_freq as f32))
      .sum(),
  }
}
