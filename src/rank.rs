//! Bag-of-terms retrieval over an `IndexReader`.
//!
//! This is the thin stand-in for an external retrieval engine: it builds one
//! query weight per term, scores every candidate document against each
//! weight and sums the contributions. Anything cleverer (postings traversal,
//! early termination, phrase clauses) belongs to a real engine behind the
//! same seam.

use crate::index::IndexReader;
use crate::similarity::Similarity;
use crate::types::{DocId, WeightedTerm};

/// A scored document produced by [`rank`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDoc {
  /// The document's id.
  pub doc_id: DocId,
  /// The summed score across all query terms.
  pub score: f32,
}

/// Runs one bag-of-terms query and returns at most `limit` scored documents.
///
/// Every query term contributes with an equal boost of 1. Results are sorted
/// by descending score; ties break on ascending doc id so runs are
/// reproducible. Documents matching none of the terms are omitted.
pub fn rank(
  index: &dyn IndexReader,
  candidates: &[DocId],
  field: &str,
  query_terms: &[String],
  similarity: &dyn Similarity,
  limit: usize,
) -> Vec<RankedDoc> {
  let boosted: Vec<WeightedTerm> = query_terms
    .iter()
    .map(|t| WeightedTerm::new(t.clone(), 1.0))
    .collect();
  rank_boosted(index, candidates, field, &boosted, similarity, limit)
}

/// Like [`rank`], but each term's contribution is multiplied by its weight.
///
/// This is the merge point for feedback expansion: the weighted terms the
/// feedback model produces can be handed in directly, alongside the original
/// query terms at weight 1.
pub fn rank_boosted(
  index: &dyn IndexReader,
  candidates: &[DocId],
  field: &str,
  query_terms: &[WeightedTerm],
  similarity: &dyn Similarity,
  limit: usize,
) -> Vec<RankedDoc> {
  let corpus = index.corpus_stats(field);
  let weights: Vec<_> = query_terms
    .iter()
    .map(|t| similarity.build_weight(&corpus, &[index.term_stats(field, &t.term)]))
    .collect();

  let mut results = Vec::new();
  for doc_id in candidates {
    let Some(norm_byte) = index.norm_byte(doc_id, field) else {
      continue;
    };

    let mut score = 0.0f32;
    let mut matched = false;
    for (term, weight) in query_terms.iter().zip(&weights) {
      let tf = index.term_frequency(doc_id, field, &term.term);
      if tf > 0 {
        matched = true;
        score += term.weight as f32 * similarity.score(weight, norm_byte, tf as f32);
      }
    }

    if matched {
      results.push(RankedDoc {
        doc_id: doc_id.clone(),
        score,
      });
    }
  }

  results.sort_by(|a, b| {
    b.score
      .partial_cmp(&a.score)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| a.doc_id.cmp(&b.doc_id))
  });
  results.truncate(limit);
  results
}
