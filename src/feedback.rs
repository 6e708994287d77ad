//! Relevance-feedback term weighting.
//!
//! Models a set of relevant and non-relevant example documents and derives a
//! weighted set of expansion terms from the relevant ones. Each term from a
//! relevant document is weighted by the ratio of its micro-averaged
//! occurrence rate in the relevant set to its rate in the non-relevant set,
//! with additive smoothing on both the likelihood sums and the set sizes.
//! Terms appearing only in non-relevant documents are ignored entirely.

use crate::error::ScorusError;
use crate::types::{DocId, WeightedTerm};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The default out-of-vocabulary smoothing constant.
///
/// Added to every likelihood sum so terms with no observed mass in one set
/// still produce a finite, large ratio instead of a division by zero.
pub const OOV: f64 = 0.001;

/// A labeled example document supplied to the feedback model.
///
/// A document is identified either by id, resolved through the external
/// index, or by inline content tokenized directly. When both are present the
/// id wins and the inline content is ignored. An entry with neither is a
/// configuration error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackDocument {
  /// Whether this example is relevant to the information need.
  pub relevant: bool,
  /// The id of a document stored in the external index.
  pub doc_id: Option<DocId>,
  /// Inline document content, used when no id is given.
  pub content: Option<String>,
}

impl FeedbackDocument {
  /// Creates an example referencing an indexed document by id.
  pub fn by_id(relevant: bool, doc_id: impl Into<DocId>) -> Self {
    Self {
      relevant,
      doc_id: Some(doc_id.into()),
      content: None,
    }
  }

  /// Creates an example from inline document content.
  pub fn by_content(relevant: bool, content: impl Into<String>) -> Self {
    Self {
      relevant,
      doc_id: None,
      content: Some(content.into()),
    }
  }
}

/// A document's term counts and total length, built fresh per feedback
/// document and discarded after aggregation.
#[derive(Default)]
struct DocStats {
  term_counts: HashMap<String, u32>,
  length: u32,
}

impl DocStats {
  fn add_term(&mut self, term: String, count: u32) {
    *self.term_counts.entry(term).or_insert(0) += count;
    self.length += count;
  }
}

/// Per-term likelihood sums, accumulated while the example sets are
/// processed and discarded once the final weights are computed.
#[derive(Default)]
struct TermFeedbackStats {
  rel_likelihood_sum: f64,
  nonrel_likelihood_sum: f64,
}

/// The relevance-feedback model.
///
/// Configure with the builder-style methods, then call [`compute`] with the
/// labeled examples, a content resolver for id-referenced documents, and a
/// tokenizer. Both collaborators are injected functions so any index or
/// analysis pipeline can be substituted.
///
/// [`compute`]: FeedbackModel::compute
///
/// # Examples
///
/// ```rust
/// use scorus::feedback::{FeedbackDocument, FeedbackModel};
/// use scorus::tokenizer::tokenize;
///
/// let docs = vec![
///   FeedbackDocument::by_content(true, "rust search engines"),
///   FeedbackDocument::by_content(false, "cooking recipes"),
/// ];
///
/// let model = FeedbackModel::new().top_terms(10);
/// let terms = model
///   .compute(&docs, |_id: &String| None, tokenize)
///   .unwrap();
/// assert!(!terms.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FeedbackModel {
  top_terms_to_keep: Option<usize>,
  oov: f64,
}

impl Default for FeedbackModel {
  fn default() -> Self {
    Self {
      top_terms_to_keep: None,
      oov: OOV,
    }
  }
}

impl FeedbackModel {
  /// Creates a model keeping all terms, with the default OOV constant.
  pub fn new() -> Self {
    Self::default()
  }

  /// Keeps only the `n` highest-weighted terms. Zero is rejected by
  /// [`compute`](FeedbackModel::compute).
  pub fn top_terms(mut self, n: usize) -> Self {
    self.top_terms_to_keep = Some(n);
    self
  }

  /// Overrides the out-of-vocabulary smoothing constant.
  pub fn oov(mut self, oov: f64) -> Self {
    self.oov = oov;
    self
  }

  /// Computes the weighted expansion terms from labeled examples.
  ///
  /// Relevant documents are processed first, accumulating each term's
  /// per-document likelihood `count / length`. Non-relevant documents then
  /// accumulate into the same table, but only for terms the relevant set
  /// already produced. The final weight per term is
  ///
  /// ```text
  /// ((|NonRel| + 1) * (rel_sum + oov)) / ((|Rel| + 1) * (nonrel_sum + oov))
  /// ```
  ///
  /// # Arguments
  ///
  /// * `docs` - The labeled examples. At least one is required.
  /// * `resolve` - Looks up stored content for an id-referenced document.
  ///   Returning `None` skips that document (zero contribution, not fatal).
  /// * `tokenize` - The analysis pipeline to apply to document content.
  ///
  /// # Returns
  ///
  /// Terms sorted by descending weight. When weights tie, the term that
  /// sorts later lexicographically comes first; the tie-break is explicit so
  /// runs are reproducible. Truncated to the configured top-terms bound.
  pub fn compute<R, T>(
    &self,
    docs: &[FeedbackDocument],
    resolve: R,
    tokenize: T,
  ) -> Result<Vec<WeightedTerm>, ScorusError>
  where
    R: Fn(&DocId) -> Option<String>,
    T: Fn(&str) -> Vec<String>,
  {
    if docs.is_empty() {
      return Err(ScorusError::NoFeedbackDocuments);
    }
    if self.top_terms_to_keep == Some(0) {
      return Err(ScorusError::ZeroTopTerms);
    }
    if docs.iter().any(|d| d.doc_id.is_none() && d.content.is_none()) {
      return Err(ScorusError::EmptyFeedbackDocument);
    }

    let rel_count = docs.iter().filter(|d| d.relevant).count();
    let nonrel_count = docs.len() - rel_count;

    let mut model: HashMap<String, TermFeedbackStats> = HashMap::new();

    // Relevant pass: every term enters the model.
    for doc in docs.iter().filter(|d| d.relevant) {
      let Some(stats) = doc_stats(doc, &resolve, &tokenize) else {
        continue;
      };
      let length = f64::from(stats.length);
      for (term, count) in stats.term_counts {
        model.entry(term).or_default().rel_likelihood_sum += f64::from(count) / length;
      }
    }

    // Non-relevant pass: only terms already seen in the relevant set count.
    for doc in docs.iter().filter(|d| !d.relevant) {
      let Some(stats) = doc_stats(doc, &resolve, &tokenize) else {
        continue;
      };
      let length = f64::from(stats.length);
      for (term, count) in stats.term_counts {
        if let Some(entry) = model.get_mut(&term) {
          entry.nonrel_likelihood_sum += f64::from(count) / length;
        }
      }
    }

    let rel_smoothed = (rel_count + 1) as f64;
    let nonrel_smoothed = (nonrel_count + 1) as f64;

    let mut terms: Vec<WeightedTerm> = model
      .into_iter()
      .map(|(term, stats)| {
        let weight = (nonrel_smoothed * (stats.rel_likelihood_sum + self.oov))
          / (rel_smoothed * (stats.nonrel_likelihood_sum + self.oov));
        WeightedTerm::new(term, weight)
      })
      .collect();

    terms.sort_by(|a, b| {
      b.weight
        .partial_cmp(&a.weight)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| b.term.cmp(&a.term))
    });

    if let Some(keep) = self.top_terms_to_keep {
      terms.truncate(keep);
    }

    Ok(terms)
  }
}

/// Resolves one feedback document to its term counts, or `None` when an
/// id-referenced document is missing from the index.
fn doc_stats<R, T>(doc: &FeedbackDocument, resolve: &R, tokenize: &T) -> Option<DocStats>
where
  R: Fn(&DocId) -> Option<String>,
  T: Fn(&str) -> Vec<String>,
{
  let content = match (&doc.doc_id, &doc.content) {
    (Some(id), _) => resolve(id)?,
    (None, Some(text)) => text.clone(),
    (None, None) => return None,
  };

  let mut stats = DocStats::default();
  for term in tokenize(&content) {
    stats.add_term(term, 1);
  }
  if stats.length == 0 {
    return None;
  }
  Some(stats)
}

/// Renders weighted terms as a boosted term list, `term^weight` separated by
/// spaces, for a query layer to merge.
pub fn boosted_query(terms: &[WeightedTerm]) -> String {
  terms
    .iter()
    .map(|t| format!("{}^{}", t.term, t.weight))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tokenizer::tokenize;

  fn no_index(_id: &DocId) -> Option<String> {
    None
  }

  #[test]
  fn test_requires_documents() {
    let model = FeedbackModel::new();
    let err = model.compute(&[], no_index, tokenize).unwrap_err();
    assert_eq!(err, ScorusError::NoFeedbackDocuments);
  }

  #[test]
  fn test_rejects_zero_top_terms() {
    let model = FeedbackModel::new().top_terms(0);
    let docs = vec![FeedbackDocument::by_content(true, "w")];
    let err = model.compute(&docs, no_index, tokenize).unwrap_err();
    assert_eq!(err, ScorusError::ZeroTopTerms);
  }

  #[test]
  fn test_rejects_document_without_identity() {
    let model = FeedbackModel::new();
    let docs = vec![FeedbackDocument {
      relevant: true,
      doc_id: None,
      content: None,
    }];
    let err = model.compute(&docs, no_index, tokenize).unwrap_err();
    assert_eq!(err, ScorusError::EmptyFeedbackDocument);
  }

  #[test]
  fn test_smoothed_weights() {
    // One relevant doc {w:2, x:1} of length 3, one non-relevant doc {w:1}
    // of length 1.
    let docs = vec![
      FeedbackDocument::by_content(true, "w w x"),
      FeedbackDocument::by_content(false, "w"),
    ];

    let terms = FeedbackModel::new()
      .compute(&docs, no_index, tokenize)
      .unwrap();
    assert_eq!(terms.len(), 2);

    // x is absent from the non-relevant set, so only the OOV constant sits
    // in its denominator and the ratio is large.
    assert_eq!(terms[0].term, "x");
    let expected_x = (2.0 * (1.0 / 3.0 + 0.001)) / (2.0 * 0.001);
    assert!((terms[0].weight - expected_x).abs() < 1e-9);
    assert!((terms[0].weight - 334.333).abs() < 1e-3);

    assert_eq!(terms[1].term, "w");
    let expected_w = (2.0 * (2.0 / 3.0 + 0.001)) / (2.0 * (1.0 + 0.001));
    assert!((terms[1].weight - expected_w).abs() < 1e-9);
    assert!((terms[1].weight - 0.667).abs() < 1e-3);
  }

  #[test]
  fn test_nonrelevant_only_terms_are_ignored() {
    let docs = vec![
      FeedbackDocument::by_content(true, "alpha beta"),
      FeedbackDocument::by_content(false, "gamma gamma gamma"),
    ];

    let terms = FeedbackModel::new()
      .compute(&docs, no_index, tokenize)
      .unwrap();
    assert!(terms.iter().all(|t| t.term != "gamma"));
    assert_eq!(terms.len(), 2);
  }

  #[test]
  fn test_tied_weights_prefer_later_term() {
    // Both terms occur once in the same relevant document, so their weights
    // are identical and the lexicographically later term must come first.
    let docs = vec![FeedbackDocument::by_content(true, "apple zebra")];

    let terms = FeedbackModel::new()
      .compute(&docs, no_index, tokenize)
      .unwrap();
    assert_eq!(terms[0].term, "zebra");
    assert_eq!(terms[1].term, "apple");
    assert_eq!(terms[0].weight, terms[1].weight);
  }

  #[test]
  fn test_top_terms_truncates_after_sorting() {
    let docs = vec![
      FeedbackDocument::by_content(true, "rare rare rare common"),
      FeedbackDocument::by_content(false, "common common"),
    ];

    let terms = FeedbackModel::new()
      .top_terms(1)
      .compute(&docs, no_index, tokenize)
      .unwrap();
    assert_eq!(terms.len(), 1);
    assert_eq!(terms[0].term, "rare");
  }

  #[test]
  fn test_missing_indexed_document_is_skipped() {
    let docs = vec![
      FeedbackDocument::by_content(true, "kept kept"),
      FeedbackDocument::by_id(true, "ghost-doc"),
    ];

    let terms = FeedbackModel::new()
      .compute(&docs, no_index, tokenize)
      .unwrap();
    assert_eq!(terms.len(), 1);
    assert_eq!(terms[0].term, "kept");
  }

  #[test]
  fn test_id_resolution_uses_the_resolver() {
    let docs = vec![FeedbackDocument::by_id(true, "doc-1")];
    let resolve =
      |id: &DocId| (id.as_str() == "doc-1").then(|| "resolved content".to_string());

    let terms = FeedbackModel::new().compute(&docs, resolve, tokenize).unwrap();
    let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
    assert!(names.contains(&"resolved"));
    assert!(names.contains(&"content"));
  }

  #[test]
  fn test_boosted_query_rendering() {
    let terms = vec![
      WeightedTerm::new("alpha", 2.5),
      WeightedTerm::new("beta", 0.5),
    ];
    assert_eq!(boosted_query(&terms), "alpha^2.5 beta^0.5");
  }
}
