//! Defines the `IndexReader` trait for external index collaborators.

use crate::types::{CorpusStats, DocId, TermStats};

/// A trait that defines the read-only statistics interface the scoring core
/// expects from an index.
///
/// `IndexReader` abstracts over whatever produced the corpus: the in-memory
/// index shipped with this crate, or a real inverted index living elsewhere.
/// The ranking and feedback models only ever read from it; building and
/// persisting the index is entirely the collaborator's concern.
///
/// The `Send` and `Sync` bounds are required to allow the index to be safely
/// shared across threads.
pub trait IndexReader: Send + Sync {
    /// Corpus-level statistics for a field.
    ///
    /// The returned snapshot must satisfy `total_docs >= 1` so derived
    /// averages are well defined.
    fn corpus_stats(&self, field: &str) -> CorpusStats;

    /// Per-term statistics for a field. Unknown terms report a document
    /// frequency of zero.
    fn term_stats(&self, field: &str, term: &str) -> TermStats;

    /// The stored quantized length of a document's field, computed at
    /// index-build time, or `None` when the document is not indexed.
    fn norm_byte(&self, doc_id: &DocId, field: &str) -> Option<u8>;

    /// Raw frequency of `term` within a document's field. Zero when either
    /// the document or the term is absent.
    fn term_frequency(&self, doc_id: &DocId, field: &str, term: &str) -> u32;

    /// The stored content of a document's field, used to resolve
    /// id-referenced feedback documents.
    fn fetch_content(&self, doc_id: &DocId, field: &str) -> Option<String>;
}
