//! In-memory index implementation.

use crate::index::adapter::IndexReader;
use crate::norm;
use crate::tokenizer::tokenize;
use crate::types::{CorpusStats, DocId, TermStats};
use std::collections::{BTreeSet, HashMap};

/// In-memory index over tokenized field text, using HashMaps.
///
/// Stores per (document, field) the term counts, the original content, and a
/// norm byte computed with [`norm::encode`] when the document is added.
/// Intended for tests and for embedders that do not have a real inverted
/// index behind the [`IndexReader`] seam.
pub struct MemoryIndex {
    fields: HashMap<String, FieldData>,
    doc_ids: BTreeSet<DocId>,
    tokenizer: fn(&str) -> Vec<String>,
}

#[derive(Default)]
struct FieldData {
    term_counts: HashMap<DocId, HashMap<String, u32>>,
    content: HashMap<DocId, String>,
    norm_bytes: HashMap<DocId, u8>,
    doc_freq: HashMap<String, u64>,
    sum_total_term_freq: u64,
}

impl FieldData {
    /// Drops a document's contributions so it can be re-added.
    fn remove_doc(&mut self, doc_id: &DocId) {
        if let Some(counts) = self.term_counts.remove(doc_id) {
            for (term, count) in &counts {
                if let Some(df) = self.doc_freq.get_mut(term) {
                    *df = df.saturating_sub(1);
                }
                self.sum_total_term_freq -= u64::from(*count);
            }
            self.doc_freq.retain(|_, df| *df > 0);
        }
        self.content.remove(doc_id);
        self.norm_bytes.remove(doc_id);
    }
}

impl MemoryIndex {
    /// Create a new empty in-memory index using the default tokenizer.
    pub fn new() -> Self {
        Self::with_tokenizer(tokenize)
    }

    /// Create an index with a custom analysis pipeline.
    pub fn with_tokenizer(tokenizer: fn(&str) -> Vec<String>) -> Self {
        Self {
            fields: HashMap::new(),
            doc_ids: BTreeSet::new(),
            tokenizer,
        }
    }

    /// Adds or replaces a document's field text.
    pub fn put(&mut self, doc_id: impl Into<DocId>, field: &str, text: &str) {
        let doc_id = doc_id.into();
        let tokens = (self.tokenizer)(text);

        let field_data = self.fields.entry(field.to_string()).or_default();
        field_data.remove_doc(&doc_id);

        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        let length = counts.values().sum::<u32>();

        for term in counts.keys() {
            *field_data.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        field_data.sum_total_term_freq += u64::from(length);
        field_data.norm_bytes.insert(doc_id.clone(), norm::encode(length));
        field_data.content.insert(doc_id.clone(), text.to_string());
        field_data.term_counts.insert(doc_id.clone(), counts);
        self.doc_ids.insert(doc_id);
    }

    /// All document ids in the index, in sorted order.
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.doc_ids.iter().cloned().collect()
    }

    /// Number of documents in the index.
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexReader for MemoryIndex {
    fn corpus_stats(&self, field: &str) -> CorpusStats {
        // total_docs is clamped to 1 so the snapshot invariant holds even
        // for an empty index.
        let total_docs = self.doc_ids.len().max(1) as u64;
        let sum = self
            .fields
            .get(field)
            .map_or(0, |f| f.sum_total_term_freq);
        CorpusStats::new(total_docs, sum)
    }

    fn term_stats(&self, field: &str, term: &str) -> TermStats {
        let doc_freq = self
            .fields
            .get(field)
            .and_then(|f| f.doc_freq.get(term))
            .copied()
            .unwrap_or(0);
        TermStats::new(doc_freq)
    }

    fn norm_byte(&self, doc_id: &DocId, field: &str) -> Option<u8> {
        self.fields
            .get(field)
            .and_then(|f| f.norm_bytes.get(doc_id))
            .copied()
    }

    fn term_frequency(&self, doc_id: &DocId, field: &str, term: &str) -> u32 {
        self.fields
            .get(field)
            .and_then(|f| f.term_counts.get(doc_id))
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    fn fetch_content(&self, doc_id: &DocId, field: &str) -> Option<String> {
        self.fields
            .get(field)
            .and_then(|f| f.content.get(doc_id))
            .cloned()
    }
}
