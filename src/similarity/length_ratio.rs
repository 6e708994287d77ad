//! Ranking by raw term frequency over a log length ratio.

use super::{aggregate_idf, log2, QueryWeight, Similarity, SimilarityKind};
use crate::norm;
use crate::types::{CorpusStats, TermStats};

/// Raw term frequency divided by the log of the length-to-average ratio.
///
/// The idf is `log2((N - n) / n)`, which is undefined for a term appearing
/// in no document (`n = 0`) or in every document (`n = N`); those inputs
/// produce NaN or infinite idf values and are accepted edge cases rather
/// than guarded conditions. Likewise the normalizer `log2(dl / adl)` is zero
/// for a document of exactly average length, which makes the score
/// non-finite. The only guard is `tf = 0`, which scores 0 like every
/// similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthRatio;

impl LengthRatio {
  fn idf(n_docs: f32, doc_freq: f32) -> f32 {
    log2((n_docs - doc_freq) / doc_freq)
  }
}

impl Similarity for LengthRatio {
  fn kind(&self) -> SimilarityKind {
    SimilarityKind::LengthRatio
  }

  fn build_weight(&self, corpus: &CorpusStats, terms: &[TermStats]) -> QueryWeight {
    let idf = aggregate_idf(corpus, terms, Self::idf);
    let adl = corpus.avg_doc_length();

    let mut table = Box::new([0.0f32; 256]);
    for (byte, k) in table.iter_mut().enumerate() {
      *k = log2(norm::decode(byte as u8) / adl);
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
      None => log2(norm::decode(norm_byte) / weight.avg_doc_len),
    };
    tf / k * weight.idf
  }
}
