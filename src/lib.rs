//! Scorus - document ranking and relevance feedback for text retrieval.
//!
//! Scorus is the scoring core of a retrieval toolkit. It provides a family
//! of interchangeable ranking formulas (BM25 and three related variants),
//! the lossy length-norm codec they share, and an RM1-style
//! relevance-feedback model that derives weighted expansion terms from
//! labeled example documents. Indexing, query parsing and analysis
//! pipelines are external collaborators behind the `IndexReader` seam and
//! injected tokenizer functions.

pub mod error;
pub mod feedback;
pub mod index;
pub mod norm;
pub mod rank;
pub mod similarity;
pub mod tokenizer;
pub mod types;

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::error::*;
  pub use crate::feedback::*;
  pub use crate::index::*;
  pub use crate::norm;
  pub use crate::rank::*;
  pub use crate::similarity::*;
  pub use crate::tokenizer::*;
  pub use crate::types::*;
}
