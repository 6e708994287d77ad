//! The index-collaborator seam and the in-memory default implementation.

pub mod adapter;
pub mod memory;

pub use adapter::IndexReader;
pub use memory::MemoryIndex;
