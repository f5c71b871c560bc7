//! # Repositories
//!
//! Data access types, one per aggregate:
//!
//! - [`document::DocumentRepository`] - generated document rows
//! - [`counter::CounterRepository`] - gap-free numbering counters
//!
//! Reads run on the pool; writes that must be atomic with the rest of the
//! generation pipeline take a transaction handle instead.

pub mod counter;
pub mod document;
