//! # Term Model
//!
//! Owned, store-independent copies of RDF terms. Everything in here is pure
//! data; the store hands these out from `NodeStorage::resolve_term`.

pub mod term;

pub use term::{Literal, Term};
