//! # Term Interning Store
//!
//! `NodeStorage` owns one `NodeTypeStorage` per backend kind and hands out
//! `NodeId`s. Backend instances are immutable and live as long as the
//! store; callers only ever see ids and shared read-only views.
//!
//! ## Tables
//!
//! | Table | Backend | Holds |
//! |-------|---------|-------|
//! | `iri` | `IriBackend` | IRIs, including every registered datatype IRI |
//! | `bnode` | `BNodeBackend` | blank node labels |
//! | `variable` | `VariableBackend` | named and anonymous variables |
//! | `literal` | `FallbackLiteralBackend` | lexical form + datatype + language tag |
//! | one per fixed id | `SpecializedLiteralBackend` | native values |
//!
//! ## Lock order
//!
//! No operation holds two table locks at once: every table access copies
//! out what it needs and releases its lock. Should an operation ever need
//! two, they must be taken in the order iri, bnode, variable, literal,
//! then specialized tables by ascending `LiteralType`.

pub mod backend;
pub mod config;
pub mod identifier;
pub mod node_storage;
pub mod table;

pub use backend::{
    BNodeBackend, FallbackLiteralBackend, IriBackend, LiteralView, NodeBackend,
    SpecializedLiteralBackend, SpecializedLiteralView, VariableBackend, VariableView,
};
pub use config::NodeStorageConfig;
pub use identifier::{NodeId, NodeKind};
pub use node_storage::{NodeStorage, StorageStats};
pub use table::NodeTypeStorage;
