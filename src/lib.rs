//! # rdf-termstore — RDF term interning and typed literals
//!
//! Deduplicates RDF terms (IRIs, blank nodes, literals, variables) into a
//! compact, stable identifier space and gives literal values of the standard
//! XSD datatypes their canonical lexical forms, comparisons and arithmetic.
//!
//! ## Design Principles
//!
//! 1. **Hash-consing**: every structurally-equal term maps to one stored
//!    instance and one `NodeId` for the lifetime of its `NodeStorage`
//! 2. **Explicit registry**: datatypes are composed from capabilities once,
//!    at `DatatypeRegistry` construction, and never change afterwards
//! 3. **Canonical text is an interface**: `codec` output is bit-exact
//! 4. **Growth-only**: nothing is ever evicted, so identifiers never dangle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rdf_termstore::{NodeStorage, datatypes::xsd};
//!
//! # fn example() -> rdf_termstore::Result<()> {
//! let store = NodeStorage::new()?;
//!
//! let a = store.make_typed_literal("+01", xsd::INTEGER)?;
//! let b = store.make_typed_literal("1", xsd::INTEGER)?;
//! assert_eq!(a, b);
//! assert_eq!(store.literal_lexical_form(a)?, "1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Term Kinds
//!
//! | Kind | Table | Notes |
//! |------|-------|-------|
//! | IRI | `IriBackend` | datatype IRIs are pre-interned |
//! | Blank node | `BNodeBackend` | |
//! | Variable | `VariableBackend` | named or anonymous |
//! | Literal | `FallbackLiteralBackend` | language-tagged and unknown datatypes |
//! | Literal | `SpecializedLiteralBackend` | one table per fixed-id datatype |
//! | Literal | (none) | inlined directly into the `NodeId` |

// ============================================================================
// Modules
// ============================================================================

pub mod codec;
pub mod datatypes;
pub mod model;
pub mod storage;

// ============================================================================
// Re-exports
// ============================================================================

pub use datatypes::{DatatypeDescriptor, DatatypeRegistry, LiteralType, TypedValue, Value};
pub use model::Term;
pub use storage::{NodeId, NodeKind, NodeStorage, NodeStorageConfig};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid lexical form {lexical:?} for {datatype}: {reason}")]
    Validation {
        datatype: String,
        lexical: String,
        reason: String,
    },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Arithmetic result is not representable")]
    OverOrUnderflow,

    #[error("Division by zero")]
    DivideByZero,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Datatype registered more than once: {0}")]
    DuplicateDatatype(String),

    #[error("Invalid datatype registry: {0}")]
    InvalidRegistry(String),

    #[error("Unknown datatype: {0}")]
    UnknownDatatype(String),

    #[error("Datatype {datatype} does not support {capability}")]
    UnsupportedCapability {
        datatype: String,
        capability: &'static str,
    },

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },
}

pub type Result<T> = std::result::Result<T, Error>;
