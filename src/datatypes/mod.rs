//! # Typed-Literal Capability Framework
//!
//! Each literal datatype is a marker type implementing `LiteralDatatype`
//! and a subset of the capability traits (`Logical`, `Numeric`,
//! `NumericStub`, `Comparable`, `Subtype`, `Promotable`, `FixedId`,
//! `Inlineable`). The set is frozen into a `DatatypeDescriptor` when the
//! `DatatypeRegistry` is built; after that everything is dispatched through
//! the descriptor's function table.
//!
//! ```text
//!   lexical text ──from_string──▶ Value ──to_canonical_string──▶ text
//!                                   │
//!                 compare / add / from_supertype / inline …
//! ```

pub mod capabilities;
pub mod descriptor;
pub mod rdf;
pub mod registry;
pub mod value;
pub mod xsd;

use serde::{Deserialize, Serialize};

pub use capabilities::{
    Comparable, FixedId, Inlineable, LiteralDatatype, Logical, Numeric, NumericStub, Promotable,
    Subtype,
};
pub use descriptor::{DatatypeDescriptor, DescriptorBuilder};
pub use registry::{ArithmeticOp, DatatypeRegistry, TypedValue, UnaryOp};
pub use value::{LangString, Value, ValueRepr};

/// Small stable tag of a `FixedId` datatype, stored in `NodeId` bits 48..56.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiteralType(pub u8);

impl LiteralType {
    /// Any datatype without a fixed id.
    pub const OTHER: LiteralType = LiteralType(0);

    pub const XSD_STRING: LiteralType = LiteralType(1);
    pub const XSD_BOOLEAN: LiteralType = LiteralType(2);
    pub const XSD_DECIMAL: LiteralType = LiteralType(3);
    pub const XSD_INTEGER: LiteralType = LiteralType(4);
    pub const XSD_NON_POSITIVE_INTEGER: LiteralType = LiteralType(5);
    pub const XSD_NEGATIVE_INTEGER: LiteralType = LiteralType(6);
    pub const XSD_NON_NEGATIVE_INTEGER: LiteralType = LiteralType(7);
    pub const XSD_POSITIVE_INTEGER: LiteralType = LiteralType(8);
    pub const XSD_LONG: LiteralType = LiteralType(9);
    pub const XSD_INT: LiteralType = LiteralType(10);
    pub const XSD_SHORT: LiteralType = LiteralType(11);
    pub const XSD_BYTE: LiteralType = LiteralType(12);
    pub const XSD_UNSIGNED_LONG: LiteralType = LiteralType(13);
    pub const XSD_UNSIGNED_INT: LiteralType = LiteralType(14);
    pub const XSD_UNSIGNED_SHORT: LiteralType = LiteralType(15);
    pub const XSD_UNSIGNED_BYTE: LiteralType = LiteralType(16);
    pub const XSD_DOUBLE: LiteralType = LiteralType(17);
    pub const XSD_FLOAT: LiteralType = LiteralType(18);
    pub const XSD_HEX_BINARY: LiteralType = LiteralType(19);

    pub fn is_fixed(self) -> bool {
        self != Self::OTHER
    }

    pub fn to_underlying(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for LiteralType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
