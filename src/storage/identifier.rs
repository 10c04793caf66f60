//! Node identifiers.
//!
//! ```text
//!  63      59  58  57   56 55          48 47                              0
//! ┌──────────┬───┬────────┬──────────────┬─────────────────────────────────┐
//! │ reserved │ I │  kind  │ literal type │ payload (table index | value)   │
//! └──────────┴───┴────────┴──────────────┴─────────────────────────────────┘
//! ```
//!
//! `I` marks a literal whose value is encoded in the payload itself. Table
//! indices start at 1; payload 0 without `I` is the null id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datatypes::LiteralType;

const PAYLOAD_BITS: u32 = 48;
const PAYLOAD_MASK: u64 = (1 << PAYLOAD_BITS) - 1;
const LITERAL_TYPE_SHIFT: u32 = 48;
const KIND_SHIFT: u32 = 56;
const INLINED_BIT: u64 = 1 << 58;

/// Largest table index a `NodeId` can address.
pub const MAX_PAYLOAD: u64 = PAYLOAD_MASK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeKind {
    Iri = 0,
    BlankNode = 1,
    Literal = 2,
    Variable = 3,
}

impl NodeKind {
    fn from_bits(bits: u64) -> Self {
        match bits & 0b11 {
            0 => NodeKind::Iri,
            1 => NodeKind::BlankNode,
            2 => NodeKind::Literal,
            _ => NodeKind::Variable,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Iri => "iri",
            NodeKind::BlankNode => "bnode",
            NodeKind::Literal => "literal",
            NodeKind::Variable => "variable",
        };
        f.write_str(name)
    }
}

/// Opaque term identifier, stable for the lifetime of its `NodeStorage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub const NULL: NodeId = NodeId(0);

    /// Id of table entry `index` (1-based) of the given kind.
    pub(crate) fn stored(kind: NodeKind, literal_type: LiteralType, index: u64) -> Self {
        NodeId(
            (index & PAYLOAD_MASK)
                | (u64::from(literal_type.to_underlying()) << LITERAL_TYPE_SHIFT)
                | ((kind as u64) << KIND_SHIFT),
        )
    }

    /// Id of a literal whose value lives in the payload.
    pub(crate) fn inlined(literal_type: LiteralType, payload: u64) -> Self {
        NodeId(Self::stored(NodeKind::Literal, literal_type, payload).0 | INLINED_BIT)
    }

    pub fn from_raw(raw: u64) -> Self {
        NodeId(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }

    pub fn kind(self) -> NodeKind {
        NodeKind::from_bits(self.0 >> KIND_SHIFT)
    }

    /// `LiteralType::OTHER` for non-literals and generic literals.
    pub fn literal_type(self) -> LiteralType {
        LiteralType(((self.0 >> LITERAL_TYPE_SHIFT) & 0xFF) as u8)
    }

    /// Table index, or the encoded value of an inlined literal.
    pub fn payload(self) -> u64 {
        self.0 & PAYLOAD_MASK
    }

    pub fn is_inlined(self) -> bool {
        self.0 & INLINED_BIT != 0
    }

    pub fn is_null(self) -> bool {
        self.payload() == 0 && !self.is_inlined()
    }

    pub fn is_iri(self) -> bool {
        self.kind() == NodeKind::Iri
    }

    pub fn is_blank_node(self) -> bool {
        self.kind() == NodeKind::BlankNode
    }

    pub fn is_literal(self) -> bool {
        self.kind() == NodeKind::Literal
    }

    pub fn is_variable(self) -> bool {
        self.kind() == NodeKind::Variable
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inlined() {
            write!(f, "{}:{}:inline:{}", self.kind(), self.literal_type(), self.payload())
        } else {
            write!(f, "{}:{}:{}", self.kind(), self.literal_type(), self.payload())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let id = NodeId::stored(NodeKind::Literal, LiteralType::XSD_DECIMAL, 42);
        assert_eq!(id.kind(), NodeKind::Literal);
        assert_eq!(id.literal_type(), LiteralType::XSD_DECIMAL);
        assert_eq!(id.payload(), 42);
        assert!(!id.is_inlined());
        assert_eq!(NodeId::from_raw(id.to_raw()), id);
    }

    #[test]
    fn test_inlined_zero_is_not_null() {
        let f = NodeId::inlined(LiteralType::XSD_BOOLEAN, 0);
        assert!(f.is_inlined());
        assert!(f.is_literal());
        assert!(!f.is_null());
        assert!(NodeId::NULL.is_null());
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let ids = [
            NodeId::stored(NodeKind::Iri, LiteralType::OTHER, 1),
            NodeId::stored(NodeKind::BlankNode, LiteralType::OTHER, 1),
            NodeId::stored(NodeKind::Literal, LiteralType::OTHER, 1),
            NodeId::stored(NodeKind::Variable, LiteralType::OTHER, 1),
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(ids[3].to_string(), "variable:0:1");
    }

    #[test]
    fn test_payload_is_masked() {
        let id = NodeId::stored(NodeKind::Iri, LiteralType::OTHER, MAX_PAYLOAD + 2);
        assert_eq!(id.payload(), 1);
        assert_eq!(id.kind(), NodeKind::Iri);
    }
}
