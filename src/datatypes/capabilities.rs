//! Capability contracts a literal datatype may implement.
//!
//! A datatype is a zero-sized marker type implementing `LiteralDatatype`
//! plus any subset of the traits below. Which subset is decided once, when
//! the datatype's `DatatypeDescriptor` is built (see `descriptor.rs`).

use std::cmp::Ordering;

use super::LiteralType;
use super::value::ValueRepr;
use crate::{Error, Result};

/// Native value type of datatype `T`.
pub type Repr<T> = <T as LiteralDatatype>::Repr;

/// Parsing and canonical serialization. Every datatype has this.
pub trait LiteralDatatype: 'static {
    /// The datatype IRI.
    const IDENTIFIER: &'static str;

    type Repr: ValueRepr;

    /// Validates and converts a lexical form. Rejections are
    /// `Error::Validation` (or `Error::ConstraintViolation` for subtypes).
    fn from_string(s: &str) -> Result<Self::Repr>;

    fn to_canonical_string(value: &Self::Repr) -> String;

    /// Human-oriented rendering; not necessarily canonical.
    fn to_simplified_string(value: &Self::Repr) -> String {
        Self::to_canonical_string(value)
    }
}

/// Effective boolean value.
pub trait Logical: LiteralDatatype {
    fn effective_boolean_value(value: &Self::Repr) -> bool;
}

/// Arithmetic. `add`, `sub`, `mul` and the unary operations stay in this
/// datatype; `div` may produce another one (integer division yields a
/// decimal).
pub trait Numeric: LiteralDatatype {
    type DivResult: LiteralDatatype;

    fn add(lhs: &Self::Repr, rhs: &Self::Repr) -> Result<Self::Repr>;
    fn sub(lhs: &Self::Repr, rhs: &Self::Repr) -> Result<Self::Repr>;
    fn mul(lhs: &Self::Repr, rhs: &Self::Repr) -> Result<Self::Repr>;
    fn div(lhs: &Self::Repr, rhs: &Self::Repr) -> Result<Repr<Self::DivResult>>;

    fn abs(value: &Self::Repr) -> Result<Self::Repr>;
    fn round(value: &Self::Repr) -> Result<Self::Repr>;
    fn floor(value: &Self::Repr) -> Result<Self::Repr>;
    fn ceil(value: &Self::Repr) -> Result<Self::Repr>;
}

/// Arithmetic borrowed from an ancestor: operands are converted to
/// `NumericImpl` and the result is a `NumericImpl` value. The result is
/// not checked against this datatype's own restriction.
pub trait NumericStub: LiteralDatatype {
    type NumericImpl: Numeric;

    fn into_numeric_impl(value: &Self::Repr) -> Repr<Self::NumericImpl>;
}

/// Three-way comparison; `None` means unordered (e.g. `NaN`).
pub trait Comparable: LiteralDatatype {
    fn compare(lhs: &Self::Repr, rhs: &Self::Repr) -> Option<Ordering>;
}

/// Restriction of a declared supertype.
pub trait Subtype: LiteralDatatype {
    type Supertype: LiteralDatatype;

    /// Narrows a supertype value, `Error::ConstraintViolation` if it does
    /// not satisfy this datatype's restriction.
    fn from_supertype(value: &Repr<Self::Supertype>) -> Result<Self::Repr>;

    /// Widens to the supertype; fails only when the supertype's
    /// representation is narrower (an `xsd:integer` beyond decimal range).
    fn into_supertype(value: &Self::Repr) -> Result<Repr<Self::Supertype>>;
}

/// Implicit widening used by mixed-type arithmetic and comparison.
pub trait Promotable: LiteralDatatype {
    type Promoted: LiteralDatatype;

    fn promote(value: &Self::Repr) -> Result<Repr<Self::Promoted>>;
}

/// Exact widening straight to `xsd:double`. Used instead of the promotion
/// chain when that chain would pass through the narrower `xsd:float`.
pub trait DoublePromotable: Promotable {
    fn promote_to_double(value: &Self::Repr) -> Result<f64>;
}

/// A small stable tag; enables the specialized literal tables.
pub trait FixedId: LiteralDatatype {
    const FIXED_ID: LiteralType;
}

/// Values that may be packed into the 48-bit payload of a `NodeId`.
pub trait Inlineable: FixedId {
    fn try_into_inlined(value: &Self::Repr) -> Option<u64>;

    fn from_inlined(payload: u64) -> Self::Repr;
}

/// `from_string` for subtypes: parse as the supertype, then narrow.
pub fn subtype_from_string<T: Subtype>(s: &str) -> Result<T::Repr> {
    let value = T::Supertype::from_string(s).map_err(|e| match e {
        Error::Validation { lexical, reason, .. } => Error::Validation {
            datatype: T::IDENTIFIER.to_owned(),
            lexical,
            reason,
        },
        other => other,
    })?;
    T::from_supertype(&value)
}

/// Wraps a codec failure as a rejection by datatype `T`.
pub fn invalid_lexical<T: LiteralDatatype>(s: &str, cause: Error) -> Error {
    let reason = match cause {
        Error::Parse(msg) => msg,
        other => other.to_string(),
    };
    Error::Validation {
        datatype: T::IDENTIFIER.to_owned(),
        lexical: s.to_owned(),
        reason,
    }
}
