//! `xsd:integer` and its sign-constrained subtypes.
//!
//! All five share an unbounded `BigInt` representation. Only `xsd:integer`
//! has its own arithmetic; the constrained subtypes borrow it through
//! `NumericStub`, so `positiveInteger - positiveInteger` is an `xsd:integer`.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use super::{XsdDecimal, extract_signed, inline_signed};
use crate::codec;
use crate::codec::decimal::{self as decimal_codec, BigDecimal};
use crate::datatypes::LiteralType;
use crate::datatypes::capabilities::*;
use crate::{Error, Result};

fn try_inline(value: &BigInt) -> Option<u64> {
    value.to_i64().and_then(inline_signed)
}

// ============================================================================
// xsd:integer
// ============================================================================

pub struct XsdInteger;

impl LiteralDatatype for XsdInteger {
    const IDENTIFIER: &'static str = super::INTEGER;
    type Repr = BigInt;

    fn from_string(s: &str) -> Result<BigInt> {
        codec::parse_big_integer(s).map_err(|e| invalid_lexical::<Self>(s, e))
    }

    fn to_canonical_string(value: &BigInt) -> String {
        codec::format_integer(value)
    }
}

impl Logical for XsdInteger {
    fn effective_boolean_value(value: &BigInt) -> bool {
        !value.is_zero()
    }
}

impl Numeric for XsdInteger {
    type DivResult = XsdDecimal;

    fn add(lhs: &BigInt, rhs: &BigInt) -> Result<BigInt> {
        Ok(lhs + rhs)
    }

    fn sub(lhs: &BigInt, rhs: &BigInt) -> Result<BigInt> {
        Ok(lhs - rhs)
    }

    fn mul(lhs: &BigInt, rhs: &BigInt) -> Result<BigInt> {
        Ok(lhs * rhs)
    }

    fn div(lhs: &BigInt, rhs: &BigInt) -> Result<BigDecimal> {
        // operands are exact here; only the quotient is held to the bound
        let lhs = BigDecimal::new(lhs.clone(), 0);
        let rhs = BigDecimal::new(rhs.clone(), 0);
        decimal_codec::div(&lhs, &rhs)
    }

    fn abs(value: &BigInt) -> Result<BigInt> {
        Ok(value.abs())
    }

    fn round(value: &BigInt) -> Result<BigInt> {
        Ok(value.clone())
    }

    fn floor(value: &BigInt) -> Result<BigInt> {
        Ok(value.clone())
    }

    fn ceil(value: &BigInt) -> Result<BigInt> {
        Ok(value.clone())
    }
}

impl Comparable for XsdInteger {
    fn compare(lhs: &BigInt, rhs: &BigInt) -> Option<Ordering> {
        Some(lhs.cmp(rhs))
    }
}

impl Subtype for XsdInteger {
    type Supertype = XsdDecimal;

    fn from_supertype(value: &BigDecimal) -> Result<BigInt> {
        decimal_codec::to_integer(value).ok_or_else(|| {
            Error::ConstraintViolation(format!(
                "{} is not an integer",
                decimal_codec::format_decimal(value)
            ))
        })
    }

    fn into_supertype(value: &BigInt) -> Result<BigDecimal> {
        decimal_codec::from_integer(value)
    }
}

impl Promotable for XsdInteger {
    type Promoted = XsdDecimal;

    fn promote(value: &BigInt) -> Result<BigDecimal> {
        decimal_codec::from_integer(value)
    }
}

impl DoublePromotable for XsdInteger {
    fn promote_to_double(value: &BigInt) -> Result<f64> {
        value
            .to_f64()
            .filter(|v| v.is_finite())
            .ok_or(Error::OverOrUnderflow)
    }
}

impl FixedId for XsdInteger {
    const FIXED_ID: LiteralType = LiteralType::XSD_INTEGER;
}

impl Inlineable for XsdInteger {
    fn try_into_inlined(value: &BigInt) -> Option<u64> {
        try_inline(value)
    }

    fn from_inlined(payload: u64) -> BigInt {
        BigInt::from(extract_signed(payload))
    }
}

// ============================================================================
// Sign-constrained subtypes
// ============================================================================

macro_rules! constrained_integer {
    (
        $(#[$meta:meta])*
        $name:ident, $iri:expr, $fixed:expr, $super:ty,
        |$v:ident| $check:expr, $violation:literal
    ) => {
        $(#[$meta])*
        pub struct $name;

        impl LiteralDatatype for $name {
            const IDENTIFIER: &'static str = $iri;
            type Repr = BigInt;

            fn from_string(s: &str) -> Result<BigInt> {
                subtype_from_string::<Self>(s)
            }

            fn to_canonical_string(value: &BigInt) -> String {
                codec::format_integer(value)
            }
        }

        impl Logical for $name {
            fn effective_boolean_value(value: &BigInt) -> bool {
                !value.is_zero()
            }
        }

        impl NumericStub for $name {
            type NumericImpl = XsdInteger;

            fn into_numeric_impl(value: &BigInt) -> BigInt {
                value.clone()
            }
        }

        impl Comparable for $name {
            fn compare(lhs: &BigInt, rhs: &BigInt) -> Option<Ordering> {
                Some(lhs.cmp(rhs))
            }
        }

        impl Subtype for $name {
            type Supertype = $super;

            fn from_supertype($v: &BigInt) -> Result<BigInt> {
                if $check {
                    Ok($v.clone())
                } else {
                    Err(Error::ConstraintViolation(format!(
                        concat!("{} ", $violation),
                        $v
                    )))
                }
            }

            fn into_supertype(value: &BigInt) -> Result<BigInt> {
                Ok(value.clone())
            }
        }

        impl FixedId for $name {
            const FIXED_ID: LiteralType = $fixed;
        }

        impl Inlineable for $name {
            fn try_into_inlined(value: &BigInt) -> Option<u64> {
                try_inline(value)
            }

            fn from_inlined(payload: u64) -> BigInt {
                BigInt::from(extract_signed(payload))
            }
        }
    };
}

constrained_integer! {
    /// `xsd:nonPositiveInteger`: `v <= 0`.
    XsdNonPositiveInteger,
    super::NON_POSITIVE_INTEGER,
    LiteralType::XSD_NON_POSITIVE_INTEGER,
    XsdInteger,
    |v| !v.is_positive(), "is not a non-positive integer"
}

constrained_integer! {
    /// `xsd:negativeInteger`: `v < 0`.
    XsdNegativeInteger,
    super::NEGATIVE_INTEGER,
    LiteralType::XSD_NEGATIVE_INTEGER,
    XsdNonPositiveInteger,
    |v| v.is_negative(), "is not a negative integer"
}

constrained_integer! {
    /// `xsd:nonNegativeInteger`: `v >= 0`.
    XsdNonNegativeInteger,
    super::NON_NEGATIVE_INTEGER,
    LiteralType::XSD_NON_NEGATIVE_INTEGER,
    XsdInteger,
    |v| !v.is_negative(), "is not a non-negative integer"
}

constrained_integer! {
    /// `xsd:positiveInteger`: `v > 0`.
    XsdPositiveInteger,
    super::POSITIVE_INTEGER,
    LiteralType::XSD_POSITIVE_INTEGER,
    XsdNonNegativeInteger,
    |v| v.is_positive(), "is not a positive integer"
}
