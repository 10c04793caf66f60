//! `xsd:double` and `xsd:float`: IEEE 754 binary64 and binary32.
//!
//! Arithmetic follows IEEE semantics, so division by zero produces an
//! infinity or `NaN` rather than an error.

use std::cmp::Ordering;

use num_traits::Float;

use crate::codec;
use crate::datatypes::LiteralType;
use crate::datatypes::capabilities::*;
use crate::Result;

/// Plain decimal notation for values of everyday magnitude, canonical
/// scientific notation otherwise.
fn simplified<F>(value: F, plain: String) -> String
where
    F: Float + std::fmt::LowerExp,
{
    let magnitude = value.abs();
    let everyday = F::from(1e-4).is_some_and(|lo| magnitude >= lo)
        && F::from(1e15).is_some_and(|hi| magnitude < hi);
    if value.is_zero() || everyday {
        plain
    } else {
        codec::format_float(value)
    }
}

fn ebv<F: Float>(value: F) -> bool {
    !(value.is_zero() || value.is_nan())
}

macro_rules! ieee_datatype {
    ($name:ident, $ty:ty, $iri:expr, $fixed:expr) => {
        pub struct $name;

        impl LiteralDatatype for $name {
            const IDENTIFIER: &'static str = $iri;
            type Repr = $ty;

            fn from_string(s: &str) -> Result<$ty> {
                codec::parse_float::<$ty>(s).map_err(|e| invalid_lexical::<Self>(s, e))
            }

            fn to_canonical_string(value: &$ty) -> String {
                codec::format_float(*value)
            }

            fn to_simplified_string(value: &$ty) -> String {
                simplified(*value, value.to_string())
            }
        }

        impl Logical for $name {
            fn effective_boolean_value(value: &$ty) -> bool {
                ebv(*value)
            }
        }

        impl Numeric for $name {
            type DivResult = $name;

            fn add(lhs: &$ty, rhs: &$ty) -> Result<$ty> {
                Ok(lhs + rhs)
            }

            fn sub(lhs: &$ty, rhs: &$ty) -> Result<$ty> {
                Ok(lhs - rhs)
            }

            fn mul(lhs: &$ty, rhs: &$ty) -> Result<$ty> {
                Ok(lhs * rhs)
            }

            fn div(lhs: &$ty, rhs: &$ty) -> Result<$ty> {
                Ok(lhs / rhs)
            }

            fn abs(value: &$ty) -> Result<$ty> {
                Ok(value.abs())
            }

            fn round(value: &$ty) -> Result<$ty> {
                Ok(value.round())
            }

            fn floor(value: &$ty) -> Result<$ty> {
                Ok(value.floor())
            }

            fn ceil(value: &$ty) -> Result<$ty> {
                Ok(value.ceil())
            }
        }

        impl Comparable for $name {
            fn compare(lhs: &$ty, rhs: &$ty) -> Option<Ordering> {
                lhs.partial_cmp(rhs)
            }
        }

        impl FixedId for $name {
            const FIXED_ID: LiteralType = $fixed;
        }
    };
}

ieee_datatype!(XsdDouble, f64, super::DOUBLE, LiteralType::XSD_DOUBLE);
ieee_datatype!(XsdFloat, f32, super::FLOAT, LiteralType::XSD_FLOAT);

impl Promotable for XsdFloat {
    type Promoted = XsdDouble;

    fn promote(value: &f32) -> Result<f64> {
        Ok(f64::from(*value))
    }
}

impl Inlineable for XsdFloat {
    fn try_into_inlined(value: &f32) -> Option<u64> {
        let bits = if value.is_nan() { f32::NAN.to_bits() } else { value.to_bits() };
        Some(u64::from(bits))
    }

    fn from_inlined(payload: u64) -> f32 {
        f32::from_bits(payload as u32)
    }
}
