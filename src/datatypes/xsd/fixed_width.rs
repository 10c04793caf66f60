//! Fixed-width integer datatypes.
//!
//! ```text
//!   integer ─▶ long ─▶ int ─▶ short ─▶ byte
//!   nonNegativeInteger ─▶ unsignedLong ─▶ unsignedInt ─▶ unsignedShort ─▶ unsignedByte
//! ```
//!
//! None of them has arithmetic of its own; it is borrowed from
//! `xsd:integer`. A lexical form outside the primitive's range is a
//! validation error, a supertype value outside it a constraint violation.

use std::cmp::Ordering;

use num_bigint::BigInt;

use super::{
    XsdInteger, XsdNonNegativeInteger, extract_signed, inline_signed, inline_unsigned,
};
use crate::codec;
use crate::datatypes::LiteralType;
use crate::datatypes::capabilities::*;
use crate::{Error, Result};

macro_rules! fixed_width_integer {
    ($name:ident, $ty:ty, $iri:expr, $fixed:expr, $super:ty, signed) => {
        fixed_width_integer!(@common $name, $ty, $iri, $fixed, $super);

        impl Inlineable for $name {
            fn try_into_inlined(value: &$ty) -> Option<u64> {
                inline_signed(i64::from(*value))
            }

            fn from_inlined(payload: u64) -> $ty {
                extract_signed(payload) as $ty
            }
        }
    };
    ($name:ident, $ty:ty, $iri:expr, $fixed:expr, $super:ty, unsigned) => {
        fixed_width_integer!(@common $name, $ty, $iri, $fixed, $super);

        impl Inlineable for $name {
            fn try_into_inlined(value: &$ty) -> Option<u64> {
                inline_unsigned(u64::from(*value))
            }

            fn from_inlined(payload: u64) -> $ty {
                payload as $ty
            }
        }
    };
    (@common $name:ident, $ty:ty, $iri:expr, $fixed:expr, $super:ty) => {
        pub struct $name;

        impl LiteralDatatype for $name {
            const IDENTIFIER: &'static str = $iri;
            type Repr = $ty;

            fn from_string(s: &str) -> Result<$ty> {
                codec::parse_integer::<$ty>(s).map_err(|e| invalid_lexical::<Self>(s, e))
            }

            fn to_canonical_string(value: &$ty) -> String {
                codec::format_integer(value)
            }
        }

        impl Logical for $name {
            fn effective_boolean_value(value: &$ty) -> bool {
                *value != 0
            }
        }

        impl NumericStub for $name {
            type NumericImpl = XsdInteger;

            fn into_numeric_impl(value: &$ty) -> BigInt {
                BigInt::from(*value)
            }
        }

        impl Comparable for $name {
            fn compare(lhs: &$ty, rhs: &$ty) -> Option<Ordering> {
                Some(lhs.cmp(rhs))
            }
        }

        impl Subtype for $name {
            type Supertype = $super;

            fn from_supertype(value: &Repr<$super>) -> Result<$ty> {
                <$ty as num_traits::NumCast>::from(value.clone()).ok_or_else(|| {
                    Error::ConstraintViolation(format!(
                        "{value} is out of range for {}",
                        Self::IDENTIFIER
                    ))
                })
            }

            fn into_supertype(value: &$ty) -> Result<Repr<$super>> {
                Ok((*value).into())
            }
        }

        impl FixedId for $name {
            const FIXED_ID: LiteralType = $fixed;
        }
    };
}

fixed_width_integer!(XsdLong, i64, super::LONG, LiteralType::XSD_LONG, XsdInteger, signed);
fixed_width_integer!(XsdInt, i32, super::INT, LiteralType::XSD_INT, XsdLong, signed);
fixed_width_integer!(XsdShort, i16, super::SHORT, LiteralType::XSD_SHORT, XsdInt, signed);
fixed_width_integer!(XsdByte, i8, super::BYTE, LiteralType::XSD_BYTE, XsdShort, signed);

fixed_width_integer!(
    XsdUnsignedLong,
    u64,
    super::UNSIGNED_LONG,
    LiteralType::XSD_UNSIGNED_LONG,
    XsdNonNegativeInteger,
    unsigned
);
fixed_width_integer!(
    XsdUnsignedInt,
    u32,
    super::UNSIGNED_INT,
    LiteralType::XSD_UNSIGNED_INT,
    XsdUnsignedLong,
    unsigned
);
fixed_width_integer!(
    XsdUnsignedShort,
    u16,
    super::UNSIGNED_SHORT,
    LiteralType::XSD_UNSIGNED_SHORT,
    XsdUnsignedInt,
    unsigned
);
fixed_width_integer!(
    XsdUnsignedByte,
    u8,
    super::UNSIGNED_BYTE,
    LiteralType::XSD_UNSIGNED_BYTE,
    XsdUnsignedShort,
    unsigned
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_canonical() {
        assert_eq!(XsdByte::from_string("-0128").unwrap(), -128);
        assert_eq!(XsdUnsignedShort::from_string("+65535").unwrap(), 65535);
        assert_eq!(XsdInt::to_canonical_string(&XsdInt::from_string("+007").unwrap()), "7");
        assert_eq!(XsdUnsignedByte::from_string("-0").unwrap(), 0);
    }

    #[test]
    fn test_out_of_range_lexical_is_validation_error() {
        for (lexical, result) in [
            ("128", XsdByte::from_string("128").map(|_| ())),
            ("-1", XsdUnsignedInt::from_string("-1").map(|_| ())),
            (
                "18446744073709551616",
                XsdUnsignedLong::from_string("18446744073709551616").map(|_| ()),
            ),
        ] {
            assert!(matches!(result, Err(Error::Validation { .. })), "{lexical:?}");
        }
    }

    #[test]
    fn test_narrowing_from_supertype() {
        assert_eq!(XsdShort::from_supertype(&1000).unwrap(), 1000i16);
        assert!(matches!(XsdShort::from_supertype(&70_000), Err(Error::ConstraintViolation(_))));
        assert_eq!(XsdLong::from_supertype(&BigInt::from(-5)).unwrap(), -5i64);
        assert!(matches!(
            XsdUnsignedLong::from_supertype(&(BigInt::from(u64::MAX) + 1)),
            Err(Error::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_widening_to_supertype() {
        assert_eq!(XsdByte::into_supertype(&-3).unwrap(), -3i16);
        assert_eq!(XsdUnsignedLong::into_supertype(&u64::MAX).unwrap(), BigInt::from(u64::MAX));
    }

    #[test]
    fn test_inline_round_trip() {
        for v in [i64::from(i32::MIN), -1, 0, 1 << 40] {
            let payload = XsdLong::try_into_inlined(&v).unwrap();
            assert_eq!(XsdLong::from_inlined(payload), v);
        }
        assert_eq!(XsdLong::try_into_inlined(&i64::MAX), None);
        assert_eq!(XsdUnsignedLong::try_into_inlined(&u64::MAX), None);
        let payload = XsdByte::try_into_inlined(&-7).unwrap();
        assert_eq!(XsdByte::from_inlined(payload), -7);
    }
}
