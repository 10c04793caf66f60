//! XML Schema built-in datatypes.

pub mod binary;
pub mod boolean;
pub mod decimal;
pub mod fixed_width;
pub mod float;
pub mod integer;
pub mod string;

pub use binary::XsdHexBinary;
pub use boolean::XsdBoolean;
pub use decimal::XsdDecimal;
pub use fixed_width::{
    XsdByte, XsdInt, XsdLong, XsdShort, XsdUnsignedByte, XsdUnsignedInt, XsdUnsignedLong,
    XsdUnsignedShort,
};
pub use float::{XsdDouble, XsdFloat};
pub use integer::{
    XsdInteger, XsdNegativeInteger, XsdNonNegativeInteger, XsdNonPositiveInteger,
    XsdPositiveInteger,
};
pub use string::XsdString;

pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";

// ============================================================================
// 48-bit inline payloads
// ============================================================================

const INLINE_BITS: u32 = 48;
const INLINE_MASK: u64 = (1 << INLINE_BITS) - 1;
const INLINE_SIGNED_MIN: i64 = -(1 << (INLINE_BITS - 1));
const INLINE_SIGNED_MAX: i64 = (1 << (INLINE_BITS - 1)) - 1;

/// Two's complement in 48 bits, `None` if `v` needs more.
pub(crate) fn inline_signed(v: i64) -> Option<u64> {
    (INLINE_SIGNED_MIN..=INLINE_SIGNED_MAX)
        .contains(&v)
        .then_some(v as u64 & INLINE_MASK)
}

/// Sign-extends a 48-bit payload.
pub(crate) fn extract_signed(payload: u64) -> i64 {
    ((payload << (64 - INLINE_BITS)) as i64) >> (64 - INLINE_BITS)
}

pub(crate) fn inline_unsigned(v: u64) -> Option<u64> {
    (v <= INLINE_MASK).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_inline_round_trip() {
        for v in [0, 1, -1, INLINE_SIGNED_MIN, INLINE_SIGNED_MAX, 123_456_789, -987_654_321] {
            let payload = inline_signed(v).unwrap();
            assert_eq!(payload & !INLINE_MASK, 0);
            assert_eq!(extract_signed(payload), v);
        }
    }

    #[test]
    fn test_inline_range() {
        assert_eq!(inline_signed(INLINE_SIGNED_MAX + 1), None);
        assert_eq!(inline_signed(INLINE_SIGNED_MIN - 1), None);
        assert_eq!(inline_unsigned(INLINE_MASK), Some(INLINE_MASK));
        assert_eq!(inline_unsigned(INLINE_MASK + 1), None);
    }
}
