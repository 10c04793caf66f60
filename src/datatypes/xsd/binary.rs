//! `xsd:hexBinary`.

use crate::Result;
use crate::codec::HexBinary;
use crate::datatypes::LiteralType;
use crate::datatypes::capabilities::*;

pub struct XsdHexBinary;

impl LiteralDatatype for XsdHexBinary {
    const IDENTIFIER: &'static str = super::HEX_BINARY;
    type Repr = HexBinary;

    fn from_string(s: &str) -> Result<HexBinary> {
        HexBinary::from_encoded(s).map_err(|e| invalid_lexical::<Self>(s, e))
    }

    fn to_canonical_string(value: &HexBinary) -> String {
        value.to_encoded()
    }
}

impl FixedId for XsdHexBinary {
    const FIXED_ID: LiteralType = LiteralType::XSD_HEX_BINARY;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_canonical_forms() {
        for (input, canonical) in [
            ("0FB7", "0FB7"),
            ("fb7", "0FB7"),
            ("00ab89", "AB89"),
            ("0000", "0"),
        ] {
            let value = XsdHexBinary::from_string(input).unwrap();
            assert_eq!(XsdHexBinary::to_canonical_string(&value), canonical, "{input:?}");
        }
    }

    #[test]
    fn test_non_hex_digit_is_validation_error() {
        let err = XsdHexBinary::from_string("0FXB7").unwrap_err();
        assert!(matches!(err, Error::Validation { ref lexical, .. } if lexical == "0FXB7"));
    }
}
