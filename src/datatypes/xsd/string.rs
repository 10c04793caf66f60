//! `xsd:string`.

use std::cmp::Ordering;

use crate::Result;
use crate::datatypes::LiteralType;
use crate::datatypes::capabilities::*;

pub struct XsdString;

impl LiteralDatatype for XsdString {
    const IDENTIFIER: &'static str = super::STRING;
    type Repr = String;

    fn from_string(s: &str) -> Result<String> {
        Ok(s.to_owned())
    }

    fn to_canonical_string(value: &String) -> String {
        value.clone()
    }
}

impl Logical for XsdString {
    fn effective_boolean_value(value: &String) -> bool {
        !value.is_empty()
    }
}

impl Comparable for XsdString {
    fn compare(lhs: &String, rhs: &String) -> Option<Ordering> {
        Some(lhs.cmp(rhs))
    }
}

impl FixedId for XsdString {
    const FIXED_ID: LiteralType = LiteralType::XSD_STRING;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_verbatim() {
        let v = XsdString::from_string("  Hello\n").unwrap();
        assert_eq!(XsdString::to_canonical_string(&v), "  Hello\n");
    }

    #[test]
    fn test_ebv() {
        assert!(!XsdString::effective_boolean_value(&String::new()));
        assert!(XsdString::effective_boolean_value(&"false".to_owned()));
    }
}
