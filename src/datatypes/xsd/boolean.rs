//! `xsd:boolean`: lexical space `true | false | 1 | 0`.

use std::cmp::Ordering;

use crate::datatypes::LiteralType;
use crate::datatypes::capabilities::*;
use crate::{Error, Result};

pub struct XsdBoolean;

impl LiteralDatatype for XsdBoolean {
    const IDENTIFIER: &'static str = super::BOOLEAN;
    type Repr = bool;

    fn from_string(s: &str) -> Result<bool> {
        match s {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid_lexical::<Self>(
                s,
                Error::Parse("expected one of true, false, 1, 0".into()),
            )),
        }
    }

    fn to_canonical_string(value: &bool) -> String {
        if *value { "true" } else { "false" }.to_owned()
    }
}

impl Logical for XsdBoolean {
    fn effective_boolean_value(value: &bool) -> bool {
        *value
    }
}

impl Comparable for XsdBoolean {
    fn compare(lhs: &bool, rhs: &bool) -> Option<Ordering> {
        Some(lhs.cmp(rhs))
    }
}

impl FixedId for XsdBoolean {
    const FIXED_ID: LiteralType = LiteralType::XSD_BOOLEAN;
}

impl Inlineable for XsdBoolean {
    fn try_into_inlined(value: &bool) -> Option<u64> {
        Some(u64::from(*value))
    }

    fn from_inlined(payload: u64) -> bool {
        payload != 0
    }
}
