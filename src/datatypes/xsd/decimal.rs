//! `xsd:decimal`.

use std::cmp::Ordering;

use num_traits::Zero;

use super::XsdFloat;
use crate::Result;
use crate::codec::decimal::{self as codec, BigDecimal};
use crate::datatypes::LiteralType;
use crate::datatypes::capabilities::*;

pub struct XsdDecimal;

impl LiteralDatatype for XsdDecimal {
    const IDENTIFIER: &'static str = super::DECIMAL;
    type Repr = BigDecimal;

    fn from_string(s: &str) -> Result<BigDecimal> {
        codec::parse_decimal(s).map_err(|e| invalid_lexical::<Self>(s, e))
    }

    fn to_canonical_string(value: &BigDecimal) -> String {
        codec::format_decimal(value)
    }

    fn to_simplified_string(value: &BigDecimal) -> String {
        codec::format_decimal_simplified(value)
    }
}

impl Logical for XsdDecimal {
    fn effective_boolean_value(value: &BigDecimal) -> bool {
        !value.is_zero()
    }
}

impl Numeric for XsdDecimal {
    type DivResult = XsdDecimal;

    fn add(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
        codec::add(lhs, rhs)
    }

    fn sub(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
        codec::sub(lhs, rhs)
    }

    fn mul(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
        codec::mul(lhs, rhs)
    }

    fn div(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
        codec::div(lhs, rhs)
    }

    fn abs(value: &BigDecimal) -> Result<BigDecimal> {
        codec::abs(value)
    }

    fn round(value: &BigDecimal) -> Result<BigDecimal> {
        codec::round(value)
    }

    fn floor(value: &BigDecimal) -> Result<BigDecimal> {
        codec::floor(value)
    }

    fn ceil(value: &BigDecimal) -> Result<BigDecimal> {
        codec::ceil(value)
    }
}

impl Comparable for XsdDecimal {
    fn compare(lhs: &BigDecimal, rhs: &BigDecimal) -> Option<Ordering> {
        Some(codec::compare(lhs, rhs))
    }
}

impl Promotable for XsdDecimal {
    type Promoted = XsdFloat;

    fn promote(value: &BigDecimal) -> Result<f32> {
        codec::to_float(value)
    }
}

impl DoublePromotable for XsdDecimal {
    fn promote_to_double(value: &BigDecimal) -> Result<f64> {
        codec::to_float(value)
    }
}

impl FixedId for XsdDecimal {
    const FIXED_ID: LiteralType = LiteralType::XSD_DECIMAL;
}
