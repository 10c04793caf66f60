//! Decimal lexical forms and bounded decimal arithmetic.
//!
//! Values are `BigDecimal`s holding at most `MAX_SIGNIFICANT_DIGITS`
//! significant digits. Lexical forms beyond that are rejected, exact
//! results beyond it are `OverOrUnderflow`, and quotients are rounded to it
//! (halves away from zero). Nothing is silently truncated.

use std::cmp::Ordering;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Float, One, Signed, Zero};

pub use bigdecimal::BigDecimal;

use crate::{Error, Result};

/// Precision bound of every decimal value.
pub const MAX_SIGNIFICANT_DIGITS: u64 = 50;

/// Checks `(\+|-)?([0-9]+(\.[0-9]*)?|\.[0-9]+)` and returns
/// `(negative, integer digits, fraction digits)`.
fn split_decimal(s: &str) -> Option<(bool, &str, &str)> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };

    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    Some((negative, int_part, frac_part))
}

fn pow10(exp: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

fn digit_count(digits: &BigInt) -> u64 {
    digits.magnitude().to_string().len() as u64
}

/// Unscaled digits and scale with trailing zeros stripped; zero is `(0, 0)`.
fn normalized_parts(value: &BigDecimal) -> (BigInt, i64) {
    let (digits, scale) = value.as_bigint_and_exponent();
    if digits.is_zero() {
        return (digits, 0);
    }

    let text = digits.magnitude().to_string();
    let trailing = (text.len() - text.trim_end_matches('0').len()) as u64;
    if trailing == 0 {
        return (digits, scale);
    }
    (digits / pow10(trailing), scale - trailing as i64)
}

/// Numerically equal value with trailing fraction zeros removed, so
/// `1.0`, `1.00` and `1` all normalize to the same digits and scale.
pub fn normalize(value: &BigDecimal) -> BigDecimal {
    let (digits, scale) = normalized_parts(value);
    BigDecimal::new(digits, scale)
}

/// Number of significant digits, ignoring trailing zeros; `0` for zero.
pub fn significant_digits(value: &BigDecimal) -> u64 {
    let (digits, _) = normalized_parts(value);
    if digits.is_zero() { 0 } else { digit_count(&digits) }
}

fn bounded(value: BigDecimal) -> Result<BigDecimal> {
    let value = normalize(&value);
    if significant_digits(&value) > MAX_SIGNIFICANT_DIGITS {
        return Err(Error::OverOrUnderflow);
    }
    Ok(value)
}

/// Rounds `digits * 10^-scale` to `precision` significant digits, halves
/// away from zero.
fn round_significant(digits: BigInt, scale: i64, precision: u64) -> (BigInt, i64) {
    let len = digit_count(&digits);
    if len <= precision {
        return (digits, scale);
    }

    let drop = len - precision;
    let divisor = pow10(drop);
    let quotient = &digits / &divisor;
    let remainder = &digits % &divisor;
    let rounded = if remainder.abs() * BigInt::from(2u8) >= divisor {
        quotient + digits.signum()
    } else {
        quotient
    };
    (rounded, scale - drop as i64)
}

// ============================================================================
// Text
// ============================================================================

/// Parses an `xsd:decimal` lexical form.
///
/// A form with more than `MAX_SIGNIFICANT_DIGITS` significant digits is a
/// parse error, never rounded.
pub fn parse_decimal(s: &str) -> Result<BigDecimal> {
    let (negative, int_part, frac_part) = split_decimal(s)
        .ok_or_else(|| Error::Parse(format!("invalid decimal literal {s:?}")))?;

    let mut all_digits = String::with_capacity(int_part.len() + frac_part.len());
    all_digits.push_str(int_part);
    all_digits.push_str(frac_part);

    let mut digits = BigInt::from_str(&all_digits)
        .map_err(|e| Error::Parse(format!("decimal literal {s:?}: {e}")))?;
    if negative {
        digits = -digits;
    }

    let value = normalize(&BigDecimal::new(digits, frac_part.len() as i64));
    if significant_digits(&value) > MAX_SIGNIFICANT_DIGITS {
        return Err(Error::Parse(format!(
            "decimal literal {s:?} has more than {MAX_SIGNIFICANT_DIGITS} significant digits"
        )));
    }
    Ok(value)
}

fn render(value: &BigDecimal, integral_suffix: &str) -> String {
    let (digits, scale) = normalized_parts(value);
    let magnitude = digits.magnitude().to_string();

    let mut out = String::with_capacity(magnitude.len() + 4);
    if digits.is_negative() {
        out.push('-');
    }

    if scale <= 0 {
        out.push_str(&magnitude);
        out.extend(std::iter::repeat_n('0', scale.unsigned_abs() as usize));
        out.push_str(integral_suffix);
    } else if scale as usize >= magnitude.len() {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', scale as usize - magnitude.len()));
        out.push_str(&magnitude);
    } else {
        let (int_digits, frac_digits) = magnitude.split_at(magnitude.len() - scale as usize);
        out.push_str(int_digits);
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

/// Canonical decimal form: no leading zeros, no trailing fraction zeros,
/// but always at least one digit on each side of the point (`1.0`, `0.5`).
pub fn format_decimal(value: &BigDecimal) -> String {
    render(value, ".0")
}

/// Human-oriented decimal form: like the canonical one, but integral
/// values drop the `.0`.
pub fn format_decimal_simplified(value: &BigDecimal) -> String {
    render(value, "")
}

// ============================================================================
// Conversions
// ============================================================================

/// Exact integer to decimal, `OverOrUnderflow` past the precision bound.
pub fn from_integer(value: &BigInt) -> Result<BigDecimal> {
    bounded(BigDecimal::new(value.clone(), 0))
}

/// The integer value, `None` if there is a non-zero fraction.
pub fn to_integer(value: &BigDecimal) -> Option<BigInt> {
    let (digits, scale) = normalized_parts(value);
    if scale > 0 {
        return None;
    }
    Some(digits * pow10(scale.unsigned_abs()))
}

/// Nearest binary floating point value; `OverOrUnderflow` when it is
/// infinite.
pub fn to_float<F>(value: &BigDecimal) -> Result<F>
where
    F: Float + FromStr,
{
    let converted = format_decimal(value)
        .parse::<F>()
        .map_err(|_| Error::OverOrUnderflow)?;
    if converted.is_infinite() {
        return Err(Error::OverOrUnderflow);
    }
    Ok(converted)
}

// ============================================================================
// Arithmetic
// ============================================================================

pub fn add(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
    bounded(lhs + rhs)
}

pub fn sub(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
    bounded(lhs - rhs)
}

pub fn mul(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
    bounded(lhs * rhs)
}

/// Quotient rounded to `MAX_SIGNIFICANT_DIGITS`.
pub fn div(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal> {
    if rhs.is_zero() {
        return Err(Error::DivideByZero);
    }
    if lhs.is_zero() {
        return Ok(BigDecimal::zero());
    }

    let (lhs_digits, lhs_scale) = normalized_parts(lhs);
    let (rhs_digits, rhs_scale) = normalized_parts(rhs);

    // at least one digit past the bound, for rounding
    let shift = (MAX_SIGNIFICANT_DIGITS + 2 + digit_count(&rhs_digits))
        .saturating_sub(digit_count(&lhs_digits));
    let quotient = lhs_digits * pow10(shift) / rhs_digits;
    let (digits, scale) = round_significant(
        quotient,
        lhs_scale - rhs_scale + shift as i64,
        MAX_SIGNIFICANT_DIGITS,
    );
    Ok(normalize(&BigDecimal::new(digits, scale)))
}

pub fn abs(value: &BigDecimal) -> Result<BigDecimal> {
    Ok(value.abs())
}

#[derive(Clone, Copy)]
enum Integral {
    Floor,
    Ceil,
    HalfAwayFromZero,
}

fn to_integral(value: &BigDecimal, mode: Integral) -> BigDecimal {
    let (digits, scale) = normalized_parts(value);
    if scale <= 0 {
        return BigDecimal::new(digits, scale);
    }

    let divisor = pow10(scale as u64);
    let quotient = &digits / &divisor;
    let remainder = &digits % &divisor;
    let adjusted = match mode {
        Integral::Floor if remainder.is_negative() => quotient - BigInt::one(),
        Integral::Ceil if remainder.is_positive() => quotient + BigInt::one(),
        Integral::HalfAwayFromZero if remainder.abs() * BigInt::from(2u8) >= divisor => {
            quotient + remainder.signum()
        }
        _ => quotient,
    };
    BigDecimal::new(adjusted, 0)
}

/// Rounds to the nearest integer, halves away from zero.
pub fn round(value: &BigDecimal) -> Result<BigDecimal> {
    Ok(to_integral(value, Integral::HalfAwayFromZero))
}

pub fn floor(value: &BigDecimal) -> Result<BigDecimal> {
    Ok(to_integral(value, Integral::Floor))
}

pub fn ceil(value: &BigDecimal) -> Result<BigDecimal> {
    Ok(to_integral(value, Integral::Ceil))
}

/// Total numeric order; `1.0` and `1.00` are equal.
pub fn compare(lhs: &BigDecimal, rhs: &BigDecimal) -> Ordering {
    lhs.cmp(rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        parse_decimal(s).unwrap()
    }

    #[test]
    fn test_canonical_uniqueness() {
        for (input, canonical) in [
            ("1.0", "1.0"),
            ("1.00", "1.0"),
            ("+1", "1.0"),
            ("001.500", "1.5"),
            (".5", "0.5"),
            ("5.", "5.0"),
            ("-0", "0.0"),
            ("-0.000", "0.0"),
            ("-12.340", "-12.34"),
            ("100", "100.0"),
            ("-0.0025", "-0.0025"),
        ] {
            assert_eq!(format_decimal(&dec(input)), canonical, "{input:?}");
        }
    }

    #[test]
    fn test_simplified() {
        assert_eq!(format_decimal_simplified(&dec("100.00")), "100");
        assert_eq!(format_decimal_simplified(&dec("-0.250")), "-0.25");
        assert_eq!(format_decimal_simplified(&dec("-0.0")), "0");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", ".", "+", "-.", "1e5", "1.2.3", "1,5", "++1", " 1", "1_0", "NaN", "INF"] {
            assert!(matches!(parse_decimal(bad), Err(Error::Parse(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_small_fractions_are_kept() {
        let tiny = dec("0.00000000000000000000000000001");
        assert_ne!(tiny, dec("0"));
        assert_eq!(format_decimal(&tiny), "0.00000000000000000000000000001");
        assert_eq!(
            format_decimal(&dec("1.00000000000000000000000000001")),
            "1.00000000000000000000000000001"
        );
    }

    #[test]
    fn test_precision_bound() {
        let fifty = "9".repeat(50);
        assert_eq!(significant_digits(&dec(&fifty)), 50);
        assert_eq!(format_decimal(&dec(&format!("0.{fifty}000"))), format!("0.{fifty}"));
        assert_eq!(format_decimal(&dec(&format!("{fifty}000"))), format!("{fifty}000.0"));

        let fifty_one = "1".repeat(51);
        assert!(matches!(parse_decimal(&fifty_one), Err(Error::Parse(_))));
        assert!(matches!(parse_decimal(&format!("0.{fifty_one}")), Err(Error::Parse(_))));

        let wide = "123456789012345678901234567890.5";
        assert_eq!(format_decimal(&dec(wide)), wide);
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(div(&dec("1.5"), &dec("0.00")), Err(Error::DivideByZero));
        assert_eq!(div(&dec("0"), &dec("-0")), Err(Error::DivideByZero));
    }

    #[test]
    fn test_overflow() {
        let max = dec(&"9".repeat(50));
        assert_eq!(add(&max, &max), Err(Error::OverOrUnderflow));
        assert_eq!(sub(&-max.clone(), &max), Err(Error::OverOrUnderflow));
        assert_eq!(mul(&max, &dec("1.1")), Err(Error::OverOrUnderflow));
        assert_eq!(add(&max, &dec("0.1")), Err(Error::OverOrUnderflow));
        assert_eq!(mul(&max, &dec("1000")).unwrap(), dec(&format!("{}000", "9".repeat(50))));
    }

    #[test]
    fn test_division_rounds_to_bound() {
        let third = div(&dec("1"), &dec("3")).unwrap();
        assert_eq!(format_decimal(&third), format!("0.{}", "3".repeat(50)));
        let two_thirds = div(&dec("-2"), &dec("3")).unwrap();
        assert_eq!(format_decimal(&two_thirds), format!("-0.{}7", "6".repeat(49)));
        assert_eq!(div(&dec("1"), &dec("8")).unwrap(), dec("0.125"));
        assert_eq!(div(&dec("1"), &dec("0.01")).unwrap(), dec("100"));
    }

    #[test]
    fn test_integer_conversions() {
        let big = BigInt::from_str(&format!("1{}", "0".repeat(29))).unwrap();
        assert_eq!(to_integer(&from_integer(&big).unwrap()), Some(big));
        assert_eq!(to_integer(&dec("12.000")), Some(BigInt::from(12)));
        assert_eq!(to_integer(&dec("12.5")), None);

        let too_long = BigInt::from_str(&"7".repeat(51)).unwrap();
        assert_eq!(from_integer(&too_long), Err(Error::OverOrUnderflow));
        let round_number = BigInt::from_str(&format!("7{}", "0".repeat(60))).unwrap();
        assert!(from_integer(&round_number).is_ok());
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float::<f64>(&dec("0.1")).unwrap(), 0.1f64);
        assert_eq!(to_float::<f32>(&dec("1.5")).unwrap(), 1.5f32);
        let huge = dec(&format!("1{}", "0".repeat(45)));
        assert_eq!(to_float::<f32>(&huge), Err(Error::OverOrUnderflow));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round(&dec("2.5")).unwrap(), dec("3"));
        assert_eq!(round(&dec("-2.5")).unwrap(), dec("-3"));
        assert_eq!(round(&dec("2.49")).unwrap(), dec("2"));
        assert_eq!(floor(&dec("-1.1")).unwrap(), dec("-2"));
        assert_eq!(ceil(&dec("-1.1")).unwrap(), dec("-1"));
        assert_eq!(ceil(&dec("1.1")).unwrap(), dec("2"));
        assert_eq!(floor(&dec("7")).unwrap(), dec("7"));
        assert_eq!(abs(&dec("-1.1")).unwrap(), dec("1.1"));
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&dec("1.0"), &dec("1.00")), Ordering::Equal);
        assert_eq!(compare(&dec("-1"), &dec("0.5")), Ordering::Less);
        assert_eq!(compare(&dec("10"), &dec("9.999")), Ordering::Greater);
    }
}
