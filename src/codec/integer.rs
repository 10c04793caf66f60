//! Integer lexical forms: `(\+|-)?[0-9]+`.

use std::fmt::Display;
use std::str::FromStr;

use num_bigint::BigInt;

use crate::{Error, Result};

/// Splits an integer lexical form into its sign and its digit run.
fn split_sign(s: &str) -> Result<(bool, &str)> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Parse(format!("invalid integer literal {s:?}")));
    }

    Ok((negative, digits))
}

/// Parses an integer into a fixed-width primitive.
///
/// A leading `+` is stripped; `-0` is accepted even for unsigned targets.
/// Values that do not fit `I` are a parse error.
pub fn parse_integer<I>(s: &str) -> Result<I>
where
    I: FromStr,
    I::Err: Display,
{
    let (negative, digits) = split_sign(s)?;

    let parsed = if !negative || digits.bytes().all(|b| b == b'0') {
        digits.parse::<I>()
    } else {
        // keep the '-' attached, the primitive parser handles the sign itself
        s.parse::<I>()
    };

    parsed.map_err(|e| Error::Parse(format!("integer literal {s:?}: {e}")))
}

/// Parses an integer of unbounded size.
pub fn parse_big_integer(s: &str) -> Result<BigInt> {
    let (negative, digits) = split_sign(s)?;

    let magnitude = BigInt::from_str(digits)
        .map_err(|e| Error::Parse(format!("integer literal {s:?}: {e}")))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Canonical integer form: minimal digits, `-` only when negative.
///
/// `Display` of the primitive integers and of `BigInt` already produces
/// exactly this form.
pub fn format_integer<I: Display>(value: &I) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_sign_is_stripped() {
        assert_eq!(parse_integer::<i32>("+1").unwrap(), 1);
        assert_eq!(parse_integer::<i32>("-17").unwrap(), -17);
        assert_eq!(parse_integer::<u8>("+0255").unwrap(), 255);
    }

    #[test]
    fn test_negative_zero_for_unsigned() {
        assert_eq!(parse_integer::<u16>("-0").unwrap(), 0);
        assert_eq!(parse_integer::<u16>("-000").unwrap(), 0);
        assert!(parse_integer::<u16>("-1").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "+", "-", "++1", "+-1", "1.0", " 1", "1 ", "1_000", "0x10", "١"] {
            assert!(
                matches!(parse_integer::<i64>(bad), Err(Error::Parse(_))),
                "{bad:?} should not parse"
            );
            assert!(matches!(parse_big_integer(bad), Err(Error::Parse(_))));
        }
    }

    #[test]
    fn test_overflow_is_parse_error() {
        assert!(matches!(parse_integer::<i8>("128"), Err(Error::Parse(_))));
        assert_eq!(parse_integer::<i8>("-128").unwrap(), i8::MIN);
        assert!(matches!(parse_integer::<u64>("18446744073709551616"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_big_integer() {
        let big = parse_big_integer("-000123456789012345678901234567890").unwrap();
        assert_eq!(format_integer(&big), "-123456789012345678901234567890");
        assert_eq!(format_integer(&parse_big_integer("+0").unwrap()), "0");
        assert_eq!(format_integer(&parse_big_integer("-0").unwrap()), "0");
    }

    #[test]
    fn test_format_has_no_leading_zeros() {
        assert_eq!(format_integer(&parse_integer::<i64>("0007").unwrap()), "7");
        assert_eq!(format_integer(&0u32), "0");
        assert_eq!(format_integer(&-42i16), "-42");
    }
}
