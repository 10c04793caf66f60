//! Floating point lexical forms (`xsd:double`, `xsd:float`).
//!
//! Canonical form is scientific notation with an uppercase `E`. The mantissa
//! carries the fewest digits that still round-trip, except for integral
//! values, which get exactly one digit after the point (`123.0` is `1.2E2`).
//! The exponent has no `+` and no leading zeros.

use std::fmt::{Display, LowerExp};
use std::str::FromStr;

use num_traits::{Float, Zero};

use crate::{Error, Result};

/// Checks `(\+|-)?([0-9]+(\.[0-9]*)?|\.[0-9]+)([Ee](\+|-)?[0-9]+)?`.
fn is_float_lexical(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut mantissa_digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        mantissa_digits += pos - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        pos += 1;
        if pos < bytes.len() && matches!(bytes[pos], b'+' | b'-') {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}

/// Parses a floating point lexical form, including `NaN`, `INF`, `+INF`
/// and `-INF`.
///
/// Finite numerals too large for `F` become infinite, as in IEEE rounding.
pub fn parse_float<F>(s: &str) -> Result<F>
where
    F: Float + FromStr,
    F::Err: Display,
{
    match s {
        "NaN" => return Ok(F::nan()),
        "INF" | "+INF" => return Ok(F::infinity()),
        "-INF" => return Ok(F::neg_infinity()),
        _ => {}
    }

    if !is_float_lexical(s) {
        return Err(Error::Parse(format!("invalid floating point literal {s:?}")));
    }

    let unsigned = s.strip_prefix('+').unwrap_or(s);
    unsigned
        .parse::<F>()
        .map_err(|e| Error::Parse(format!("floating point literal {s:?}: {e}")))
}

/// Canonical floating point form.
pub fn format_float<F>(value: F) -> String
where
    F: Float + LowerExp,
{
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "INF" } else { "-INF" }.to_owned();
    }

    // LowerExp yields an exponent without sign padding or leading zeros,
    // e.g. `-1.5e-7`, `1e0`; without a precision the mantissa is the
    // shortest that round-trips
    let rendered = if value.fract().is_zero() {
        format!("{value:.1e}")
    } else {
        format!("{value:e}")
    };
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));

    let mut out = String::with_capacity(rendered.len() + 3);
    out.push_str(mantissa);
    if !mantissa.contains('.') {
        out.push_str(".0");
    }
    out.push('E');
    out.push_str(exponent);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_values() {
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::INFINITY), "INF");
        assert_eq!(format_float(f32::NEG_INFINITY), "-INF");
        assert!(parse_float::<f64>("NaN").unwrap().is_nan());
        assert_eq!(parse_float::<f64>("+INF").unwrap(), f64::INFINITY);
        assert_eq!(parse_float::<f32>("-INF").unwrap(), f32::NEG_INFINITY);
    }

    #[test]
    fn test_canonical_forms() {
        assert_eq!(format_float(1.0f64), "1.0E0");
        assert_eq!(format_float(100.0f64), "1.0E2");
        assert_eq!(format_float(123.0f64), "1.2E2");
        assert_eq!(format_float(123456789.0f64), "1.2E8");
        assert_eq!(format_float(-150.0f32), "-1.5E2");
        assert_eq!(format_float(9960.0f64), "1.0E4");
        assert_eq!(format_float(123.5f64), "1.235E2");
        assert_eq!(format_float(0.0f64), "0.0E0");
        assert_eq!(format_float(-0.0f64), "-0.0E0");
        assert_eq!(format_float(-1.5e-7f64), "-1.5E-7");
        assert_eq!(format_float(0.1f32), "1.0E-1");
        assert_eq!(format_float(1.0e300f64), "1.0E300");
    }

    #[test]
    fn test_integral_format_is_idempotent() {
        for v in [123.0f64, 123456789.0, -7.0, 1e21, 9960.0, 2f64.powi(60)] {
            let text = format_float(v);
            assert_eq!(format_float(parse_float::<f64>(&text).unwrap()), text, "{v}");
        }
    }

    #[test]
    fn test_lexical_variants_canonicalize_identically() {
        let forms = ["1", "+1", "1.", "1.0", "1.000", "01.0", "10e-1", "0.1E1", "+.1e+1"];
        for form in forms {
            let value = parse_float::<f64>(form).unwrap();
            assert_eq!(format_float(value), "1.0E0", "{form:?}");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        let malformed = [
            "", ".", "e5", "1e", "1e+", "1.0.0", "--1", "inf", "nan", "Infinity", "1f", " 1",
            "0x1p3",
        ];
        for bad in malformed {
            assert!(
                matches!(parse_float::<f64>(bad), Err(Error::Parse(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_overflow_rounds_to_infinity() {
        assert_eq!(parse_float::<f32>("1e39").unwrap(), f32::INFINITY);
        assert_eq!(format_float(parse_float::<f64>("-1e400").unwrap()), "-INF");
    }
}
