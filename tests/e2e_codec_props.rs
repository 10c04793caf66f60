//! Property tests for the canonical codec.

use proptest::prelude::*;

use num_bigint::BigInt;
use rdf_termstore::codec::{
    BigDecimal, HexBinary, format_decimal, format_float, format_integer, parse_big_integer,
    parse_decimal, parse_float, parse_integer,
};

// -- Strategy helpers --

fn arb_decimal() -> impl Strategy<Value = BigDecimal> {
    (any::<i128>(), -10i64..=40)
        .prop_map(|(mantissa, scale)| BigDecimal::new(BigInt::from(mantissa), scale))
}

fn arb_fractional_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite, not integral", |v| v.is_finite() && v.fract() != 0.0)
}

fn arb_integral_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_map(f64::trunc).prop_filter("finite", |v| v.is_finite())
}

proptest! {
    #[test]
    fn integer_round_trip(v in any::<i64>()) {
        let text = format_integer(&v);
        prop_assert_eq!(parse_integer::<i64>(&text).unwrap(), v);
    }

    /// Leading zeros and a `+` sign never change the canonical form.
    #[test]
    fn integer_canonical_uniqueness(v in any::<u32>(), zeros in 0usize..4, plus in any::<bool>()) {
        let padded = format!("{}{}{}", if plus { "+" } else { "" }, "0".repeat(zeros), v);
        let parsed = parse_big_integer(&padded).unwrap();
        prop_assert_eq!(format_integer(&parsed), v.to_string());
    }

    #[test]
    fn decimal_round_trip(v in arb_decimal()) {
        let text = format_decimal(&v);
        prop_assert_eq!(parse_decimal(&text).unwrap(), v);
    }

    /// Trailing fractional zeros never change the canonical form.
    #[test]
    fn decimal_canonical_uniqueness(v in arb_decimal(), extra in 0usize..5) {
        let text = format_decimal(&v);
        let padded = format!("{text}{}", "0".repeat(extra));
        prop_assert_eq!(format_decimal(&parse_decimal(&padded).unwrap()), text);
    }

    /// Values with a fraction keep every digit they need.
    #[test]
    fn double_round_trip(v in arb_fractional_f64()) {
        let text = format_float(v);
        prop_assert_eq!(parse_float::<f64>(&text).unwrap().to_bits(), v.to_bits());
    }

    /// Integral values are shortened to one fraction digit, so only the text
    /// is stable under a second pass.
    #[test]
    fn integral_double_format_is_idempotent(v in arb_integral_f64()) {
        let text = format_float(v);
        prop_assert_eq!(format_float(parse_float::<f64>(&text).unwrap()), text);
    }

    #[test]
    fn float_format_is_idempotent(v in any::<f32>()) {
        let text = format_float(v);
        prop_assert_eq!(format_float(parse_float::<f32>(&text).unwrap()), text);
    }

    /// Exponent shifts of the same value format identically.
    #[test]
    fn double_canonical_uniqueness(mantissa in -99999i64..99999, shift in 0i32..5) {
        let plain = format!("{mantissa}");
        let shifted = format!("{mantissa}{}E-{shift}", "0".repeat(shift as usize));
        prop_assert_eq!(
            format_float(parse_float::<f64>(&plain).unwrap()),
            format_float(parse_float::<f64>(&shifted).unwrap())
        );
    }

    #[test]
    fn hex_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..24)) {
        let value = HexBinary::from_le_bytes(bytes);
        let text = value.to_encoded();
        prop_assert_eq!(HexBinary::from_encoded(&text).unwrap(), value.clone());
        prop_assert_eq!(HexBinary::from_encoded(&text.to_lowercase()).unwrap(), value);
    }
}
