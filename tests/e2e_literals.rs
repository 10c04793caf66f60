//! End-to-end tests for typed literals: validation, canonical forms and
//! the registry operations on stored values.

use pretty_assertions::assert_eq;

use rdf_termstore::datatypes::{rdf, xsd};
use rdf_termstore::{Error, NodeStorage, TypedValue};

fn store() -> NodeStorage {
    NodeStorage::new().unwrap()
}

fn canonical(store: &NodeStorage, lexical: &str, datatype: &str) -> String {
    let id = store.make_typed_literal(lexical, datatype).unwrap();
    store.literal_lexical_form(id).unwrap()
}

// ============================================================================
// 1. Canonical forms
// ============================================================================

#[test]
fn test_canonical_forms() {
    let store = store();
    let cases = [
        ("+01", xsd::INTEGER, "1"),
        ("-0", xsd::INTEGER, "0"),
        ("1.00", xsd::DECIMAL, "1.0"),
        ("-.5", xsd::DECIMAL, "-0.5"),
        ("100", xsd::DECIMAL, "100.0"),
        ("100", xsd::DOUBLE, "1.0E2"),
        ("123", xsd::DOUBLE, "1.2E2"),
        ("123456789", xsd::DOUBLE, "1.2E8"),
        ("12.5", xsd::DOUBLE, "1.25E1"),
        ("-0", xsd::FLOAT, "-0.0E0"),
        ("+INF", xsd::DOUBLE, "INF"),
        ("NaN", xsd::FLOAT, "NaN"),
        ("1", xsd::BOOLEAN, "true"),
        ("fb7", xsd::HEX_BINARY, "0FB7"),
        ("0000", xsd::HEX_BINARY, "0"),
        ("007", xsd::UNSIGNED_BYTE, "7"),
    ];
    for (lexical, datatype, expected) in cases {
        assert_eq!(
            canonical(&store, lexical, datatype),
            expected,
            "{lexical:?} ^^ {datatype}"
        );
    }
}

#[test]
fn test_lexical_variants_share_a_node() {
    let store = store();
    let variants = ["1.5", "01.50", "+1.5", "1.500000"];
    let ids: Vec<_> = variants
        .iter()
        .map(|v| store.make_typed_literal(v, xsd::DECIMAL).unwrap())
        .collect();
    assert!(ids.iter().all(|&id| id == ids[0]));
}

// ============================================================================
// 2. Rejections
// ============================================================================

#[test]
fn test_positive_integer_constraint() {
    let store = store();
    for lexical in ["-5", "0"] {
        assert!(matches!(
            store.make_typed_literal(lexical, xsd::POSITIVE_INTEGER),
            Err(Error::ConstraintViolation(_))
        ));
    }
    assert!(store.make_typed_literal("5", xsd::POSITIVE_INTEGER).is_ok());
}

#[test]
fn test_validation_errors() {
    let store = store();
    for (lexical, datatype) in [
        ("1.5", xsd::INTEGER),
        ("0FXB7", xsd::HEX_BINARY),
        ("yes", xsd::BOOLEAN),
        ("1e", xsd::DOUBLE),
        ("256", xsd::UNSIGNED_BYTE),
        ("x", rdf::LANG_STRING),
    ] {
        let err = store.make_typed_literal(lexical, datatype).unwrap_err();
        assert!(
            matches!(
                &err,
                Error::Validation { datatype: dt, lexical: lx, .. }
                    if dt == datatype && lx == lexical
            ),
            "{lexical:?} ^^ {datatype}: {err}"
        );
    }
}

// ============================================================================
// 3. Language tags
// ============================================================================

#[test]
fn test_language_tag_equality() {
    let store = store();
    let a = store.make_lang_literal("Hallo", "de-DE").unwrap();
    let b = store.make_lang_literal("Hallo", "de-de").unwrap();
    let c = store.make_lang_literal("Hallo!", "de-DE").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(store.resolve_term(b).unwrap().to_string(), "\"Hallo\"@de-DE");
    assert_eq!(store.find_lang_literal("Hallo", "DE-DE"), Some(a));
}

// ============================================================================
// 4. Arithmetic on stored values
// ============================================================================

#[test]
fn test_decimal_arithmetic_errors() {
    let store = store();
    let registry = store.registry();

    let one = store.make_typed_literal("1.5", xsd::DECIMAL).unwrap();
    let zero = store.make_typed_literal("0.0", xsd::DECIMAL).unwrap();
    let lhs = store.literal_value(one).unwrap();
    let rhs = store.literal_value(zero).unwrap();
    assert_eq!(registry.div(&lhs, &rhs), Err(Error::DivideByZero));

    let max = registry.parse(xsd::DECIMAL, &"9".repeat(50)).unwrap();
    assert_eq!(registry.add(&max, &max), Err(Error::OverOrUnderflow));
}

#[test]
fn test_decimal_precision_is_not_silently_lost() {
    let store = store();

    let tiny = store.make_typed_literal("0.00000000000000000000000000001", xsd::DECIMAL).unwrap();
    let zero = store.make_typed_literal("0", xsd::DECIMAL).unwrap();
    assert_ne!(tiny, zero);
    assert_eq!(
        store.literal_lexical_form(tiny).unwrap(),
        "0.00000000000000000000000000001"
    );

    let nearly_one = "1.00000000000000000000000000001";
    assert_eq!(canonical(&store, nearly_one, xsd::DECIMAL), nearly_one);
    let wide = "123456789012345678901234567890.5";
    assert_eq!(canonical(&store, wide, xsd::DECIMAL), wide);

    let too_precise = format!("1.{}", "1".repeat(50));
    assert!(matches!(
        store.make_typed_literal(&too_precise, xsd::DECIMAL),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn test_wide_integer_division() {
    let store = store();
    let registry = store.registry();

    let big = registry.parse(xsd::INTEGER, "100000000000000000000000000000").unwrap();
    let one = registry.parse(xsd::INTEGER, "1").unwrap();
    let quotient = registry.div(&big, &one).unwrap();
    assert_eq!(quotient.datatype, xsd::DECIMAL);
    assert_eq!(
        registry.canonical_string(&quotient).unwrap(),
        "100000000000000000000000000000.0"
    );
}

#[test]
fn test_integral_double_keeps_its_value() {
    let store = store();
    let registry = store.registry();

    let id = store.make_typed_literal("123", xsd::DOUBLE).unwrap();
    assert_eq!(store.literal_lexical_form(id).unwrap(), "1.2E2");
    assert_eq!(store.literal_value(id).unwrap(), TypedValue::new(xsd::DOUBLE, 123.0f64));

    let sum = registry
        .add(&store.literal_value(id).unwrap(), &TypedValue::new(xsd::DOUBLE, 0.0f64))
        .unwrap();
    let stored = store.make_literal_from_value(&sum).unwrap();
    assert_eq!(stored, id);
    assert_ne!(store.make_typed_literal("120", xsd::DOUBLE).unwrap(), id);
}

#[test]
fn test_arithmetic_result_can_be_stored() {
    let store = store();
    let registry = store.registry();

    let a = registry.parse(xsd::INTEGER, "7").unwrap();
    let b = registry.parse(xsd::INTEGER, "2").unwrap();
    let quotient = registry.div(&a, &b).unwrap();
    assert_eq!(quotient.datatype, xsd::DECIMAL);

    let id = store.make_literal_from_value(&quotient).unwrap();
    assert_eq!(store.literal_lexical_form(id).unwrap(), "3.5");
    assert_eq!(store.make_typed_literal("3.50", xsd::DECIMAL).unwrap(), id);
}

#[test]
fn test_subtype_arithmetic_widens_to_integer() {
    let store = store();
    let registry = store.registry();

    let a = store.make_typed_literal("1", xsd::POSITIVE_INTEGER).unwrap();
    let b = store.make_typed_literal("3", xsd::POSITIVE_INTEGER).unwrap();
    let diff = registry
        .sub(&store.literal_value(a).unwrap(), &store.literal_value(b).unwrap())
        .unwrap();
    assert_eq!(diff.datatype, xsd::INTEGER);

    // the difference is a fine integer, but not a positiveInteger
    assert!(store.make_literal_from_value(&diff).is_ok());
    let narrowed = TypedValue { datatype: xsd::POSITIVE_INTEGER, value: diff.value };
    assert!(matches!(
        store.make_literal_from_value(&narrowed),
        Err(Error::ConstraintViolation(_))
    ));
}

#[test]
fn test_stored_literals_compare() {
    let store = store();
    let registry = store.registry();
    let value = |lexical: &str, datatype: &str| {
        let id = store.make_typed_literal(lexical, datatype).unwrap();
        store.literal_value(id).unwrap()
    };

    let compare = |lhs: (&str, &str), rhs: (&str, &str)| {
        registry
            .compare(&value(lhs.0, lhs.1), &value(rhs.0, rhs.1))
            .unwrap()
    };

    use std::cmp::Ordering::*;
    assert_eq!(compare(("2", xsd::BYTE), ("2.5", xsd::FLOAT)), Some(Less));
    assert_eq!(compare(("1.0", xsd::DECIMAL), ("1", xsd::LONG)), Some(Equal));
    assert_eq!(compare(("0.1", xsd::DECIMAL), ("0.1", xsd::DOUBLE)), Some(Equal));
    assert_eq!(compare(("NaN", xsd::DOUBLE), ("0", xsd::DOUBLE)), None);
    assert_eq!(compare(("b", xsd::STRING), ("a", xsd::STRING)), Some(Greater));
}
