//! Runtime literal values.
//!
//! `Value` is the type-erased carrier between the registry and the typed
//! datatype implementations. It says nothing about *which* datatype a value
//! belongs to: every `xsd:integer` subtype, for instance, is an
//! `Value::Integer`. The datatype travels alongside (see `TypedValue`).

use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::codec::HexBinary;
use crate::codec::decimal::{self, BigDecimal};

/// Value of an `rdf:langString` literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LangString {
    pub lexical_form: String,
    pub language_tag: String,
}

impl LangString {
    pub fn new(lexical_form: impl Into<String>, language_tag: impl Into<String>) -> Self {
        Self {
            lexical_form: lexical_form.into(),
            language_tag: language_tag.into(),
        }
    }
}

/// Literal value in its native representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    String(String),
    LangString(LangString),
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Long(i64),
    Int(i32),
    Short(i16),
    Byte(i8),
    UnsignedLong(u64),
    UnsignedInt(u32),
    UnsignedShort(u16),
    UnsignedByte(u8),
    Double(f64),
    Float(f32),
    HexBinary(HexBinary),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::LangString(_) => "LangString",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Decimal(_) => "Decimal",
            Value::Long(_) => "Long",
            Value::Int(_) => "Int",
            Value::Short(_) => "Short",
            Value::Byte(_) => "Byte",
            Value::UnsignedLong(_) => "UnsignedLong",
            Value::UnsignedInt(_) => "UnsignedInt",
            Value::UnsignedShort(_) => "UnsignedShort",
            Value::UnsignedByte(_) => "UnsignedByte",
            Value::Double(_) => "Double",
            Value::Float(_) => "Float",
            Value::HexBinary(_) => "HexBinary",
        }
    }

    /// Storage identity: like `==`, except that floating point values are
    /// compared by bit pattern, so `NaN` equals itself and `0.0` differs
    /// from `-0.0`. Decimals compare numerically (`1.0` is `1.00`).
    pub fn identity_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Double(a), Value::Double(b)) => {
                canonical_f64_bits(*a) == canonical_f64_bits(*b)
            }
            (Value::Float(a), Value::Float(b)) => {
                canonical_f32_bits(*a) == canonical_f32_bits(*b)
            }
            _ => self == other,
        }
    }

    /// Hash consistent with `identity_eq`.
    pub fn identity_hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(v) => v.hash(state),
            Value::LangString(v) => v.hash(state),
            Value::Boolean(v) => v.hash(state),
            Value::Integer(v) => v.hash(state),
            Value::Decimal(v) => {
                let (digits, scale) = decimal::normalize(v).as_bigint_and_exponent();
                digits.hash(state);
                scale.hash(state);
            }
            Value::Long(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::UnsignedLong(v) => v.hash(state),
            Value::UnsignedInt(v) => v.hash(state),
            Value::UnsignedShort(v) => v.hash(state),
            Value::UnsignedByte(v) => v.hash(state),
            Value::Double(v) => canonical_f64_bits(*v).hash(state),
            Value::Float(v) => canonical_f32_bits(*v).hash(state),
            Value::HexBinary(v) => v.hash(state),
        }
    }
}

fn canonical_f64_bits(v: f64) -> u64 {
    if v.is_nan() { f64::NAN.to_bits() } else { v.to_bits() }
}

fn canonical_f32_bits(v: f32) -> u32 {
    if v.is_nan() { f32::NAN.to_bits() } else { v.to_bits() }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(v) => write!(f, "{v}"),
            Value::LangString(v) => write!(f, "{}@{}", v.lexical_form, v.language_tag),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Decimal(v) => f.write_str(&decimal::format_decimal_simplified(v)),
            Value::Long(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::UnsignedLong(v) => write!(f, "{v}"),
            Value::UnsignedInt(v) => write!(f, "{v}"),
            Value::UnsignedShort(v) => write!(f, "{v}"),
            Value::UnsignedByte(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::HexBinary(v) => write!(f, "{v}"),
        }
    }
}

// ============================================================================
// Native representation <-> Value
// ============================================================================

/// A Rust type that backs some datatype and can travel as a `Value`.
pub trait ValueRepr: Clone + Sized + 'static {
    fn into_value(self) -> Value;

    /// Borrows the native representation, `None` if `value` holds a
    /// different variant.
    fn from_value(value: &Value) -> Option<&Self>;
}

macro_rules! value_repr {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueRepr for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_repr! {
    String => String,
    LangString => LangString,
    bool => Boolean,
    BigInt => Integer,
    BigDecimal => Decimal,
    i64 => Long,
    i32 => Int,
    i16 => Short,
    i8 => Byte,
    u64 => UnsignedLong,
    u32 => UnsignedInt,
    u16 => UnsignedShort,
    u8 => UnsignedByte,
    f64 => Double,
    f32 => Float,
    HexBinary => HexBinary,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}
