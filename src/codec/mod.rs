//! # Canonical Codec
//!
//! Text ⇄ value conversion using the canonical lexical forms of XML Schema
//! Part 2. Every string this module emits is part of the external contract:
//! exponent marker case, absence of leading zeros and `+` signs, hex digit
//! casing and the special tokens `NaN`, `INF`, `-INF`.
//!
//! Design rule: no state, no allocation beyond the returned value, no
//! knowledge of datatypes or storage.

pub mod decimal;
pub mod float;
pub mod hex;
pub mod integer;

pub use decimal::{BigDecimal, format_decimal, format_decimal_simplified, parse_decimal};
pub use float::{format_float, parse_float};
pub use hex::HexBinary;
pub use integer::{format_integer, parse_big_integer, parse_integer};
