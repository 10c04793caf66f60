//! `xsd:hexBinary` codec.
//!
//! Bytes are kept least-significant first with high zero bytes trimmed, so
//! `0FB7`, `FB7` and `000FB7` all hold `[0xB7, 0x0F]`.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

/// Decoded hexBinary value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexBinary {
    bytes: SmallVec<[u8; 16]>,
}

fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

impl HexBinary {
    /// Builds a value from least-significant-first bytes.
    pub fn from_le_bytes(bytes: impl IntoIterator<Item = u8>) -> Self {
        let mut bytes: SmallVec<[u8; 16]> = bytes.into_iter().collect();
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        Self { bytes }
    }

    /// Decodes hex digits, either case, odd lengths padded with a leading
    /// zero nibble.
    pub fn from_encoded(s: &str) -> Result<Self> {
        let invalid = || Error::Parse(format!("invalid hexBinary literal {s:?}"));

        let mut bytes: SmallVec<[u8; 16]> = SmallVec::with_capacity(s.len().div_ceil(2));
        for chunk in s.as_bytes().rchunks(2) {
            let byte = match *chunk {
                [hi, lo] => {
                    (nibble(hi).ok_or_else(invalid)? << 4) | nibble(lo).ok_or_else(invalid)?
                }
                [lo] => nibble(lo).ok_or_else(invalid)?,
                _ => return Err(invalid()),
            };
            bytes.push(byte);
        }

        Ok(Self::from_le_bytes(bytes))
    }

    /// Canonical encoding: uppercase, two digits per byte, `0` when all
    /// bytes are zero.
    pub fn to_encoded(&self) -> String {
        if self.bytes.is_empty() {
            return "0".to_owned();
        }

        let mut out = String::with_capacity(self.bytes.len() * 2);
        for byte in self.bytes.iter().rev() {
            out.push(HEX_DIGITS[usize::from(byte >> 4)] as char);
            out.push(HEX_DIGITS[usize::from(byte & 0x0F)] as char);
        }
        out
    }

    /// Least-significant-first bytes.
    pub fn as_le_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn n_half_octets(&self) -> usize {
        self.bytes.len() * 2
    }

    /// Half-octet `n`, counted from the least significant one.
    pub fn half_octet(&self, n: usize) -> Option<u8> {
        let byte = *self.bytes.get(n / 2)?;
        Some(if n % 2 == 0 { byte & 0x0F } else { byte >> 4 })
    }
}

impl fmt::Display for HexBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_encoded())
    }
}
