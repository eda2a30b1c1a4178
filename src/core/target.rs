//! Difficulty target for the proof-of-work search

use crate::core::constants::TARGET_HEX_WIDTH;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 256-bit difficulty target, stored big-endian.
///
/// A candidate hash satisfies the target iff its value, read as a 256-bit
/// unsigned integer, is strictly less than the target's value. Lower target
/// means harder search. Comparison is done bytewise, never through floating
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target(pub [u8; 32]);

impl Target {
    /// Create a new Target from big-endian bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a Target from a fixed-width hex string (64 nibbles)
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != TARGET_HEX_WIDTH {
            return Err(Error::invalid_target(format!(
                "Expected {} hex digits, got {}",
                TARGET_HEX_WIDTH,
                hex_str.len()
            )));
        }

        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::invalid_target(format!("Invalid hex: {}", e)))?;

        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(Self(array))
    }

    /// Get the target as big-endian bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a fixed-width lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check whether a hash meets this target (is strictly below it)
    pub fn meets(&self, hash: &[u8; 32]) -> bool {
        // Big-endian unsigned comparison, most significant byte first
        for (hash_byte, target_byte) in hash.iter().zip(self.0.iter()) {
            match hash_byte.cmp(target_byte) {
                std::cmp::Ordering::Less => return true,
                std::cmp::Ordering::Greater => return false,
                std::cmp::Ordering::Equal => continue,
            }
        }
        // An exactly equal hash does not meet the target
        false
    }

    /// Tighten the target by one nibble: prepend a `0` nibble and drop the
    /// least significant one. Numerically a right shift by four bits, so the
    /// target roughly halves four times over. Width is preserved.
    pub fn tightened(&self) -> Self {
        let mut out = [0u8; 32];
        out[0] = self.0[0] >> 4;
        for i in 1..32 {
            out[i] = (self.0[i] >> 4) | (self.0[i - 1] << 4);
        }
        Self(out)
    }

    /// Loosen the target by one nibble: drop the most significant nibble and
    /// append an `f`. Numerically a left shift by four bits with the low
    /// nibble filled with ones. Width is preserved.
    pub fn loosened(&self) -> Self {
        let mut out = [0u8; 32];
        for i in 0..31 {
            out[i] = (self.0[i] << 4) | (self.0[i + 1] >> 4);
        }
        out[31] = (self.0[31] << 4) | 0x0f;
        Self(out)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Target {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}
