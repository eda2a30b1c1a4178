//! Nonce type for the proof-of-work search

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-bit nonce. Hashed as its decimal string representation appended to
/// the Merkle root, so `Display` is part of the wire behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Nonce(pub u64);

impl Nonce {
    /// Create a new Nonce
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Nonce {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Nonce> for u64 {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}
