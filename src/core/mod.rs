//! Core types and structures for the mining simulator
//!
//! This module contains the fundamental types used throughout the simulator:
//! Nonce, Target, Transaction, and the Merkle commitment.

mod hash;
mod merkle;
mod nonce;
mod target;
mod transaction;

pub use hash::{sha256, sha256_hex};
pub use merkle::merkle_root;
pub use nonce::Nonce;
pub use target::Target;
pub use transaction::{OutPoint, PrevOut, Transaction, TxInput, TxOutput};

/// Constants for the mining simulation
pub mod constants {
    /// Size of a SHA-256 digest in bytes
    pub const HASH_SIZE: usize = 32;

    /// Width of a target or digest rendered as hex nibbles
    pub const TARGET_HEX_WIDTH: usize = 2 * HASH_SIZE;

    /// Upper bound of the nonce search space
    pub const MAX_NONCE: u64 = u64::MAX;
}
