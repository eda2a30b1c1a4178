//! # Mempool Miner
//!
//! A parallel proof-of-work block mining simulator. It admits candidate
//! transactions from a file-based mempool, commits the admitted identifiers
//! to a Merkle root, races a partitioned nonce search across parallel
//! workers with first-result-wins cancellation, and adjusts the difficulty
//! target from the observed block times.
//!
//! ## Architecture
//!
//! - [`mempool`] validates transactions and tracks spent outputs
//! - [`core`] holds the shared primitives: nonces, targets, the Merkle
//!   commitment, and the transaction shape
//! - [`miner`] partitions the nonce space, fans the search out over blocking
//!   tasks, and feeds completed cycles into the difficulty controller
//! - [`report`] persists the mined block
//!
//! Admission is strictly before mining, and mining strictly before the next
//! admission, so neither the spent-output set nor the difficulty controller
//! ever sees concurrent writers.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications,
    clippy::all
)]
#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod mempool;
pub mod miner;
pub mod report;
pub mod utils;

pub use crate::core::{Nonce, Target};
pub use crate::error::{Error, Result};
pub use config::Config;
pub use mempool::AdmissionFilter;
pub use miner::{BlockSolution, DifficultyController, Miner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        config::Config,
        core::{merkle_root, Nonce, Target, Transaction},
        error::{Error, Result},
        mempool::{AdmissionFilter, RejectReason},
        miner::{BlockSolution, DifficultyController, Miner, MinerConfig},
    };
}
