//! Error types for the mining simulator
//!
//! Cycle-level failures (empty commitment, exhausted search space, worker
//! faults) are represented here. Per-transaction admission rejections are a
//! separate, non-fatal type: see [`crate::mempool::RejectReason`].

use thiserror::Error;

/// Main error type for the mining simulator
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid difficulty target format
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// No admitted transactions, so there is nothing to commit to
    #[error("No transactions to mine")]
    EmptyMempool,

    /// Every worker exhausted its nonce range without a solution
    #[error("Failed to mine the block: no valid nonce found within the search space")]
    ExhaustedSearch,

    /// A search worker failed instead of reporting an outcome
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type alias for the mining simulator
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid target error
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// Create a worker error
    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }
}
