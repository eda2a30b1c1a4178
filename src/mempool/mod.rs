//! Transaction admission and the file-based mempool
//!
//! The admission filter decides which candidate transactions enter the
//! Merkle commitment. Rejections are per-transaction and non-fatal; the
//! caller logs them and moves on. The spent-output set is owned by the
//! filter, grows monotonically within a run, and is never pruned (there is
//! no block reorganization in a single-run simulation).

use crate::core::{OutPoint, Transaction};
use crate::error::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a transaction was refused admission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The record lacks an inputs or outputs list
    #[error("transaction structure is invalid")]
    MissingFields,

    /// An input lacks its reference txid or output index
    #[error("transaction input is invalid")]
    MalformedInput,

    /// An input references an output already spent in this run
    #[error("double spending detected on {0}")]
    DoubleSpend(OutPoint),

    /// Outputs exceed inputs
    #[error("transaction inputs ({inputs}) do not cover outputs ({outputs})")]
    InsufficientFunds {
        /// Sum over the inputs' prevout values
        inputs: u64,
        /// Sum over the output values
        outputs: u64,
    },
}

/// Validates transactions and tracks spent outputs across a run
#[derive(Debug, Default)]
pub struct AdmissionFilter {
    spent: HashSet<OutPoint>,
}

impl AdmissionFilter {
    /// Create a filter with an empty spent-output set
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate one transaction and, on success, mark all of its inputs as
    /// spent.
    ///
    /// Every input is checked before any key enters the set, so a rejection
    /// never leaks earlier inputs of the same transaction into it.
    pub fn admit(&mut self, tx: &Transaction) -> std::result::Result<(), RejectReason> {
        let vin = tx.vin.as_ref().ok_or(RejectReason::MissingFields)?;
        let vout = tx.vout.as_ref().ok_or(RejectReason::MissingFields)?;

        let mut keys = Vec::with_capacity(vin.len());
        for input in vin {
            let txid = input.txid.as_deref().ok_or(RejectReason::MalformedInput)?;
            let index = input.vout.ok_or(RejectReason::MalformedInput)?;

            let outpoint = OutPoint {
                txid: txid.to_string(),
                vout: index,
            };
            if self.spent.contains(&outpoint) {
                return Err(RejectReason::DoubleSpend(outpoint));
            }
            keys.push(outpoint);
        }

        let inputs: u64 = vin
            .iter()
            .map(|input| input.prevout.as_ref().map_or(0, |p| p.value))
            .sum();
        let outputs: u64 = vout.iter().map(|output| output.value).sum();
        if inputs < outputs {
            return Err(RejectReason::InsufficientFunds { inputs, outputs });
        }

        self.spent.extend(keys);
        Ok(())
    }

    /// Number of outputs marked spent so far
    pub fn spent_len(&self) -> usize {
        self.spent.len()
    }

    /// Whether a specific outpoint has been marked spent
    pub fn is_spent(&self, outpoint: &OutPoint) -> bool {
        self.spent.contains(outpoint)
    }
}

/// Load every JSON transaction file under `dir`, run each through the
/// admission filter, and return the admitted commitment identifiers in
/// admission order.
///
/// Files are visited in name order so a run is reproducible regardless of
/// how the platform enumerates the directory. Unreadable or unparsable
/// files are logged and skipped, like any other rejected transaction.
pub fn load_dir(dir: &Path, filter: &mut AdmissionFilter) -> Result<Vec<String>> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let mut admitted = Vec::new();
    for path in &entries {
        debug!("reading mempool file {}", path.display());

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping unreadable file {}: {}", path.display(), e);
                continue;
            }
        };

        let tx: Transaction = match serde_json::from_str(&raw) {
            Ok(tx) => tx,
            Err(e) => {
                warn!("skipping unparsable file {}: {}", path.display(), e);
                continue;
            }
        };

        match filter.admit(&tx) {
            // An admitted transaction with an empty input list has no
            // commitment identifier and cannot enter the block
            Ok(()) => match tx.commitment_id() {
                Some(id) => admitted.push(id.to_string()),
                None => warn!("skipping {}: no inputs to identify it by", path.display()),
            },
            Err(reason) => {
                warn!("rejecting {}: {}", path.display(), reason);
            }
        }
    }

    Ok(admitted)
}
