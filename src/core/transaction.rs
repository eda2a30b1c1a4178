//! Transaction records as they arrive from the mempool
//!
//! Records deserialize permissively: `vin`, `vout`, and per-input fields are
//! all optional so that malformed transactions survive parsing and are
//! rejected by the admission filter with a reason, instead of failing inside
//! serde.

use serde::Deserialize;
use std::fmt;

/// A candidate transaction read from the mempool
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Ordered inputs; absent in malformed records
    pub vin: Option<Vec<TxInput>>,
    /// Ordered outputs; absent in malformed records
    pub vout: Option<Vec<TxOutput>>,
}

/// A single transaction input referencing a prior output
#[derive(Debug, Clone, Deserialize)]
pub struct TxInput {
    /// Transaction id of the referenced output
    pub txid: Option<String>,
    /// Index of the referenced output
    pub vout: Option<u32>,
    /// The referenced output itself, when the record carries it
    #[serde(default)]
    pub prevout: Option<PrevOut>,
}

/// The prior output an input spends
#[derive(Debug, Clone, Deserialize)]
pub struct PrevOut {
    /// Value of the referenced output
    pub value: u64,
}

/// A single transaction output
#[derive(Debug, Clone, Deserialize)]
pub struct TxOutput {
    /// Output value
    pub value: u64,
}

impl Transaction {
    /// Identifier used for the Merkle commitment: the txid of the first
    /// input. A simplification, not a true transaction hash. `None` until
    /// the transaction has passed structural validation.
    pub fn commitment_id(&self) -> Option<&str> {
        self.vin.as_ref()?.first()?.txid.as_deref()
    }
}

/// Identifies a specific prior transaction output by txid and index.
/// Rendered as `"txid:vout"`, the key format of the spent-output set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutPoint {
    /// Transaction id of the output
    pub txid: String,
    /// Output index within that transaction
    pub vout: u32,
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}
