//! The nonce search worker
//!
//! A worker is a pure scan over a half-open-at-the-left nonce range: for
//! each nonce in `(start_nonce, end_nonce]` it hashes the Merkle root
//! concatenated with the nonce's decimal string and reports the first hash
//! that falls strictly below the target. Workers share no mutable state;
//! the only side channel is the advisory stop flag the coordinator raises
//! once a winner is recorded.

use crate::core::{sha256, Nonce, Target};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// How many nonces to scan between checks of the stop flag
const STOP_CHECK_MASK: u64 = 0x3ff;

/// One worker's share of a mining cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Merkle root the search is committed to
    pub root: String,
    /// Scan starts at `start_nonce + 1`
    pub start_nonce: u64,
    /// Scan ends at `end_nonce`, inclusive
    pub end_nonce: u64,
    /// Target snapshot for this cycle
    pub target: Target,
}

/// What a worker reports back to the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SearchOutcome {
    /// A satisfying nonce and its hash
    Found {
        /// The winning nonce
        nonce: Nonce,
        /// Hex digest of `root ++ decimal(nonce)`
        hash: String,
    },
    /// The range was scanned to the end without a satisfying nonce
    Exhausted,
}

/// Scan a request's full range. Pure function of its inputs; scanning the
/// same range twice yields the same outcome.
pub fn search(request: &SearchRequest) -> SearchOutcome {
    scan(request, &AtomicBool::new(false))
}

/// Scan with an advisory stop flag. Once the flag is raised the scan bails
/// out with `Exhausted`; by then the coordinator has already recorded a
/// winner and stopped listening, so the report is dropped either way.
pub(crate) fn scan(request: &SearchRequest, stop: &AtomicBool) -> SearchOutcome {
    let mut nonce = request.start_nonce;
    let mut buf = String::with_capacity(request.root.len() + 20);

    while nonce < request.end_nonce {
        nonce += 1;

        if nonce & STOP_CHECK_MASK == 0 && stop.load(Ordering::Relaxed) {
            return SearchOutcome::Exhausted;
        }

        // Reuse one buffer across the scan instead of formatting a fresh
        // string per nonce
        buf.clear();
        buf.push_str(&request.root);
        write!(buf, "{}", nonce).expect("writing to a String cannot fail");

        let digest = sha256(buf.as_bytes());
        if request.target.meets(&digest) {
            return SearchOutcome::Found {
                nonce: Nonce::new(nonce),
                hash: hex::encode(digest),
            };
        }
    }

    SearchOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sha256_hex;

    fn easy_target() -> Target {
        // Top nibble zero: roughly one in sixteen hashes satisfies it
        Target::from_hex("0fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")
            .unwrap()
    }

    fn impossible_target() -> Target {
        Target::from_bytes([0u8; 32])
    }

    #[test]
    fn test_found_nonce_hash_is_reproducible() {
        let request = SearchRequest {
            root: "deadbeef".to_string(),
            start_nonce: 0,
            end_nonce: 1_000,
            target: easy_target(),
        };

        match search(&request) {
            SearchOutcome::Found { nonce, hash } => {
                let recomputed = sha256_hex(format!("deadbeef{}", nonce).as_bytes());
                assert_eq!(hash, recomputed);
                assert!(request
                    .target
                    .meets(&sha256(format!("deadbeef{}", nonce).as_bytes())));
                // Scan starts past start_nonce and never exceeds end_nonce
                assert!(nonce.value() > 0 && nonce.value() <= 1_000);
            }
            SearchOutcome::Exhausted => panic!("easy target not met within 1000 nonces"),
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let request = SearchRequest {
            root: "deadbeef".to_string(),
            start_nonce: 0,
            end_nonce: 1_000,
            target: easy_target(),
        };
        assert_eq!(search(&request), search(&request));
    }

    #[test]
    fn test_exhausted_range_reports_exhausted() {
        let request = SearchRequest {
            root: "deadbeef".to_string(),
            start_nonce: 0,
            end_nonce: 10_000,
            target: impossible_target(),
        };
        assert_eq!(search(&request), SearchOutcome::Exhausted);
    }

    #[test]
    fn test_empty_range_reports_exhausted() {
        let request = SearchRequest {
            root: "deadbeef".to_string(),
            start_nonce: 5,
            end_nonce: 5,
            target: easy_target(),
        };
        assert_eq!(search(&request), SearchOutcome::Exhausted);
    }

    #[test]
    fn test_scan_honors_stop_flag() {
        let request = SearchRequest {
            root: "deadbeef".to_string(),
            start_nonce: 0,
            end_nonce: 1_000_000,
            target: impossible_target(),
        };
        let stop = AtomicBool::new(true);
        // Bails out on the first flag check instead of scanning the range
        assert_eq!(scan(&request, &stop), SearchOutcome::Exhausted);
    }

    #[test]
    fn test_outcome_serde_shape() {
        let found = SearchOutcome::Found {
            nonce: Nonce::new(7),
            hash: "ab".to_string(),
        };
        let json = serde_json::to_string(&found).unwrap();
        assert_eq!(json, r#"{"outcome":"found","nonce":7,"hash":"ab"}"#);

        let json = serde_json::to_string(&SearchOutcome::Exhausted).unwrap();
        assert_eq!(json, r#"{"outcome":"exhausted"}"#);

        let back: SearchOutcome = serde_json::from_str(r#"{"outcome":"exhausted"}"#).unwrap();
        assert_eq!(back, SearchOutcome::Exhausted);
    }
}
