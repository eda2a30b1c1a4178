//! Block report rendering and persistence
//!
//! The format mirrors the mined block header followed by the coinbase
//! placeholder and the committed identifiers, one per line.

use crate::error::Result;
use crate::miner::BlockSolution;
use std::fs;
use std::path::Path;

/// Stand-in for a real serialized coinbase transaction; the reward is not
/// modeled.
const COINBASE_PLACEHOLDER: &str = "SerializedCoinbaseTx";

/// Render the block report for a mined solution and the identifiers it
/// committed to.
pub fn render(solution: &BlockSolution, ids: &[String]) -> String {
    format!(
        "Nonce: {}, Hash: {}, Difficulty: {}\n{}\n{}",
        solution.nonce,
        solution.hash,
        solution.difficulty,
        COINBASE_PLACEHOLDER,
        ids.join("\n")
    )
}

/// Write the block report to `path`
pub fn write(path: &Path, solution: &BlockSolution, ids: &[String]) -> Result<()> {
    fs::write(path, render(solution, ids))?;
    Ok(())
}
