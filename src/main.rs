//! Mempool Miner
//!
//! Reads a directory of JSON transactions, admits the valid ones, and mines
//! proof-of-work blocks over the admitted set.

use clap::Parser;
use mempool_miner::{
    config::{Args, Config},
    error::Result,
    mempool::{self, AdmissionFilter},
    miner::{DifficultyController, Miner},
    report, utils,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(args)?;

    utils::init_logging(&config.logging.level, &config.logging.format);

    info!("Starting mempool miner v{}", env!("CARGO_PKG_VERSION"));

    // Admission phase: the filter owns the spent-output set for the run
    let mut filter = AdmissionFilter::new();
    let ids = mempool::load_dir(&config.mempool.dir, &mut filter)?;
    if ids.is_empty() {
        warn!("mempool directory {} is empty", config.mempool.dir.display());
    }
    info!(
        "Admitted {} transactions ({} outputs marked spent)",
        ids.len(),
        filter.spent_len()
    );

    // Mining phase
    let controller = DifficultyController::new(
        config.initial_target()?,
        config.target_block_time(),
        config.difficulty.adjustment_interval,
    );
    let mut miner = Miner::new(config.miner_config(), controller);

    let mut solution = None;
    for round in 1..=config.mining.rounds {
        info!("Mining round {}/{}", round, config.mining.rounds);
        solution = Some(miner.mine(&ids).await?);
    }
    let solution = solution.expect("rounds is validated to be at least 1");

    report::write(&config.mempool.output, &solution, &ids)?;
    info!(
        "Mining result saved to {}",
        config.mempool.output.display()
    );

    Ok(())
}
