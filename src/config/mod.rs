//! Configuration management for the mining simulator

use crate::core::Target;
use crate::error::{Error, Result};
use crate::miner::MinerConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Initial difficulty target used when none is configured
pub const DEFAULT_INITIAL_TARGET: &str =
    "0000ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "mempool-miner",
    about = "Parallel proof-of-work block mining simulator",
    version
)]
pub struct Args {
    /// Configuration file path; when given, all other flags are ignored
    #[clap(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of JSON transaction files
    #[clap(short, long, env = "MINER_MEMPOOL_DIR", default_value = "mempool")]
    pub mempool: PathBuf,

    /// Where to write the block report
    #[clap(short, long, env = "MINER_OUTPUT", default_value = "output.txt")]
    pub output: PathBuf,

    /// Number of parallel search workers (0 = one per core)
    #[clap(short, long, default_value_t = 4)]
    pub workers: usize,

    /// Initial difficulty target as 64 hex digits
    #[clap(short, long, default_value = DEFAULT_INITIAL_TARGET)]
    pub target: String,

    /// Desired block interval, e.g. "10s" or "500ms"
    #[clap(short, long, value_parser = humantime::parse_duration, default_value = "10s")]
    pub block_time: Duration,

    /// Adjust difficulty every this many mined blocks
    #[clap(short, long, default_value_t = 10)]
    pub adjustment_interval: u64,

    /// Number of mining cycles to simulate over the same mempool
    #[clap(short, long, default_value_t = 1)]
    pub rounds: u64,

    /// Log level
    #[clap(short, long, default_value = "info")]
    pub log_level: String,

    /// Log format (plain, json)
    #[clap(long, default_value = "plain")]
    pub log_format: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mempool input and report output
    pub mempool: MempoolConfig,

    /// Worker fan-out and simulation length
    pub mining: MiningConfig,

    /// Difficulty target and its adjustment rule
    pub difficulty: DifficultyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Mempool input and report output paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolConfig {
    /// Directory of JSON transaction files
    #[serde(default = "default_mempool_dir")]
    pub dir: PathBuf,

    /// Where to write the block report
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// Worker fan-out and simulation length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Number of parallel search workers (0 = one per core)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Number of mining cycles to run over the same mempool
    #[serde(default = "default_rounds")]
    pub rounds: u64,

    /// Upper bound of the nonce space; mainly lowered in simulations that
    /// want exhaustion to be observable
    #[serde(default = "default_search_space")]
    pub search_space: u64,
}

/// Difficulty target and adjustment parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Initial target as 64 hex digits
    #[serde(default = "default_initial_target")]
    pub initial_target: String,

    /// Desired block interval in milliseconds
    #[serde(default = "default_block_time_ms")]
    pub target_block_time_ms: u64,

    /// Adjust difficulty every this many mined blocks
    #[serde(default = "default_adjustment_interval")]
    pub adjustment_interval: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (plain, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions

fn default_mempool_dir() -> PathBuf {
    PathBuf::from("mempool")
}

fn default_output() -> PathBuf {
    PathBuf::from("output.txt")
}

fn default_workers() -> usize {
    4
}

fn default_rounds() -> u64 {
    1
}

fn default_search_space() -> u64 {
    u64::MAX
}

fn default_initial_target() -> String {
    DEFAULT_INITIAL_TARGET.to_string()
}

fn default_block_time_ms() -> u64 {
    10_000
}

fn default_adjustment_interval() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        if let Some(config_path) = &args.config {
            return Self::from_file(config_path);
        }

        let config = Config {
            mempool: MempoolConfig {
                dir: args.mempool,
                output: args.output,
            },
            mining: MiningConfig {
                workers: args.workers,
                rounds: args.rounds,
                search_space: default_search_space(),
            },
            difficulty: DifficultyConfig {
                initial_target: args.target,
                target_block_time_ms: args.block_time.as_millis() as u64,
                adjustment_interval: args.adjustment_interval,
            },
            logging: LoggingConfig {
                level: args.log_level,
                format: args.log_format,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        Target::from_hex(&self.difficulty.initial_target)
            .map_err(|e| Error::config(format!("Bad initial target: {}", e)))?;

        if self.difficulty.adjustment_interval == 0 {
            return Err(Error::config("Adjustment interval must be greater than 0"));
        }

        if self.mining.rounds == 0 {
            return Err(Error::config("Rounds must be greater than 0"));
        }

        let workers = if self.mining.workers == 0 {
            num_cpus::get() as u64
        } else {
            self.mining.workers as u64
        };
        if self.mining.search_space < workers {
            return Err(Error::config(
                "Search space must cover at least one nonce per worker",
            ));
        }

        Ok(())
    }

    /// Parsed initial difficulty target
    pub fn initial_target(&self) -> Result<Target> {
        Target::from_hex(&self.difficulty.initial_target)
    }

    /// Desired block interval as a duration
    pub fn target_block_time(&self) -> Duration {
        Duration::from_millis(self.difficulty.target_block_time_ms)
    }

    /// Coordinator configuration derived from the mining section
    pub fn miner_config(&self) -> MinerConfig {
        MinerConfig {
            workers: self.mining.workers,
            search_space: self.mining.search_space,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mempool: MempoolConfig {
                dir: default_mempool_dir(),
                output: default_output(),
            },
            mining: MiningConfig {
                workers: default_workers(),
                rounds: default_rounds(),
                search_space: default_search_space(),
            },
            difficulty: DifficultyConfig {
                initial_target: default_initial_target(),
                target_block_time_ms: default_block_time_ms(),
                adjustment_interval: default_adjustment_interval(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
