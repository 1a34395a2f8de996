// nip13-miner
//
// File: src/core/types.rs
//
// Shared data types: command-line arguments common to both miner binaries,
// and the benchmark result record each binary's benchmark mode produces.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::core::error::MinerError;

/// Command-line arguments shared by `nip13-miner-parallel` and
/// `nip13-miner-single`. Re-expressed from the original's positional
/// `[difficulty] [N | benchmark K] [threads]` grammar as named flags —
/// clap's idiomatic surface — while preserving every default and range.
#[derive(Parser, Debug)]
#[command(
    name = "nip13-miner",
    author,
    version,
    about = "NIP-13 proof-of-work miner for Nostr events"
)]
pub struct MinerArgs {
    /// Path to the Nostr event JSON file to mine.
    #[arg(value_name = "EVENT_JSON")]
    pub event_json: PathBuf,

    /// Target difficulty in leading zero bits.
    #[arg(short, long, default_value_t = 16, value_name = "BITS")]
    pub difficulty: u32,

    /// Maximum attempts, in millions, before giving up on a single search.
    #[arg(long, default_value_t = 100, value_name = "MILLIONS")]
    pub max_attempts: u64,

    /// Number of worker threads. Defaults to the number of logical CPUs.
    /// Ignored by the single-threaded binary.
    #[arg(short, long, value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Run benchmark mode: find this many solutions and report
    /// solutions/sec and hashrate instead of mining once.
    #[arg(short, long, value_name = "SOLUTIONS")]
    pub benchmark: Option<u64>,

    /// Output path for the mined event. Defaults to `mined_parallel_<name>`
    /// or `mined_<name>` next to the input file, per binary.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl MinerArgs {
    pub fn validate(&self) -> Result<(), MinerError> {
        if self.difficulty == 0 || self.difficulty > 32 {
            return Err(MinerError::InvalidDifficulty { value: self.difficulty });
        }
        if let Some(threads) = self.threads {
            if threads == 0 || threads > 128 {
                return Err(MinerError::InvalidThreadCount { value: threads });
            }
        }
        if let Some(target) = self.benchmark {
            if target < 1 {
                return Err(MinerError::InvalidBenchmarkTarget { value: target });
            }
        }
        Ok(())
    }
}

/// Summary statistics for a completed benchmark run, shared by the
/// single-threaded and parallel benchmark drivers.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub solutions_found: u64,
    pub total_attempts: u64,
    pub elapsed: Duration,
    pub thread_count: usize,
}

impl BenchmarkResult {
    pub fn solutions_per_sec(&self) -> f64 {
        self.solutions_found as f64 / self.elapsed.as_secs_f64()
    }

    pub fn hashrate(&self) -> f64 {
        self.total_attempts as f64 / self.elapsed.as_secs_f64()
    }

    pub fn average_attempts_per_solution(&self) -> f64 {
        if self.solutions_found == 0 {
            0.0
        } else {
            self.total_attempts as f64 / self.solutions_found as f64
        }
    }
}
