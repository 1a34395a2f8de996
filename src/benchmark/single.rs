// nip13-miner
//
// File: src/benchmark/single.rs
//
// Single-threaded benchmark driver: repeatedly calls `search` over
// 100-million-nonce windows to find a target number of solutions. Unlike
// the parallel driver, the next window starts at `found_nonce + 1000`
// rather than resetting to 1 with a timestamp bump — a different,
// non-equivalent strategy taken directly from the standalone original's
// `benchmark_mode`. The two drivers are intentionally not reconciled.

use std::time::Instant;

use tracing::info;

use crate::core::error::MinerError;
use crate::core::search::{search_with_attempts, NonceRange, SearchOutcome};
use crate::core::types::BenchmarkResult;

const SEARCH_WINDOW: u64 = 100_000_000;
const MAX_STARTING_NONCE: u64 = 1_000_000_000_000;
/// Gap left after a found nonce before the next window starts, so the very
/// next attempt doesn't immediately re-find the same solution.
const NONCE_SKIP_AFTER_SOLUTION: u64 = 1000;

/// Run the single-threaded benchmark: find `target_solutions` solutions at
/// `difficulty` and report aggregate solutions/sec and hashrate.
pub fn run_single_benchmark(
    event_json: &str,
    difficulty: u32,
    target_solutions: u64,
) -> Result<BenchmarkResult, MinerError> {
    info!(
        "🚀 Benchmark Mode: Finding {} solutions at difficulty {}",
        target_solutions, difficulty
    );

    let start_time = Instant::now();
    let mut solutions_found = 0u64;
    let mut total_attempts = 0u64;
    let mut starting_nonce = 1u64;

    while solutions_found < target_solutions {
        let range = NonceRange::new(starting_nonce, starting_nonce + SEARCH_WINDOW);
        let (outcome, attempts) = search_with_attempts(event_json, difficulty, range);
        total_attempts += attempts;

        match outcome {
            Some(SearchOutcome { nonce, .. }) => {
                solutions_found += 1;
                starting_nonce = nonce + NONCE_SKIP_AFTER_SOLUTION;
                info!(
                    "✅ Solution {} found (nonce: {}, attempts: {})",
                    solutions_found, nonce, attempts
                );
            }
            None => {
                info!("❌ Failed to find solution in range, extending search...");
                starting_nonce += SEARCH_WINDOW;
                if starting_nonce > MAX_STARTING_NONCE {
                    info!("💔 Benchmark failed - difficulty may be too high");
                    return Err(MinerError::BenchmarkCapExceeded {
                        cap: MAX_STARTING_NONCE,
                        solutions_found,
                        target: target_solutions,
                    });
                }
            }
        }
    }

    let elapsed = start_time.elapsed();
    let result = BenchmarkResult {
        solutions_found,
        total_attempts,
        elapsed,
        thread_count: 1,
    };

    info!("🎉 Benchmark Complete!");
    info!(
        "📊 Results for difficulty {}: {} solutions in {:.2}s, {:.3} solutions/sec",
        difficulty,
        result.solutions_found,
        result.elapsed.as_secs_f64(),
        result.solutions_per_sec()
    );

    Ok(result)
}
