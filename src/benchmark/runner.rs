// nip13-miner
//
// File: src/benchmark/runner.rs
//
// Parallel benchmark driver: repeatedly calls `search_parallel` over
// 100-million-nonce windows to find a target number of solutions, bumping
// the event's timestamp by one second after each success so consecutive
// solutions don't collide. Mirrors `benchmark_mode_parallel` from the
// parallel original, and the progress-reporting/result-struct shape of the
// teacher's `BenchmarkRunner`.

use std::time::Instant;

use tracing::info;

use crate::core::error::MinerError;
use crate::core::search::{search_parallel, NonceRange, SearchOutcome};
use crate::core::serializer::increment_timestamp;
use crate::core::types::BenchmarkResult;

/// Width of each search window before the starting nonce is extended.
const SEARCH_WINDOW: u64 = 100_000_000;
/// Upper bound on how far the starting nonce may be pushed before giving up,
/// matching the original's overflow guard.
const MAX_STARTING_NONCE: u64 = 1_000_000_000_000;

/// Run the parallel benchmark: find `target_solutions` solutions at
/// `difficulty`, using `num_threads` workers per search window, and report
/// aggregate solutions/sec and hashrate.
pub fn run_parallel_benchmark(
    event_json: &str,
    difficulty: u32,
    target_solutions: u64,
    num_threads: usize,
) -> Result<BenchmarkResult, MinerError> {
    info!(
        "🚀 Parallel Benchmark Mode: Finding {} solutions at difficulty {} ({} threads)",
        target_solutions, difficulty, num_threads
    );
    info!("📊 Measuring solutions per second with unique timestamps...");

    let start_time = Instant::now();
    let mut solutions_found = 0u64;
    let mut total_attempts = 0u64;
    let mut starting_nonce = 1u64;
    let mut working_json = event_json.to_string();

    while solutions_found < target_solutions {
        let range = NonceRange::new(starting_nonce, starting_nonce + SEARCH_WINDOW);
        let (outcome, attempts) = search_parallel(&working_json, difficulty, range, num_threads);
        total_attempts += attempts;

        match outcome {
            Some(SearchOutcome { nonce, .. }) => {
                solutions_found += 1;
                starting_nonce = 1;
                info!(
                    "✅ Solution {} found (nonce: {}, attempts: {})",
                    solutions_found, nonce, attempts
                );
                working_json = increment_timestamp(&working_json, 1);
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
        thread_count: num_threads,
    };

    info!("🎉 Parallel Benchmark Complete!");
    info!(
        "📊 Results for difficulty {} ({} threads): {} solutions in {:.2}s, {:.3} solutions/sec",
        difficulty,
        num_threads,
        result.solutions_found,
        result.elapsed.as_secs_f64(),
        result.solutions_per_sec()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_target_solutions_at_low_difficulty() {
        let json = r#"{"id":"","pubkey":"p","created_at":1,"kind":1,"tags":[],"content":"c","sig":""}"#;
        let result = run_parallel_benchmark(json, 2, 3, 2).expect("benchmark should succeed at low difficulty");
        assert_eq!(result.solutions_found, 3);
        assert!(result.total_attempts > 0);
    }

    #[test]
    fn starting_nonce_cap_is_a_whole_number_of_windows() {
        assert_eq!(MAX_STARTING_NONCE / SEARCH_WINDOW, 10_000);
    }
}
