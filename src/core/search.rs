// nip13-miner
//
// File: src/core/search.rs
//
// The search engine: brute-force nonce iteration over an event's JSON text,
// single-threaded or partitioned across worker threads. Mirrors the worker
// loop shape of the teacher's `miner/cpu/thread.rs` and the shared
// stop-flag/atomic-counter bookkeeping of `benchmark/runner.rs`, but spawns
// with `std::thread::scope` instead of `Arc`-cloned state: the event buffer
// and atomics never need to outlive the search call, so a scoped borrow is
// enough and avoids an allocation per thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::core::serializer::set_nonce;
use crate::core::sha256::Sha256;

/// Count of leading zero bits in a 32-byte big-endian digest. Difficulty in
/// NIP-13 is expressed in bits, not hex nibbles, so a digest with a leading
/// `0x0f` byte counts as 4 leading zero bits, not a clean multiple of 8.
pub fn count_leading_zero_bits(hash: &[u8; 32]) -> u32 {
    let mut zeros = 0u32;
    for &byte in hash {
        if byte == 0 {
            zeros += 8;
        } else {
            zeros += byte.leading_zeros();
            break;
        }
    }
    zeros
}

/// A half-open range of nonces, `[start, end)`, to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceRange {
    pub start: u64,
    pub end: u64,
}

impl NonceRange {
    pub fn new(start: u64, end: u64) -> Self {
        NonceRange { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Split this range into `num_workers` contiguous, non-overlapping
    /// sub-ranges of equal size, with any remainder nonces appended to the
    /// last worker's share. Matches `nip13_mine_parallel`'s partitioning.
    pub fn partition(&self, num_workers: usize) -> Vec<NonceRange> {
        if num_workers == 0 || self.is_empty() {
            return Vec::new();
        }

        let total = self.len();
        let per_worker = total / num_workers as u64;
        let remainder = total % num_workers as u64;

        let mut ranges = Vec::with_capacity(num_workers);
        let mut cursor = self.start;
        for i in 0..num_workers {
            let mut chunk_len = per_worker;
            if i == num_workers - 1 {
                chunk_len += remainder;
            }
            let chunk_end = cursor + chunk_len;
            ranges.push(NonceRange::new(cursor, chunk_end));
            cursor = chunk_end;
        }
        ranges
    }
}

/// The result of a successful search: the winning nonce, the spliced JSON
/// that hashes to a qualifying digest, the digest itself, and bookkeeping
/// useful for reporting.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub nonce: u64,
    pub json: String,
    pub hash: [u8; 32],
    pub leading_zero_bits: u32,
    pub attempts: u64,
}

/// Search `range` single-threaded for a nonce whose spliced-in event hashes
/// to at least `difficulty` leading zero bits. Returns `None` with the total
/// attempt count discarded on exhaustion — callers that need the attempt
/// count on failure should use [`search_with_attempts`].
pub fn search(json: &str, difficulty: u32, range: NonceRange) -> Option<SearchOutcome> {
    search_with_attempts(json, difficulty, range).0
}

/// Same as [`search`] but always returns the number of attempts made,
/// whether or not a solution was found.
pub fn search_with_attempts(json: &str, difficulty: u32, range: NonceRange) -> (Option<SearchOutcome>, u64) {
    let mut attempts = 0u64;
    for nonce in range.start..range.end {
        attempts += 1;
        let candidate = set_nonce(json, nonce);
        let hash = Sha256::oneshot(candidate.as_bytes());
        let leading_zero_bits = count_leading_zero_bits(&hash);
        if leading_zero_bits >= difficulty {
            return (
                Some(SearchOutcome {
                    nonce,
                    json: candidate,
                    hash,
                    leading_zero_bits,
                    attempts,
                }),
                attempts,
            );
        }
    }
    (None, attempts)
}

/// Search `range` across `num_threads` worker threads. The first thread to
/// find a qualifying nonce sets a shared latch; other threads observe it and
/// stop at their next iteration boundary — there is no guarantee the
/// solution returned is the smallest nonce in range, only that it is the
/// first one a worker happened to reach, by design (see
/// [`count_leading_zero_bits`] above for the predicate each worker checks).
pub fn search_parallel(json: &str, difficulty: u32, range: NonceRange, num_threads: usize) -> (Option<SearchOutcome>, u64) {
    if num_threads <= 1 {
        return search_with_attempts(json, difficulty, range);
    }

    let sub_ranges = range.partition(num_threads);
    let found = AtomicBool::new(false);
    let total_attempts = AtomicU64::new(0);
    let winner: Mutex<Option<SearchOutcome>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for sub_range in &sub_ranges {
            let found = &found;
            let total_attempts = &total_attempts;
            let winner = &winner;
            let sub_range = *sub_range;

            scope.spawn(move || {
                let mut attempts = 0u64;
                let mut nonce = sub_range.start;

                while nonce < sub_range.end && !found.load(Ordering::Relaxed) {
                    attempts += 1;
                    let candidate = set_nonce(json, nonce);
                    let hash = Sha256::oneshot(candidate.as_bytes());
                    let leading_zero_bits = count_leading_zero_bits(&hash);

                    if leading_zero_bits >= difficulty {
                        let mut guard = winner.lock().expect("search_parallel winner mutex poisoned");
                        if !found.load(Ordering::Relaxed) {
                            found.store(true, Ordering::Relaxed);
                            *guard = Some(SearchOutcome {
                                nonce,
                                json: candidate,
                                hash,
                                leading_zero_bits,
                                attempts,
                            });
                        }
                        drop(guard);
                        break;
                    }

                    nonce += 1;
                }

                total_attempts.fetch_add(attempts, Ordering::Relaxed);
            });
        }
    });

    let outcome = winner.into_inner().expect("search_parallel winner mutex poisoned");
    let total = total_attempts.load(Ordering::Relaxed);
    (outcome, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zero_bits_of_all_zero_hash() {
        let hash = [0u8; 32];
        assert_eq!(count_leading_zero_bits(&hash), 256);
    }

    #[test]
    fn leading_zero_bits_counts_within_first_nonzero_byte() {
        let mut hash = [0u8; 32];
        hash[0] = 0b0000_0000;
        hash[1] = 0b0010_0000; // 2 leading zero bits in this byte
        assert_eq!(count_leading_zero_bits(&hash), 8 + 2);
    }

    #[test]
    fn leading_zero_bits_zero_for_msb_set() {
        let mut hash = [0u8; 32];
        hash[0] = 0x80;
        assert_eq!(count_leading_zero_bits(&hash), 0);
    }

    #[test]
    fn leading_zero_bits_exhaustive_single_byte() {
        for i in 0u32..256 {
            let byte = i as u8;
            let mut hash = [0xFFu8; 32];
            hash[0] = byte;
            let expected = if byte == 0 { 8 } else { byte.leading_zeros() };
            assert_eq!(count_leading_zero_bits(&hash), expected, "byte {byte:#04x}");
        }
    }

    #[test]
    fn partition_divides_evenly() {
        let range = NonceRange::new(0, 100);
        let parts = range.partition(4);
        assert_eq!(parts.len(), 4);
        for part in &parts {
            assert_eq!(part.len(), 25);
        }
        assert_eq!(parts[0].start, 0);
        assert_eq!(parts.last().unwrap().end, 100);
    }

    #[test]
    fn partition_gives_remainder_to_last_worker() {
        let range = NonceRange::new(0, 103);
        let parts = range.partition(4);
        assert_eq!(parts[0].len(), 25);
        assert_eq!(parts[1].len(), 25);
        assert_eq!(parts[2].len(), 25);
        assert_eq!(parts[3].len(), 28);
        assert_eq!(parts.last().unwrap().end, 103);
    }

    #[test]
    fn partition_covers_range_with_no_gaps_or_overlaps() {
        let range = NonceRange::new(17, 1009);
        for workers in 1..=16 {
            let parts = range.partition(workers);
            let mut cursor = range.start;
            for part in &parts {
                assert_eq!(part.start, cursor);
                cursor = part.end;
            }
            assert_eq!(cursor, range.end);
        }
    }

    #[test]
    fn search_finds_known_solution_at_low_difficulty() {
        let json = r#"{"id":"","pubkey":"p","created_at":1,"kind":1,"tags":[],"content":"c","sig":""}"#;
        let (outcome, _attempts) = search_with_attempts(json, 1, NonceRange::new(0, 1_000_000));
        let outcome = outcome.expect("difficulty 1 should be found quickly");
        assert!(outcome.leading_zero_bits >= 1);
        let rehash = Sha256::oneshot(outcome.json.as_bytes());
        assert_eq!(rehash, outcome.hash);
    }

    #[test]
    fn search_exhausts_range_without_match_at_impossible_difficulty() {
        let json = r#"{"id":"","pubkey":"p","created_at":1,"kind":1,"tags":[],"content":"c","sig":""}"#;
        let (outcome, attempts) = search_with_attempts(json, 255, NonceRange::new(0, 200));
        assert!(outcome.is_none());
        assert_eq!(attempts, 200);
    }

    #[test]
    fn search_parallel_agrees_with_single_threaded_for_feasible_difficulty() {
        let json = r#"{"id":"","pubkey":"p","created_at":1,"kind":1,"tags":[],"content":"c","sig":""}"#;
        let difficulty = 8;
        let range = NonceRange::new(0, 2_000_000);

        let (single, _) = search_with_attempts(json, difficulty, range);
        let (parallel, _) = search_parallel(json, difficulty, range, 4);

        let single = single.expect("single-threaded search should find a solution");
        let parallel = parallel.expect("parallel search should find a solution");
        assert!(single.leading_zero_bits >= difficulty);
        assert!(parallel.leading_zero_bits >= difficulty);
    }

    #[test]
    fn search_parallel_with_one_thread_matches_sequential_search() {
        let json = r#"{"id":"","pubkey":"p","created_at":1,"kind":1,"tags":[],"content":"c","sig":""}"#;
        let range = NonceRange::new(0, 500_000);
        let (single, single_attempts) = search_with_attempts(json, 10, range);
        let (parallel, parallel_attempts) = search_parallel(json, 10, range, 1);
        assert_eq!(single.map(|o| o.nonce), parallel.map(|o| o.nonce));
        assert_eq!(single_attempts, parallel_attempts);
    }
}
