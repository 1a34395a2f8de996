// nip13-miner
//
// File: src/core/error.rs
//
// Structured error type for the miner core and its CLI shells.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinerError {
    #[error("failed to read event file {path:?}")]
    ReadEvent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write mined event to {path:?}")]
    WriteEvent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("difficulty {value} out of range (must be 1..=32)")]
    InvalidDifficulty { value: u32 },

    #[error("thread count {value} out of range (must be 1..=128)")]
    InvalidThreadCount { value: usize },

    #[error("benchmark target solutions must be at least 1, got {value}")]
    InvalidBenchmarkTarget { value: u64 },

    #[error("mining failed: no nonce in [{start}, {end}) reached difficulty {difficulty}")]
    MiningFailed { start: u64, end: u64, difficulty: u32 },

    #[error("benchmark cap of {cap} nonces exceeded after {solutions_found} of {target} solutions")]
    BenchmarkCapExceeded {
        cap: u64,
        solutions_found: u64,
        target: u64,
    },

    #[error(
        "event has no \"tags\" array and no \"nonce\" tag; set_nonce left the buffer unchanged"
    )]
    MalformedEvent,

    #[error("event is not valid JSON, or is missing a \"created_at\" field or array-typed \"tags\" field")]
    InvalidEventShape,
}
