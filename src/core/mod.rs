// nip13-miner
//
// File: src/core/mod.rs
//
// Module declaration for the miner's core: hashing, JSON splicing, nonce
// search, shared types, and error handling.
//
// Tree Location:
// - src/core/mod.rs (core module entry point)
// - Submodules: sha256, serializer, search, types, error

pub mod error;
pub mod search;
pub mod serializer;
pub mod sha256;
pub mod types;
pub mod validate;

pub use error::MinerError;
pub use search::{count_leading_zero_bits, search, search_parallel, NonceRange, SearchOutcome};
pub use serializer::{confirm_nonce_embeds, increment_timestamp, set_nonce, set_timestamp};
pub use sha256::Sha256;
pub use types::{BenchmarkResult, MinerArgs};
pub use validate::sanity_check_event;
