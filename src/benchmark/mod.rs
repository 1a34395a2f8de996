// nip13-miner
//
// File: src/benchmark/mod.rs
//
// Module declaration for the benchmark drivers: a parallel one built on
// `core::search::search_parallel` and a single-threaded one built on
// `core::search::search`, each using its own nonce-advancement strategy.
//
// Tree Location:
// - src/benchmark/mod.rs (benchmark module entry point)
// - Submodules: runner, single

pub mod runner;
pub mod single;

pub use runner::run_parallel_benchmark;
pub use single::run_single_benchmark;
