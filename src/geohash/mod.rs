// nip13-miner
//
// File: src/geohash/mod.rs
//
// Independent geohash-to-coordinate decoder and nearest-relay finder. Shares
// no state or modules with the miner; grounded entirely in
// `geohash_relay_finder.c`, which has no counterpart in any of the
// retrieved Rust teachers.
//
// Tree Location:
// - src/geohash/mod.rs (geohash module entry point)
// - Submodules: decode, relay

pub mod decode;
pub mod relay;

pub use decode::{decode_geohash, Coordinate};
pub use relay::{find_nearest_relays, load_relays, Relay};
