// nip13-miner
//
// File: src/core/validate.rs
//
// Validation-only JSON sanity check for the event file, run once at the
// file-loading boundary before mining starts. This is the only place in the
// crate that is allowed to reach for `serde_json`: the hot loop splices
// bytes directly (see core::serializer) and must never re-serialize through
// a JSON library, which could reorder keys or reformat whitespace and break
// the byte-exact pre-image the hasher and a verifying relay both see.

use serde::Deserialize;
use serde_json::Value;

use crate::core::error::MinerError;

/// The handful of fields this crate actually touches. Extra event fields
/// (`id`, `pubkey`, `sig`, `kind`, ...) are accepted and ignored — full
/// Nostr event validation is explicitly out of scope (spec.md §1).
#[derive(Deserialize)]
struct EventShape {
    created_at: Value,
    tags: Value,
}

/// Parse `json` just far enough to confirm it is a well-formed JSON object
/// with `created_at` and `tags` fields. Does not touch the text used for
/// mining — this exists solely to fail fast with a clear message instead of
/// silently mining a buffer that will never embed a nonce.
pub fn sanity_check_event(json: &str) -> Result<(), MinerError> {
    match serde_json::from_str::<EventShape>(json) {
        Ok(shape) if shape.tags.is_array() => Ok(()),
        _ => Err(MinerError::InvalidEventShape),
    }
}
