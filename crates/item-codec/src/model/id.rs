//! UUID helpers.
//!
//! Modifier identities are RFC 4122 UUIDs. On the tag surface they are split
//! into two signed 64-bit halves.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Derives a UUIDv8 from input bytes using SHA-256.
///
/// ```text
/// hash = SHA-256(input_bytes)[0:16]
/// hash[6] = (hash[6] & 0x0F) | 0x80  // version 8
/// hash[8] = (hash[8] & 0x3F) | 0x80  // RFC 4122 variant
/// ```
pub fn derived_uuid(input: &[u8]) -> Uuid {
    let hash = Sha256::digest(input);
    let mut id = [0u8; 16];
    id.copy_from_slice(&hash[..16]);

    id[6] = (id[6] & 0x0F) | 0x80;
    id[8] = (id[8] & 0x3F) | 0x80;

    Uuid::from_bytes(id)
}

/// Splits a UUID into its most and least significant halves.
pub fn to_halves(uuid: Uuid) -> (i64, i64) {
    let (most, least) = uuid.as_u64_pair();
    (most as i64, least as i64)
}

/// Rebuilds a UUID from its most and least significant halves.
pub fn from_halves(most: i64, least: i64) -> Uuid {
    Uuid::from_u64_pair(most as u64, least as u64)
}
