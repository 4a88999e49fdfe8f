//! Deterministic identifier derivation.
//!
//! ```text
//! digest = SHA3-256(prefix ‖ name)
//! low    = u32_le(digest[0..4])
//! high   = u32_le(digest[4..8]) with bit 31 forced
//! id     = (high << 32) | low
//! ```
//!
//! For namespaces the prefix is the parent id as 8 little-endian bytes and
//! bit 31 of `high` is set. For mosaics the prefix is the 4-byte nonce, the
//! "name" is the owner's raw public key, and bit 31 is cleared.

use tracing::trace;

use super::IdError;
use crate::config::NAMESPACE_MAX_DEPTH;
use crate::crypto::{sha3_256_parts, PublicKey};

const NAMESPACE_FLAG: u32 = 0x8000_0000;

/// Fold the first eight digest bytes into an id, forcing the kind bit.
fn digest_to_id(digest: &[u8; 32], namespace: bool) -> i64 {
    let low = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let mut high = u32::from_le_bytes([digest[4], digest[5], digest[6], digest[7]]);
    if namespace {
        high |= NAMESPACE_FLAG;
    } else {
        high &= !NAMESPACE_FLAG;
    }
    (((high as u64) << 32) | low as u64) as i64
}

/// Derive the id of `name` under `parent_id` (0 for a root namespace).
///
/// The result is always negative.
pub fn generate_id(name: &str, parent_id: i64) -> i64 {
    let digest = sha3_256_parts(&[&parent_id.to_le_bytes(), name.as_bytes()]);
    digest_to_id(&digest, true)
}

/// Check one path segment against `^[a-z0-9][a-z0-9-_]*$`.
pub(crate) fn validate_segment(full: &str, segment: &str) -> Result<(), IdError> {
    let invalid = |reason| IdError::InvalidIdentifier {
        name: full.to_string(),
        reason,
    };
    let mut chars = segment.chars();
    match chars.next() {
        None => return Err(invalid("empty path segment")),
        Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
        Some(_) => return Err(invalid("segment must start with [a-z0-9]")),
    }
    if chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_') {
        Ok(())
    } else {
        Err(invalid("segment may only contain [a-z0-9-_]"))
    }
}

/// Derive the id of every level of a dotted namespace path.
///
/// `"nem.xem"` yields `[id(nem), id(xem under nem)]`. Fails with
/// [`IdError::InvalidIdentifier`] for empty names, more than three levels,
/// or malformed segments. Nothing is truncated or normalized.
pub fn generate_namespace_path(name: &str) -> Result<Vec<i64>, IdError> {
    if name.is_empty() {
        return Err(IdError::InvalidIdentifier {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() > NAMESPACE_MAX_DEPTH {
        return Err(IdError::InvalidIdentifier {
            name: name.to_string(),
            reason: "too many levels",
        });
    }

    let mut path = Vec::with_capacity(segments.len());
    let mut parent_id = 0i64;
    for segment in segments {
        validate_segment(name, segment)?;
        parent_id = generate_id(segment, parent_id);
        path.push(parent_id);
    }
    trace!(name, levels = path.len(), "derived namespace path");
    Ok(path)
}

/// The id of the last level of `name`.
pub fn generate_namespace_id(name: &str) -> Result<i64, IdError> {
    let path = generate_namespace_path(name)?;
    // A validated path has at least one level.
    path.last().copied().ok_or_else(|| IdError::InvalidIdentifier {
        name: name.to_string(),
        reason: "name is empty",
    })
}

/// The id of a single `name` directly below `parent_id`.
///
/// Used when registering a sub-namespace whose parent is only known by id.
pub fn generate_sub_namespace_id(parent_id: i64, name: &str) -> Result<i64, IdError> {
    validate_segment(name, name)?;
    Ok(generate_id(name, parent_id))
}

/// Derive a mosaic id from its nonce and the owner's public key.
///
/// The result is always non-negative.
pub fn generate_mosaic_id(nonce: u32, owner: &PublicKey) -> i64 {
    let digest = sha3_256_parts(&[&nonce.to_le_bytes(), owner.as_bytes()]);
    digest_to_id(&digest, false)
}
