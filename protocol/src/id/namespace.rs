//! Namespace identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{generate_namespace_id, generate_sub_namespace_id, IdError};

/// A namespace id. Derived ids are always negative as `i64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(i64);

impl NamespaceId {
    /// Wrap a raw id, e.g. one returned by a node.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Id of the full dotted `name` (`"prx.xpx"`).
    pub fn from_name(name: &str) -> Result<Self, IdError> {
        generate_namespace_id(name).map(Self)
    }

    /// Id of a single `name` directly below `parent`.
    pub fn child(parent: NamespaceId, name: &str) -> Result<Self, IdError> {
        generate_sub_namespace_id(parent.0, name).map(Self)
    }

    /// Parse the 16-character big-endian hex form.
    pub fn from_hex(hex_str: &str) -> Result<Self, IdError> {
        parse_hex_id(hex_str).map(Self)
    }

    pub fn id(&self) -> i64 {
        self.0
    }

    /// The id as the unsigned value the wire carries.
    pub fn to_u64(&self) -> u64 {
        self.0 as u64
    }

    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.to_u64())
    }
}

/// Parse a 1-16 digit hex string into the bit pattern of an `i64`.
pub(crate) fn parse_hex_id(hex_str: &str) -> Result<i64, IdError> {
    let trimmed = hex_str.trim();
    if trimmed.is_empty()
        || trimmed.len() > 16
        || !trimmed.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(IdError::InvalidHex(hex_str.to_string()));
    }
    u64::from_str_radix(trimmed, 16)
        .map(|v| v as i64)
        .map_err(|_| IdError::InvalidHex(hex_str.to_string()))
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}
