//! Mosaic identifiers, nonces, and amounts.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::namespace::parse_hex_id;
use super::{generate_mosaic_id, IdError, NamespaceId};
use crate::crypto::PublicKey;

// ---------------------------------------------------------------------------
// MosaicNonce
// ---------------------------------------------------------------------------

/// The 4 random bytes a mosaic creator picks to make its id unique.
///
/// Stored in wire order: the nonce `0x78E36FB7` is the byte string
/// `B7 6F E3 78`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicNonce([u8; 4]);

impl MosaicNonce {
    pub fn random() -> Self {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    /// Parse 8 hex characters in wire (little-endian) order.
    pub fn from_hex(hex_str: &str) -> Result<Self, IdError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| IdError::InvalidHex(hex_str.to_string()))?;
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| IdError::InvalidHex(hex_str.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

// ---------------------------------------------------------------------------
// MosaicId
// ---------------------------------------------------------------------------

/// A mosaic id. Derived ids are always non-negative as `i64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MosaicId(i64);

impl MosaicId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The id a mosaic created by `owner` with `nonce` will get.
    pub fn from_nonce(nonce: MosaicNonce, owner: &PublicKey) -> Self {
        Self(generate_mosaic_id(nonce.to_u32(), owner))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, IdError> {
        parse_hex_id(hex_str).map(Self)
    }

    pub fn id(&self) -> i64 {
        self.0
    }

    pub fn to_u64(&self) -> u64 {
        self.0 as u64
    }

    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.to_u64())
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Mosaic
// ---------------------------------------------------------------------------

/// How a transaction refers to a mosaic: by its id, or through a namespace
/// aliased to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MosaicRef {
    Id(MosaicId),
    Alias(NamespaceId),
}

impl MosaicRef {
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Id(id) => id.to_u64(),
            Self::Alias(ns) => ns.to_u64(),
        }
    }
}

impl From<MosaicId> for MosaicRef {
    fn from(id: MosaicId) -> Self {
        Self::Id(id)
    }
}

impl From<NamespaceId> for MosaicRef {
    fn from(id: NamespaceId) -> Self {
        Self::Alias(id)
    }
}

/// An amount of a mosaic, in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: MosaicRef,
    pub amount: u64,
}

impl Mosaic {
    pub fn new(id: impl Into<MosaicRef>, amount: u64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}
