//! Network governance: configuration changes and software upgrades.
//!
//! Only the nemesis account's signature is accepted for these, so they are
//! rare in practice. Both schedule a change a number of blocks ahead.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{short_count, BodyEncoder};
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::transaction::types::TransactionType;

const CONFIG_FIELDS: &[Field] = &[
    Field::vector("apply_height_delta", 4),
    Field::scalar("blockchain_config_size", 2),
    Field::scalar("supported_entity_versions_size", 2),
    Field::vector("blockchain_config", 1),
    Field::vector("supported_entity_versions", 1),
];

const UPGRADE_FIELDS: &[Field] = &[
    Field::vector("upgrade_period", 4),
    Field::vector("new_blockchain_version", 4),
];

pub static BLOCKCHAIN_CONFIG_SCHEMA: Schema = Schema::transaction("blockchain_config", CONFIG_FIELDS);

pub static BLOCKCHAIN_UPGRADE_SCHEMA: Schema =
    Schema::transaction("blockchain_upgrade", UPGRADE_FIELDS);

// ---------------------------------------------------------------------------
// BlockchainConfig
// ---------------------------------------------------------------------------

/// New network configuration, applied `apply_height_delta` blocks after
/// confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainConfigBody {
    pub apply_height_delta: u64,
    /// The full node configuration, in the node's ini format.
    pub blockchain_config: String,
    /// JSON listing the entity versions the network accepts.
    pub supported_entity_versions: String,
}

impl BlockchainConfigBody {
    pub fn new(
        apply_height_delta: u64,
        blockchain_config: impl Into<String>,
        supported_entity_versions: impl Into<String>,
    ) -> Self {
        Self {
            apply_height_delta,
            blockchain_config: blockchain_config.into(),
            supported_entity_versions: supported_entity_versions.into(),
        }
    }
}

impl BodyEncoder for BlockchainConfigBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::BlockchainConfig
    }

    fn schema(&self) -> &'static Schema {
        &BLOCKCHAIN_CONFIG_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        let config = self.blockchain_config.as_bytes();
        let versions = self.supported_entity_versions.as_bytes();
        w.write_u64("apply_height_delta", self.apply_height_delta)?;
        w.write_u16(
            "blockchain_config_size",
            short_count("blockchain_config_size", config.len())?,
        )?;
        w.write_u16(
            "supported_entity_versions_size",
            short_count("supported_entity_versions_size", versions.len())?,
        )?;
        w.write_vector("blockchain_config", config)?;
        w.write_vector("supported_entity_versions", versions)
    }
}

// ---------------------------------------------------------------------------
// BlockchainUpgrade
// ---------------------------------------------------------------------------

/// A node software version, packed on the wire as four 16-bit parts with
/// `major` in the top bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockchainVersion {
    pub major: u16,
    pub minor: u16,
    pub revision: u16,
    pub build: u16,
}

impl BlockchainVersion {
    pub fn new(major: u16, minor: u16, revision: u16, build: u16) -> Self {
        Self {
            major,
            minor,
            revision,
            build,
        }
    }

    pub fn value(&self) -> u64 {
        (u64::from(self.major) << 48)
            | (u64::from(self.minor) << 32)
            | (u64::from(self.revision) << 16)
            | u64::from(self.build)
    }

    pub fn from_value(value: u64) -> Self {
        Self::new(
            (value >> 48) as u16,
            (value >> 32) as u16,
            (value >> 16) as u16,
            value as u16,
        )
    }
}

impl fmt::Display for BlockchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.revision, self.build)
    }
}

/// Switch the network to `new_version` after `upgrade_period` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainUpgradeBody {
    pub upgrade_period: u64,
    pub new_version: BlockchainVersion,
}

impl BlockchainUpgradeBody {
    pub fn new(upgrade_period: u64, new_version: BlockchainVersion) -> Self {
        Self {
            upgrade_period,
            new_version,
        }
    }
}

impl BodyEncoder for BlockchainUpgradeBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::BlockchainUpgrade
    }

    fn schema(&self) -> &'static Schema {
        &BLOCKCHAIN_UPGRADE_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u64("upgrade_period", self.upgrade_period)?;
        w.write_u64("new_blockchain_version", self.new_version.value())
    }
}
