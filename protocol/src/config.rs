//! # Protocol Configuration & Constants
//!
//! Every magic number the wire format depends on lives here. If you are
//! hardcoding an offset somewhere else, you are doing it wrong.
//!
//! These values are dictated by the network, not by us. Changing any of them
//! produces transactions that nodes silently reject, so treat this file as
//! read-only unless the network itself changes.
//!
//! The second half of the file holds [`EngineConfig`], the small amount of
//! runtime configuration a caller can actually choose.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::account::NetworkType;
use crate::fee::{FeeCalculator, PerByteFee, ZeroFee};

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

pub const SECRET_KEY_LENGTH: usize = 32;

pub const PUBLIC_KEY_LENGTH: usize = 32;

/// `R ‖ S`, 32 bytes each.
pub const SIGNATURE_LENGTH: usize = 64;

pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Transaction Header Layout
// ---------------------------------------------------------------------------

/// Size of the standalone transaction header; the body starts here.
pub const HEADER_SIZE: usize = 120;

pub const SIGNATURE_OFFSET: usize = 4;

pub const SIGNER_OFFSET: usize = 68;

/// Start of the signing scope: version, type, fee, deadline, body.
pub const SIGNING_SCOPE_OFFSET: usize = 100;

/// Start of the max fee field. Fee and deadline are dropped on embedding.
pub const MAX_FEE_OFFSET: usize = 104;

pub const DEADLINE_OFFSET: usize = 112;

/// Size of the embedded header: size, signer, version, type.
pub const EMBEDDED_HEADER_SIZE: usize = 40;

/// Bytes removed when a transaction is embedded: signature plus fee and
/// deadline.
pub const EMBEDDING_OVERHEAD: usize = HEADER_SIZE - EMBEDDED_HEADER_SIZE;

/// Public key plus signature, appended per cosigner.
pub const COSIGNATURE_SIZE: usize = PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH;

// ---------------------------------------------------------------------------
// Addresses & Identifiers
// ---------------------------------------------------------------------------

/// Decoded address: network byte, 20-byte body, 4-byte checksum.
pub const ADDRESS_LENGTH: usize = 25;

pub const ADDRESS_ENCODED_LENGTH: usize = 40;

pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// First byte of a recipient that is a namespace alias rather than an
/// address.
pub const NAMESPACE_RECIPIENT_PREFIX: u8 = 0x91;

/// Root, child, grandchild. No deeper.
pub const NAMESPACE_MAX_DEPTH: usize = 3;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Unix time (ms) of the network's nemesis block, 2016-04-01T00:00:00Z.
/// Deadlines on the wire are milliseconds since this instant.
pub const NETWORK_EPOCH_MILLIS: i64 = 1_459_468_800_000;

/// Deadline used when the caller does not pick one.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(2 * 60 * 60);

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Errors loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fee strategy selection, as it appears in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FeeConfig {
    /// Every transaction announces a max fee of zero.
    Zero,
    /// `max_fee = payload_size * multiplier`.
    PerByte { multiplier: u64 },
}

/// Caller-tunable settings for building transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub network: NetworkType,
    /// Deadline offset from "now" in seconds.
    pub deadline_secs: u64,
    pub fee: FeeConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::MijinTest,
            deadline_secs: DEFAULT_DEADLINE.as_secs(),
            fee: FeeConfig::Zero,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    /// The fee strategy this config selects.
    pub fn fee_calculator(&self) -> Box<dyn FeeCalculator> {
        match self.fee {
            FeeConfig::Zero => Box::new(ZeroFee),
            FeeConfig::PerByte { multiplier } => Box::new(PerByteFee::new(multiplier)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout_is_contiguous() {
        assert_eq!(SIGNATURE_OFFSET + SIGNATURE_LENGTH, SIGNER_OFFSET);
        assert_eq!(SIGNER_OFFSET + PUBLIC_KEY_LENGTH, SIGNING_SCOPE_OFFSET);
        assert_eq!(SIGNING_SCOPE_OFFSET + 4, MAX_FEE_OFFSET);
        assert_eq!(MAX_FEE_OFFSET + 8, DEADLINE_OFFSET);
        assert_eq!(DEADLINE_OFFSET + 8, HEADER_SIZE);
    }

    #[test]
    fn test_embedding_overhead() {
        // Signature (64) plus fee and deadline (16).
        assert_eq!(EMBEDDING_OVERHEAD, 80);
        assert_eq!(EMBEDDED_HEADER_SIZE, 4 + PUBLIC_KEY_LENGTH + 4);
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.network, NetworkType::MijinTest);
        assert_eq!(config.deadline(), Duration::from_secs(7200));
        assert_eq!(config.fee, FeeConfig::Zero);
    }

    #[test]
    fn test_config_from_json() {
        let config = EngineConfig::from_json_str(
            r#"{"network":"test_net","fee":{"strategy":"per_byte","multiplier":3}}"#,
        )
        .unwrap();
        assert_eq!(config.network, NetworkType::TestNet);
        assert_eq!(config.deadline_secs, 7200);
        assert_eq!(config.fee_calculator().calculate(100), 300);
    }

    #[test]
    fn test_config_rejects_unknown_network() {
        assert!(EngineConfig::from_json_str(r#"{"network":"moon"}"#).is_err());
    }
}
