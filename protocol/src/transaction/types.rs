//! Core type definitions for transactions.
//!
//! These are the small enums every layer shares: which kind of transaction
//! a payload holds, and which hash algorithm a secret lock uses. They are
//! `Copy` and map one-to-one onto the numeric codes the wire carries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::TransactionError;
use crate::crypto::{double_sha256, hash160, keccak_256, sha3_256};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The kind of a transaction, with its on-wire type code.
///
/// The low byte of the code groups related kinds (`0x4D` mosaics, `0x4E`
/// namespaces, `0x3D` metadata, ...); the high byte tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum TransactionType {
    MosaicDefinition = 0x414D,
    MosaicSupplyChange = 0x424D,
    RegisterNamespace = 0x414E,
    AddressAlias = 0x424E,
    MosaicAlias = 0x434E,
    Transfer = 0x4154,
    ModifyMultisigAccount = 0x4155,
    AggregateComplete = 0x4141,
    AggregateBonded = 0x4241,
    Lock = 0x4148,
    AccountPropertiesAddress = 0x4150,
    AccountPropertiesMosaic = 0x4250,
    AccountPropertiesEntityType = 0x4350,
    SecretLock = 0x4152,
    SecretProof = 0x4252,
    AccountLink = 0x414C,
    ModifyAddressMetadata = 0x413D,
    ModifyMosaicMetadata = 0x423D,
    ModifyNamespaceMetadata = 0x433D,
    ModifyContract = 0x4157,
    BlockchainUpgrade = 0x4158,
    BlockchainConfig = 0x4159,
    ExchangeOfferAdd = 0x415D,
    ExchangeOffer = 0x425D,
    ExchangeOfferRemove = 0x435D,
}

impl TransactionType {
    pub const ALL: [TransactionType; 25] = [
        Self::MosaicDefinition,
        Self::MosaicSupplyChange,
        Self::RegisterNamespace,
        Self::AddressAlias,
        Self::MosaicAlias,
        Self::Transfer,
        Self::ModifyMultisigAccount,
        Self::AggregateComplete,
        Self::AggregateBonded,
        Self::Lock,
        Self::AccountPropertiesAddress,
        Self::AccountPropertiesMosaic,
        Self::AccountPropertiesEntityType,
        Self::SecretLock,
        Self::SecretProof,
        Self::AccountLink,
        Self::ModifyAddressMetadata,
        Self::ModifyMosaicMetadata,
        Self::ModifyNamespaceMetadata,
        Self::ModifyContract,
        Self::BlockchainUpgrade,
        Self::BlockchainConfig,
        Self::ExchangeOfferAdd,
        Self::ExchangeOffer,
        Self::ExchangeOfferRemove,
    ];

    /// The 16-bit type code written at offset 102.
    pub fn value(self) -> u16 {
        self as u16
    }

    pub fn from_u16(code: u16) -> Result<Self, TransactionError> {
        Self::ALL
            .into_iter()
            .find(|t| t.value() == code)
            .ok_or(TransactionError::UnknownTransactionType(code))
    }

    /// The schema version nodes currently expect for this kind.
    pub fn default_version(self) -> u8 {
        match self {
            Self::ExchangeOfferAdd => 4,
            Self::MosaicDefinition
            | Self::Transfer
            | Self::ModifyMultisigAccount
            | Self::AggregateComplete
            | Self::AggregateBonded
            | Self::ModifyContract => 3,
            Self::MosaicSupplyChange
            | Self::RegisterNamespace
            | Self::AccountLink
            | Self::ExchangeOffer
            | Self::ExchangeOfferRemove => 2,
            Self::AddressAlias
            | Self::MosaicAlias
            | Self::Lock
            | Self::AccountPropertiesAddress
            | Self::AccountPropertiesMosaic
            | Self::AccountPropertiesEntityType
            | Self::SecretLock
            | Self::SecretProof
            | Self::ModifyAddressMetadata
            | Self::ModifyMosaicMetadata
            | Self::ModifyNamespaceMetadata
            | Self::BlockchainUpgrade
            | Self::BlockchainConfig => 1,
        }
    }

    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MosaicDefinition => "MosaicDefinition",
            Self::MosaicSupplyChange => "MosaicSupplyChange",
            Self::RegisterNamespace => "RegisterNamespace",
            Self::AddressAlias => "AddressAlias",
            Self::MosaicAlias => "MosaicAlias",
            Self::Transfer => "Transfer",
            Self::ModifyMultisigAccount => "ModifyMultisigAccount",
            Self::AggregateComplete => "AggregateComplete",
            Self::AggregateBonded => "AggregateBonded",
            Self::Lock => "Lock",
            Self::AccountPropertiesAddress => "AccountPropertiesAddress",
            Self::AccountPropertiesMosaic => "AccountPropertiesMosaic",
            Self::AccountPropertiesEntityType => "AccountPropertiesEntityType",
            Self::SecretLock => "SecretLock",
            Self::SecretProof => "SecretProof",
            Self::AccountLink => "AccountLink",
            Self::ModifyAddressMetadata => "ModifyAddressMetadata",
            Self::ModifyMosaicMetadata => "ModifyMosaicMetadata",
            Self::ModifyNamespaceMetadata => "ModifyNamespaceMetadata",
            Self::ModifyContract => "ModifyContract",
            Self::BlockchainUpgrade => "BlockchainUpgrade",
            Self::BlockchainConfig => "BlockchainConfig",
            Self::ExchangeOfferAdd => "ExchangeOfferAdd",
            Self::ExchangeOffer => "ExchangeOffer",
            Self::ExchangeOfferRemove => "ExchangeOfferRemove",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// HashType
// ---------------------------------------------------------------------------

/// Hash algorithm binding a secret lock to its proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HashType {
    Sha3_256 = 0,
    Keccak256 = 1,
    /// RIPEMD-160 of SHA-256, zero-padded to 32 bytes.
    Hash160 = 2,
    /// SHA-256 applied twice.
    Hash256 = 3,
}

impl HashType {
    const SECRET_HEX_LENGTH: usize = 64;

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_u8(code: u8) -> Result<Self, TransactionError> {
        match code {
            0 => Ok(Self::Sha3_256),
            1 => Ok(Self::Keccak256),
            2 => Ok(Self::Hash160),
            3 => Ok(Self::Hash256),
            other => Err(TransactionError::UnknownHashType(other)),
        }
    }

    /// Whether `secret` has the form this algorithm's locks carry.
    ///
    /// Every algorithm takes 64 hex characters. A leading `-` is tolerated
    /// by the pattern nodes use, so it is tolerated here too; the length
    /// check still applies to the whole string.
    pub fn validate(self, secret: &str) -> bool {
        let digits = secret.strip_prefix('-').unwrap_or(secret);
        secret.len() == Self::SECRET_HEX_LENGTH
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Check `secret` and decode it to its 32 raw bytes.
    pub fn parse_secret(self, secret: &str) -> Result<[u8; 32], TransactionError> {
        let invalid = || TransactionError::InvalidSecretFormat { hash_type: self };
        if !self.validate(secret) {
            return Err(invalid());
        }
        let bytes = hex::decode(secret).map_err(|_| invalid())?;
        bytes.try_into().map_err(|_| invalid())
    }

    /// Derive the secret a proof unlocks. HASH_160's 20-byte digest is
    /// left-aligned and zero-padded to 32 bytes.
    pub fn hash(self, proof: &[u8]) -> [u8; 32] {
        match self {
            Self::Sha3_256 => sha3_256(proof),
            Self::Keccak256 => keccak_256(proof),
            Self::Hash256 => double_sha256(proof),
            Self::Hash160 => {
                let mut secret = [0u8; 32];
                secret[..20].copy_from_slice(&hash160(proof));
                secret
            }
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha3_256 => write!(f, "SHA3_256"),
            Self::Keccak256 => write!(f, "KECCAK_256"),
            Self::Hash160 => write!(f, "HASH_160"),
            Self::Hash256 => write!(f, "HASH_256"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
