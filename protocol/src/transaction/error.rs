//! Transaction-level errors.
//!
//! Everything that can go wrong while building, signing, or composing a
//! transaction ends up here. Lower layers keep their own error types and
//! convert through `#[from]`, so `?` works across module boundaries.

use thiserror::Error;

use super::types::{HashType, TransactionType};
use crate::account::AddressError;
use crate::codec::CodecError;
use crate::crypto::KeyError;
use crate::id::IdError;

/// Errors raised by the transaction layer.
///
/// All validation is local: no variant depends on chain state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Address(#[from] AddressError),

    /// The secret does not have the form `hash_type` expects.
    #[error("secret is not valid for {hash_type}: expected 64 hex characters")]
    InvalidSecretFormat { hash_type: HashType },

    /// Lock funds can only reference a signed bonded aggregate.
    #[error("lock funds requires a signed aggregate bonded transaction, got {0}")]
    UnsupportedSignedTransactionType(TransactionType),

    /// Cosignatory signing only applies to aggregates.
    #[error("{0} is not an aggregate transaction")]
    NotAnAggregate(TransactionType),

    /// Cosigning needs the hash of an announced aggregate.
    #[error("transaction info carries no hash; only announced aggregates can be cosigned")]
    MissingTransactionHash,

    /// A payload handed back in hex could not be decoded or is too short.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The type code does not name a known transaction kind.
    #[error("unknown transaction type 0x{0:04X}")]
    UnknownTransactionType(u16),

    /// A numeric code does not map to a known hash algorithm.
    #[error("unknown hash type {0}")]
    UnknownHashType(u8),
}

pub type Result<T> = std::result::Result<T, TransactionError>;
