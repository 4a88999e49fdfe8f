//! Locks: hash locks (lock funds) and secret locks with their proofs.
//!
//! A hash lock deposits funds as a spam guard for a bonded aggregate; it
//! must be confirmed before the aggregate it names is announced. A secret
//! lock holds funds until someone reveals a proof whose hash equals the
//! lock's secret.

use serde::{Deserialize, Serialize};

use super::{short_count, BodyEncoder, Recipient};
use crate::account::Address;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::config::HASH_LENGTH;
use crate::id::Mosaic;
use crate::transaction::error::TransactionError;
use crate::transaction::signing::SignedTransaction;
use crate::transaction::types::{HashType, TransactionType};

const LOCK_FIELDS: &[Field] = &[
    Field::vector("mosaic_id", 4),
    Field::vector("mosaic_amount", 4),
    Field::vector("duration", 4),
    Field::vector("hash", 1),
];

const SECRET_LOCK_FIELDS: &[Field] = &[
    Field::vector("mosaic_id", 4),
    Field::vector("mosaic_amount", 4),
    Field::vector("duration", 4),
    Field::scalar("hash_algorithm", 1),
    Field::vector("secret", 1),
    Field::vector("recipient", 1),
];

const SECRET_PROOF_FIELDS: &[Field] = &[
    Field::scalar("hash_algorithm", 1),
    Field::vector("secret", 1),
    Field::vector("recipient", 1),
    Field::scalar("proof_size", 2),
    Field::vector("proof", 1),
];

pub static LOCK_FUNDS_SCHEMA: Schema = Schema::transaction("lock_funds", LOCK_FIELDS);

pub static SECRET_LOCK_SCHEMA: Schema = Schema::transaction("secret_lock", SECRET_LOCK_FIELDS);

pub static SECRET_PROOF_SCHEMA: Schema = Schema::transaction("secret_proof", SECRET_PROOF_FIELDS);

// ---------------------------------------------------------------------------
// LockFunds
// ---------------------------------------------------------------------------

/// A hash lock guarding one bonded aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFundsBody {
    pub mosaic: Mosaic,
    /// Blocks the lock stays open.
    pub duration: u64,
    /// Hash of the signed bonded aggregate.
    pub hash: [u8; HASH_LENGTH],
}

impl LockFundsBody {
    /// Lock `mosaic` for `duration` blocks against `signed`.
    ///
    /// Only a signed [`TransactionType::AggregateBonded`] can be locked.
    pub fn new(
        mosaic: Mosaic,
        duration: u64,
        signed: &SignedTransaction,
    ) -> Result<Self, TransactionError> {
        if signed.transaction_type != TransactionType::AggregateBonded {
            return Err(TransactionError::UnsupportedSignedTransactionType(
                signed.transaction_type,
            ));
        }
        Ok(Self {
            mosaic,
            duration,
            hash: signed.hash_bytes()?,
        })
    }
}

impl BodyEncoder for LockFundsBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::Lock
    }

    fn schema(&self) -> &'static Schema {
        &LOCK_FUNDS_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u64("mosaic_id", self.mosaic.id.to_u64())?;
        w.write_u64("mosaic_amount", self.mosaic.amount)?;
        w.write_u64("duration", self.duration)?;
        w.write_vector("hash", &self.hash)
    }
}

// ---------------------------------------------------------------------------
// SecretLock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretLockBody {
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash_type: HashType,
    pub secret: [u8; HASH_LENGTH],
    pub recipient: Address,
}

impl SecretLockBody {
    /// Fails with [`TransactionError::InvalidSecretFormat`] unless `secret`
    /// is 64 hex characters.
    pub fn new(
        mosaic: Mosaic,
        duration: u64,
        hash_type: HashType,
        secret: &str,
        recipient: Address,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            mosaic,
            duration,
            hash_type,
            secret: hash_type.parse_secret(secret)?,
            recipient,
        })
    }
}

impl BodyEncoder for SecretLockBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::SecretLock
    }

    fn schema(&self) -> &'static Schema {
        &SECRET_LOCK_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u64("mosaic_id", self.mosaic.id.to_u64())?;
        w.write_u64("mosaic_amount", self.mosaic.amount)?;
        w.write_u64("duration", self.duration)?;
        w.write_u8("hash_algorithm", self.hash_type.value())?;
        w.write_vector("secret", &self.secret)?;
        w.write_vector("recipient", &self.recipient.to_bytes())
    }
}

// ---------------------------------------------------------------------------
// SecretProof
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretProofBody {
    pub hash_type: HashType,
    pub secret: [u8; HASH_LENGTH],
    pub recipient: Recipient,
    pub proof: Vec<u8>,
}

impl SecretProofBody {
    /// `secret` is validated like a lock's; `proof` is the raw preimage.
    pub fn new(
        hash_type: HashType,
        secret: &str,
        recipient: impl Into<Recipient>,
        proof: Vec<u8>,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            hash_type,
            secret: hash_type.parse_secret(secret)?,
            recipient: recipient.into(),
            proof,
        })
    }
}

impl BodyEncoder for SecretProofBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::SecretProof
    }

    fn schema(&self) -> &'static Schema {
        &SECRET_PROOF_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u8("hash_algorithm", self.hash_type.value())?;
        w.write_vector("secret", &self.secret)?;
        w.write_vector("recipient", &self.recipient.to_bytes())?;
        w.write_u16("proof_size", short_count("proof_size", self.proof.len())?)?;
        w.write_vector("proof", &self.proof)
    }
}
