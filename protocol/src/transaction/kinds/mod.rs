//! # Per-kind encoders
//!
//! One file per family of transaction kinds. Each kind is a plain struct
//! holding its body fields, a static [`Schema`] describing the wire order
//! of those fields, and a [`BodyEncoder`] impl that writes them through a
//! [`LayoutWriter`].
//!
//! Encoders never compute offsets or concatenate bytes themselves. They
//! write named fields in whatever order is convenient and leave the wire
//! order to the schema.

pub mod account;
pub mod blockchain;
pub mod contract;
pub mod exchange;
pub mod metadata;
pub mod mosaic;
pub mod multisig;
pub mod namespace;
pub mod secret;
pub mod transfer;

pub use account::{
    AccountLinkBody, AccountPropertiesBody, PropertyModification, PropertyModificationType,
    PropertyModifications,
};
pub use blockchain::{BlockchainConfigBody, BlockchainUpgradeBody, BlockchainVersion};
pub use contract::ModifyContractBody;
pub use exchange::{
    AddExchangeOffer, ExchangeOffer, ExchangeOfferAddBody, ExchangeOfferBody,
    ExchangeOfferRemoveBody, ExchangeOfferType, RemoveExchangeOffer,
};
pub use metadata::{MetadataModification, MetadataModificationType, MetadataTarget, ModifyMetadataBody};
pub use mosaic::{MosaicDefinitionBody, MosaicProperties, MosaicSupplyChangeBody, MosaicSupplyType};
pub use multisig::{CosignatoryModification, ModifyMultisigBody, MultisigModificationType};
pub use namespace::{AliasBody, AliasTarget, NamespaceRegistration, RegisterNamespaceBody};
pub use secret::{LockFundsBody, SecretLockBody, SecretProofBody};
pub use transfer::{Message, MessageType, Recipient, TransferBody};

use serde::{Deserialize, Serialize};

use super::types::TransactionType;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};

/// Shared by every kind: the id and amount of a mosaic as two 8-byte
/// vectors.
pub(crate) const MOSAIC_FIELDS: &[Field] = &[Field::vector("id", 4), Field::vector("amount", 4)];

/// A transaction body that knows its type code, its wire layout, and how
/// to fill it.
pub trait BodyEncoder {
    fn transaction_type(&self) -> TransactionType;

    /// Header plus body layout.
    fn schema(&self) -> &'static Schema;

    /// Write the body fields. Header fields are written by the caller.
    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError>;
}

/// Link or unlink; used by aliases and account links alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LinkAction {
    Link = 0,
    Unlink = 1,
}

impl LinkAction {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// A count or length that the wire stores in a single byte.
pub(crate) fn byte_count(field: &'static str, n: usize) -> Result<u8, CodecError> {
    u8::try_from(n).map_err(|_| CodecError::out_of_range(field, u8::MAX.into(), n))
}

/// A count or length that the wire stores in two bytes.
pub(crate) fn short_count(field: &'static str, n: usize) -> Result<u16, CodecError> {
    u16::try_from(n).map_err(|_| CodecError::out_of_range(field, u16::MAX.into(), n))
}

/// Encode just the body of `kind`, without a header.
#[cfg(test)]
pub(crate) fn body_bytes<K: BodyEncoder>(kind: &K) -> Vec<u8> {
    let schema = kind.schema();
    let bare = Schema::bare(schema.name, schema.fields);
    crate::codec::encode(&bare, |b| kind.write_body(b)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_count_limits() {
        assert_eq!(byte_count("n", 255).unwrap(), 255);
        assert_eq!(
            byte_count("n", 256),
            Err(CodecError::ValueOutOfRange {
                field: "n",
                max: 255,
                actual: 256
            })
        );
        assert!(short_count("n", 65_536).is_err());
    }
}
