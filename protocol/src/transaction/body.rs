//! The kind-specific half of a transaction.

use serde::{Deserialize, Serialize};

use super::aggregate::AggregateBody;
use super::kinds::{
    AccountLinkBody, AccountPropertiesBody, AliasBody, BlockchainConfigBody,
    BlockchainUpgradeBody, BodyEncoder, ExchangeOfferAddBody, ExchangeOfferBody,
    ExchangeOfferRemoveBody, LockFundsBody, ModifyContractBody, ModifyMetadataBody,
    ModifyMultisigBody, MosaicDefinitionBody, MosaicSupplyChangeBody, RegisterNamespaceBody,
    SecretLockBody, SecretProofBody, TransferBody,
};
use super::types::TransactionType;
use crate::codec::{CodecError, LayoutWriter, Schema};

/// Every body a transaction can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum TransactionBody {
    Transfer(TransferBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    RegisterNamespace(RegisterNamespaceBody),
    Alias(AliasBody),
    ModifyMultisig(ModifyMultisigBody),
    Aggregate(AggregateBody),
    LockFunds(LockFundsBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    AccountLink(AccountLinkBody),
    AccountProperties(AccountPropertiesBody),
    ModifyMetadata(ModifyMetadataBody),
    ModifyContract(ModifyContractBody),
    BlockchainConfig(BlockchainConfigBody),
    BlockchainUpgrade(BlockchainUpgradeBody),
    ExchangeOfferAdd(ExchangeOfferAddBody),
    ExchangeOffer(ExchangeOfferBody),
    ExchangeOfferRemove(ExchangeOfferRemoveBody),
}

macro_rules! dispatch {
    ($self:expr, $body:ident => $e:expr) => {
        match $self {
            TransactionBody::Transfer($body) => $e,
            TransactionBody::MosaicDefinition($body) => $e,
            TransactionBody::MosaicSupplyChange($body) => $e,
            TransactionBody::RegisterNamespace($body) => $e,
            TransactionBody::Alias($body) => $e,
            TransactionBody::ModifyMultisig($body) => $e,
            TransactionBody::Aggregate($body) => $e,
            TransactionBody::LockFunds($body) => $e,
            TransactionBody::SecretLock($body) => $e,
            TransactionBody::SecretProof($body) => $e,
            TransactionBody::AccountLink($body) => $e,
            TransactionBody::AccountProperties($body) => $e,
            TransactionBody::ModifyMetadata($body) => $e,
            TransactionBody::ModifyContract($body) => $e,
            TransactionBody::BlockchainConfig($body) => $e,
            TransactionBody::BlockchainUpgrade($body) => $e,
            TransactionBody::ExchangeOfferAdd($body) => $e,
            TransactionBody::ExchangeOffer($body) => $e,
            TransactionBody::ExchangeOfferRemove($body) => $e,
        }
    };
}

impl BodyEncoder for TransactionBody {
    fn transaction_type(&self) -> TransactionType {
        dispatch!(self, body => body.transaction_type())
    }

    fn schema(&self) -> &'static Schema {
        dispatch!(self, body => body.schema())
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        dispatch!(self, body => body.write_body(w))
    }
}

macro_rules! body_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for TransactionBody {
                fn from(body: $ty) -> Self {
                    Self::$variant(body)
                }
            }
        )*
    };
}

body_from!(
    Transfer(TransferBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    RegisterNamespace(RegisterNamespaceBody),
    Alias(AliasBody),
    ModifyMultisig(ModifyMultisigBody),
    Aggregate(AggregateBody),
    LockFunds(LockFundsBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    AccountLink(AccountLinkBody),
    AccountProperties(AccountPropertiesBody),
    ModifyMetadata(ModifyMetadataBody),
    ModifyContract(ModifyContractBody),
    BlockchainConfig(BlockchainConfigBody),
    BlockchainUpgrade(BlockchainUpgradeBody),
    ExchangeOfferAdd(ExchangeOfferAddBody),
    ExchangeOffer(ExchangeOfferBody),
    ExchangeOfferRemove(ExchangeOfferRemoveBody),
);
