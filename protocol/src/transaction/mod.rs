//! # Transaction Module
//!
//! Construction, signing, and aggregate composition for Catapult
//! transactions. Every kind shares one 120-byte header and differs only in
//! its body, so a [`Transaction`] is a [`TransactionHeader`] plus a
//! [`TransactionBody`].
//!
//! ## Architecture
//!
//! ```text
//! types.rs        TransactionType, HashType
//! header.rs       Deadline, version packing, the shared header fields
//! kinds/          one body encoder per transaction kind
//! body.rs         the TransactionBody sum over all kinds
//! builder.rs      Transaction and TransactionBuilder
//! signing.rs      signing and the transaction hash
//! embedded.rs     the aggregate-inner form
//! aggregate.rs    complete and bonded aggregates, cosignatory signing
//! cosignature.rs  cosigning an announced bonded aggregate
//! info.rs         chain-side info and lifecycle stage
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder::build`] wraps a body in a header.
//! 2. **Sign**: [`Transaction::sign`] yields a [`SignedTransaction`] with
//!    the uppercase-hex payload and hash.
//! 3. **Bundle** (optional): [`Transaction::to_embedded`] several
//!    transactions and wrap them with [`Transaction::aggregate_complete`] or
//!    [`Transaction::aggregate_bonded`].
//! 4. **Cosign**: either all at once with
//!    [`Transaction::sign_with_cosignatories`], or after announcement with
//!    [`CosignatureTransaction`].
//!
//! ## Wire Layout
//!
//! ```text
//! offset  size  field
//!      0     4  size
//!      4    64  signature
//!     68    32  signer
//!    100     2  version   (network << 8 | version, quirks included)
//!    102     2  type
//!    104     8  max_fee
//!    112     8  deadline  (ms since network epoch)
//!    120     …  body
//! ```
//!
//! Everything from offset 100 on is signed. The hash covers the R half of
//! the signature and everything from offset 68 on.

pub mod aggregate;
pub mod body;
pub mod builder;
pub mod cosignature;
pub mod embedded;
pub mod error;
pub mod header;
pub mod info;
pub mod kinds;
pub mod signing;
pub mod types;

pub use aggregate::{AggregateBody, AggregateCosignature, AggregateKind};
pub use body::TransactionBody;
pub use builder::{Transaction, TransactionBuilder};
pub use cosignature::{CosignatureSignedTransaction, CosignatureTransaction};
pub use embedded::EmbeddedTransaction;
pub use error::TransactionError;
pub use header::{pack_version, Deadline, DeadlineSource, FixedClock, SystemClock, TransactionHeader};
pub use info::{TransactionInfo, TransactionStage};
pub use kinds::{
    AccountLinkBody, AccountPropertiesBody, AddExchangeOffer, AliasBody, AliasTarget,
    BlockchainConfigBody, BlockchainUpgradeBody, BlockchainVersion, BodyEncoder,
    CosignatoryModification, ExchangeOffer, ExchangeOfferAddBody, ExchangeOfferBody,
    ExchangeOfferRemoveBody, ExchangeOfferType, LinkAction, LockFundsBody, Message,
    MessageType, MetadataModification, MetadataTarget, ModifyContractBody, ModifyMetadataBody,
    ModifyMultisigBody, MosaicDefinitionBody, MosaicProperties, MosaicSupplyChangeBody,
    MosaicSupplyType, PropertyModification, PropertyModifications, Recipient,
    RegisterNamespaceBody, RemoveExchangeOffer, SecretLockBody, SecretProofBody, TransferBody,
};
pub use signing::{transaction_hash, SignedTransaction};
pub use types::{HashType, TransactionType};
