//! Transaction construction via the builder pattern.
//!
//! A [`Transaction`] is a shared [`TransactionHeader`] plus one
//! [`TransactionBody`]. It is a plain value: building one touches no key
//! material, signing happens in [`super::signing`], and embedding into an
//! aggregate in [`super::embedded`]. Each of those produces a new value and
//! leaves the source transaction untouched.
//!
//! [`TransactionBuilder`] holds the settings most transactions share
//! (network, deadline policy, fee policy) so callers do not repeat them for
//! every body they build.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::body::TransactionBody;
use super::error::TransactionError;
use super::header::{Deadline, DeadlineSource, SystemClock, TransactionHeader};
use super::info::{TransactionInfo, TransactionStage};
use super::kinds::BodyEncoder;
use super::types::TransactionType;
use crate::account::{NetworkType, PublicAccount};
use crate::codec::{self, CodecError, LayoutWriter};
use crate::config::{EngineConfig, DEFAULT_DEADLINE, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::Signature;
use crate::fee::{FeeCalculator, ZeroFee};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction: shared header fields plus a kind-specific body.
///
/// A locally built transaction has no signer, signature, or info. One
/// reconstructed from a node's response can carry all three; the info's
/// shape then tells its lifecycle stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    header: TransactionHeader,
    body: TransactionBody,
    signer: Option<PublicAccount>,
    signature: Option<Signature>,
    info: Option<TransactionInfo>,
}

impl Transaction {
    pub fn new(header: TransactionHeader, body: impl Into<TransactionBody>) -> Self {
        Self {
            header,
            body: body.into(),
            signer: None,
            signature: None,
            info: None,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    pub fn network(&self) -> NetworkType {
        self.header.network
    }

    pub fn version(&self) -> u8 {
        self.header.version
    }

    pub fn deadline(&self) -> Deadline {
        self.header.deadline
    }

    pub fn max_fee(&self) -> u64 {
        self.header.max_fee
    }

    pub fn header(&self) -> &TransactionHeader {
        &self.header
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    pub fn signer(&self) -> Option<&PublicAccount> {
        self.signer.as_ref()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn info(&self) -> Option<&TransactionInfo> {
        self.info.as_ref()
    }

    /// Attach what a node reported about this transaction.
    pub fn with_info(mut self, info: TransactionInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Record who signed this transaction and how, as reported by a node.
    pub fn with_signature(mut self, signer: PublicAccount, signature: Signature) -> Self {
        self.signer = Some(signer);
        self.signature = Some(signature);
        self
    }

    /// Same transaction with a different max fee.
    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.header.max_fee = max_fee;
        self
    }

    pub fn stage(&self) -> TransactionStage {
        TransactionStage::of(self.info.as_ref())
    }

    pub fn is_unannounced(&self) -> bool {
        self.stage() == TransactionStage::Unannounced
    }

    pub fn is_unconfirmed(&self) -> bool {
        self.stage() == TransactionStage::Unconfirmed
    }

    pub fn is_missing_signatures(&self) -> bool {
        self.stage() == TransactionStage::MissingSignatures
    }

    pub fn is_confirmed(&self) -> bool {
        self.stage() == TransactionStage::Confirmed
    }

    /// The unsigned canonical bytes: full header with a zero signature and
    /// a zero signer, followed by the body in wire order.
    pub fn generate_bytes(&self) -> Result<Vec<u8>, CodecError> {
        // The size field is fixed-width, so the first pass already has the
        // final length.
        let draft = self.encode_with_size(0)?;
        let size = u32::try_from(draft.len())
            .map_err(|_| CodecError::out_of_range("size", u32::MAX.into(), draft.len()))?;
        self.encode_with_size(size)
    }

    /// Length of [`Transaction::generate_bytes`].
    pub fn size(&self) -> Result<usize, CodecError> {
        Ok(self.encode_with_size(0)?.len())
    }

    fn encode_with_size(&self, size: u32) -> Result<Vec<u8>, CodecError> {
        codec::encode(self.body.schema(), |b| {
            b.write_u32("size", size)?;
            b.write_vector("signature", &[0u8; SIGNATURE_LENGTH])?;
            b.write_vector("signer", &[0u8; PUBLIC_KEY_LENGTH])?;
            b.write_u16("version", self.header.packed_version())?;
            b.write_u16("type", self.transaction_type().value())?;
            b.write_u64("max_fee", self.header.max_fee)?;
            b.write_u64("deadline", self.header.deadline.instant())?;
            self.body.write_body(b)
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Shared settings for building transactions.
///
/// # Usage
///
/// ```rust
/// use catapult_protocol::account::{Address, NetworkType};
/// use catapult_protocol::id::{Mosaic, MosaicId};
/// use catapult_protocol::transaction::{Deadline, Message, TransactionBuilder, TransferBody};
///
/// let recipient = Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap();
/// let tx = TransactionBuilder::new(NetworkType::MijinTest)
///     .deadline(Deadline::new(1))
///     .build(TransferBody::new(
///         recipient,
///         vec![Mosaic::new(MosaicId::new(95442763262823), 100)],
///         Message::empty(),
///     ))
///     .unwrap();
/// assert_eq!(tx.generate_bytes().unwrap().len(), 165);
/// ```
///
/// Defaults: two-hour deadline from the system clock, zero fee, and the
/// current schema version of each kind. A fixed `max_fee` wins over a fee
/// calculator; a fixed deadline wins over the clock.
pub struct TransactionBuilder {
    network: NetworkType,
    deadline: Option<Deadline>,
    deadline_offset: Duration,
    clock: Box<dyn DeadlineSource>,
    max_fee: Option<u64>,
    fee_calculator: Box<dyn FeeCalculator>,
    version: Option<u8>,
}

impl TransactionBuilder {
    pub fn new(network: NetworkType) -> Self {
        Self {
            network,
            deadline: None,
            deadline_offset: DEFAULT_DEADLINE,
            clock: Box::new(SystemClock),
            max_fee: None,
            fee_calculator: Box::new(ZeroFee),
            version: None,
        }
    }

    /// Network, deadline offset, and fee strategy from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            deadline_offset: config.deadline(),
            fee_calculator: config.fee_calculator(),
            ..Self::new(config.network)
        }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Use this exact deadline.
    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline `offset` after the clock's "now".
    pub fn deadline_in(mut self, offset: Duration) -> Self {
        self.deadline = None;
        self.deadline_offset = offset;
        self
    }

    pub fn clock(mut self, clock: impl DeadlineSource + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Announce exactly this max fee.
    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    /// Derive the max fee from the payload size.
    pub fn fee_calculator(mut self, calculator: impl FeeCalculator + 'static) -> Self {
        self.max_fee = None;
        self.fee_calculator = Box::new(calculator);
        self
    }

    /// Override the schema version. Only useful against nodes that still
    /// expect an older layout.
    pub fn version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }

    /// The deadline the next built transaction gets.
    pub fn next_deadline(&self) -> Deadline {
        self.deadline
            .unwrap_or_else(|| self.clock.now_plus(self.deadline_offset))
    }

    /// Build an unsigned transaction around `body`.
    pub fn build(&self, body: impl Into<TransactionBody>) -> Result<Transaction, TransactionError> {
        let body = body.into();
        let version = self
            .version
            .unwrap_or_else(|| body.transaction_type().default_version());
        let header = TransactionHeader::new(self.network, version, self.next_deadline(), 0);
        let tx = Transaction::new(header, body);
        let max_fee = match self.max_fee {
            Some(fee) => fee,
            None => self.fee_calculator.calculate(tx.size()?),
        };
        Ok(tx.with_max_fee(max_fee))
    }
}

impl std::fmt::Debug for TransactionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionBuilder")
            .field("network", &self.network)
            .field("deadline", &self.deadline)
            .field("deadline_offset", &self.deadline_offset)
            .field("max_fee", &self.max_fee)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
