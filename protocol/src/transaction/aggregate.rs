//! Aggregate transactions and cosignatory signing.
//!
//! An aggregate bundles embedded inner transactions, each acting for its
//! own signer, into one atomic unit. Its body is:
//!
//! ```text
//! transactions_size  u32   byte length of the block below
//! transactions       …     embedded inner transactions, caller order
//! ```
//!
//! A complete aggregate carries every required signature when announced.
//! A bonded aggregate is announced with only the initiator's signature and
//! collects the rest on chain; it must be preceded by a lock funds
//! transaction referencing its hash.
//!
//! Cosignatures are not part of the signed or hashed bytes. Each cosigner
//! signs the aggregate hash, and the pairs are appended after the body.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::Transaction;
use super::embedded::EmbeddedTransaction;
use super::body::TransactionBody;
use super::error::TransactionError;
use super::header::{Deadline, TransactionHeader};
use super::kinds::BodyEncoder;
use super::signing::SignedTransaction;
use super::types::TransactionType;
use crate::account::{Account, NetworkType, PublicAccount};
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::config::COSIGNATURE_SIZE;
use crate::crypto::Signature;

const AGGREGATE_FIELDS: &[Field] = &[
    Field::scalar("transactions_size", 4),
    Field::vector("transactions", 1),
];

pub static AGGREGATE_SCHEMA: Schema = Schema::transaction("aggregate", AGGREGATE_FIELDS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Complete,
    Bonded,
}

/// A cosigner's signature over an aggregate hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCosignature {
    pub signature: Signature,
    pub signer: PublicAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBody {
    pub kind: AggregateKind,
    pub inner_transactions: Vec<EmbeddedTransaction>,
    /// Cosignatures already attached on chain. Never encoded by
    /// [`Transaction::generate_bytes`].
    #[serde(default)]
    pub cosignatures: Vec<AggregateCosignature>,
}

impl AggregateBody {
    pub fn new(kind: AggregateKind, inner_transactions: Vec<EmbeddedTransaction>) -> Self {
        Self {
            kind,
            inner_transactions,
            cosignatures: Vec::new(),
        }
    }

    pub fn complete(inner_transactions: Vec<EmbeddedTransaction>) -> Self {
        Self::new(AggregateKind::Complete, inner_transactions)
    }

    pub fn bonded(inner_transactions: Vec<EmbeddedTransaction>) -> Self {
        Self::new(AggregateKind::Bonded, inner_transactions)
    }

    pub fn with_cosignatures(mut self, cosignatures: Vec<AggregateCosignature>) -> Self {
        self.cosignatures = cosignatures;
        self
    }

    /// True if `account` is among the attached cosigners.
    pub fn is_signed_by(&self, account: &PublicAccount) -> bool {
        self.cosignatures
            .iter()
            .any(|c| c.signer.public_key == account.public_key)
    }

    fn inner_bytes(&self) -> Vec<u8> {
        self.inner_transactions
            .iter()
            .flat_map(|tx| tx.bytes.iter().copied())
            .collect()
    }
}

impl BodyEncoder for AggregateBody {
    fn transaction_type(&self) -> TransactionType {
        match self.kind {
            AggregateKind::Complete => TransactionType::AggregateComplete,
            AggregateKind::Bonded => TransactionType::AggregateBonded,
        }
    }

    fn schema(&self) -> &'static Schema {
        &AGGREGATE_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        let inner = self.inner_bytes();
        let size = u32::try_from(inner.len())
            .map_err(|_| CodecError::out_of_range("transactions_size", u32::MAX.into(), inner.len()))?;
        w.write_u32("transactions_size", size)?;
        w.write_vector("transactions", &inner)
    }
}

impl Transaction {
    /// An aggregate complete around `inner`, zero fee.
    pub fn aggregate_complete(
        deadline: Deadline,
        inner: Vec<EmbeddedTransaction>,
        network: NetworkType,
    ) -> Self {
        Self::aggregate(AggregateBody::complete(inner), deadline, network)
    }

    /// An aggregate bonded around `inner`, zero fee.
    pub fn aggregate_bonded(
        deadline: Deadline,
        inner: Vec<EmbeddedTransaction>,
        network: NetworkType,
    ) -> Self {
        Self::aggregate(AggregateBody::bonded(inner), deadline, network)
    }

    fn aggregate(body: AggregateBody, deadline: Deadline, network: NetworkType) -> Self {
        let version = body.transaction_type().default_version();
        Self::new(TransactionHeader::new(network, version, deadline, 0), body)
    }

    /// True if `account` is the initiator or, for an aggregate, one of its
    /// attached cosigners.
    pub fn is_signed_by(&self, account: &PublicAccount) -> bool {
        if self
            .signer()
            .is_some_and(|signer| signer.public_key == account.public_key)
        {
            return true;
        }
        match self.body() {
            TransactionBody::Aggregate(body) => body.is_signed_by(account),
            _ => false,
        }
    }

    /// Sign as `initiator`, then have each of `cosigners` sign the
    /// resulting hash.
    ///
    /// The returned hash is the initiator-signed aggregate's. Cosignature
    /// pairs follow the body and the size field covers them.
    pub fn sign_with_cosignatories(
        &self,
        initiator: &Account,
        cosigners: &[Account],
    ) -> Result<SignedTransaction, TransactionError> {
        let transaction_type = self.transaction_type();
        if !transaction_type.is_aggregate() {
            return Err(TransactionError::NotAnAggregate(transaction_type));
        }

        let signed = self.sign(initiator)?;
        let hash = signed.hash_bytes()?;
        let mut payload = signed.payload_bytes()?;
        payload.reserve(cosigners.len() * COSIGNATURE_SIZE);
        for cosigner in cosigners {
            let signature = cosigner.sign(&hash);
            payload.extend_from_slice(cosigner.public_key().as_bytes());
            payload.extend_from_slice(signature.as_bytes());
        }

        let size = u32::try_from(payload.len())
            .map_err(|_| CodecError::out_of_range("size", u32::MAX.into(), payload.len()))?;
        payload[..4].copy_from_slice(&size.to_le_bytes());

        debug!(
            transaction_type = %transaction_type,
            cosigners = cosigners.len(),
            size = payload.len(),
            hash = %signed.hash,
            "cosigned aggregate"
        );

        Ok(SignedTransaction {
            payload: hex::encode_upper(&payload),
            ..signed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Address;
    use crate::config::HEADER_SIZE;
    use crate::crypto::KeyPair;
    use crate::id::{Mosaic, MosaicId};
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::kinds::{Message, TransferBody};
    use crate::transaction::signing::transaction_hash;

    fn account(seed: u8) -> Account {
        Account::new(KeyPair::from_seed(&[seed; 32]), NetworkType::MijinTest)
    }

    fn inner(amount: u64) -> EmbeddedTransaction {
        TransactionBuilder::new(NetworkType::MijinTest)
            .deadline(Deadline::new(1))
            .build(TransferBody::new(
                Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap(),
                vec![Mosaic::new(MosaicId::new(95442763262823), amount)],
                Message::plain("hi"),
            ))
            .unwrap()
            .to_embedded(&account(1).public_account())
            .unwrap()
    }

    #[test]
    fn test_body_concatenates_inner_in_order() {
        let (a, b) = (inner(1), inner(2));
        let tx = Transaction::aggregate_complete(
            Deadline::new(1),
            vec![a.clone(), b.clone()],
            NetworkType::MijinTest,
        );
        let bytes = tx.generate_bytes().unwrap();
        let block_len = a.size() + b.size();

        assert_eq!(tx.transaction_type(), TransactionType::AggregateComplete);
        assert_eq!(bytes.len(), HEADER_SIZE + 4 + block_len);
        assert_eq!(&bytes[120..124], &(block_len as u32).to_le_bytes());
        assert_eq!(&bytes[124..124 + a.size()], &a.bytes[..]);
        assert_eq!(&bytes[124 + a.size()..], &b.bytes[..]);
        assert_eq!(&bytes[100..102], &[0x03, 0x90]);
        assert_eq!(&bytes[102..104], &[0x41, 0x41]);
    }

    #[test]
    fn test_bonded_type_code() {
        let tx = Transaction::aggregate_bonded(Deadline::new(1), vec![inner(1)], NetworkType::MijinTest);
        let bytes = tx.generate_bytes().unwrap();
        assert_eq!(&bytes[102..104], &[0x41, 0x42]);
    }

    #[test]
    fn test_cosigners_sign_aggregate_hash() {
        let tx = Transaction::aggregate_complete(Deadline::new(1), vec![inner(1)], NetworkType::MijinTest);
        let initiator = account(1);
        let cosigners = [account(2), account(3)];

        let plain = tx.sign(&initiator).unwrap();
        let cosigned = tx.sign_with_cosignatories(&initiator, &cosigners).unwrap();
        let payload = cosigned.payload_bytes().unwrap();
        let base_len = plain.payload_bytes().unwrap().len();

        assert_eq!(cosigned.hash, plain.hash);
        assert_eq!(payload.len(), base_len + 2 * 96);
        assert_eq!(&payload[..4], &(payload.len() as u32).to_le_bytes());
        assert_eq!(&payload[4..base_len], &plain.payload_bytes().unwrap()[4..]);

        let hash = plain.hash_bytes().unwrap();
        for (i, cosigner) in cosigners.iter().enumerate() {
            let pair = &payload[base_len + i * 96..base_len + (i + 1) * 96];
            assert_eq!(&pair[..32], cosigner.public_key().as_bytes());
            let signature = Signature::from_bytes(pair[32..].try_into().unwrap());
            assert!(cosigner.public_account().verify(&hash, &signature));
        }
    }

    #[test]
    fn test_cosignatures_outside_hash_scope() {
        let tx = Transaction::aggregate_bonded(Deadline::new(1), vec![inner(1)], NetworkType::MijinTest);
        let cosigned = tx.sign_with_cosignatories(&account(1), &[account(2)]).unwrap();
        let mut payload = cosigned.payload_bytes().unwrap();
        let cut = payload.len() - 96;
        payload.truncate(cut);
        assert_eq!(
            hex::encode_upper(transaction_hash(&payload).unwrap()),
            cosigned.hash
        );
    }

    #[test]
    fn test_no_cosigners_matches_plain_signing() {
        let tx = Transaction::aggregate_complete(Deadline::new(1), vec![inner(1)], NetworkType::MijinTest);
        assert_eq!(
            tx.sign_with_cosignatories(&account(1), &[]).unwrap(),
            tx.sign(&account(1)).unwrap()
        );
    }

    #[test]
    fn test_cosigning_non_aggregate_rejected() {
        let tx = TransactionBuilder::new(NetworkType::MijinTest)
            .deadline(Deadline::new(1))
            .build(TransferBody::new(
                Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap(),
                vec![],
                Message::empty(),
            ))
            .unwrap();
        assert_eq!(
            tx.sign_with_cosignatories(&account(1), &[account(2)]),
            Err(TransactionError::NotAnAggregate(TransactionType::Transfer))
        );
    }

    #[test]
    fn test_is_signed_by() {
        let cosigner = account(2).public_account();
        let body = AggregateBody::bonded(vec![inner(1)]).with_cosignatures(vec![AggregateCosignature {
            signature: Signature::from_bytes([0; 64]),
            signer: cosigner,
        }]);
        assert!(body.is_signed_by(&cosigner));
        assert!(!body.is_signed_by(&account(3).public_account()));
    }

    #[test]
    fn test_signer_set_includes_initiator() {
        let initiator = account(1).public_account();
        let cosigner = account(2).public_account();
        let stranger = account(3).public_account();
        let body = AggregateBody::bonded(vec![inner(1)]).with_cosignatures(vec![AggregateCosignature {
            signature: Signature::from_bytes([0; 64]),
            signer: cosigner,
        }]);
        let tx = Transaction::aggregate(body, Deadline::new(1), NetworkType::MijinTest)
            .with_signature(initiator, Signature::from_bytes([1; 64]));

        assert!(tx.is_signed_by(&initiator));
        assert!(tx.is_signed_by(&cosigner));
        assert!(!tx.is_signed_by(&stranger));

        let unsigned = Transaction::aggregate_complete(Deadline::new(1), vec![inner(1)], NetworkType::MijinTest);
        assert!(!unsigned.is_signed_by(&initiator));
    }

    #[test]
    fn test_serde_round_trip() {
        let tx = Transaction::aggregate_bonded(Deadline::new(1), vec![inner(1)], NetworkType::MijinTest);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["body"]["body"], "aggregate");
        assert_eq!(json["body"]["kind"], "bonded");
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn test_empty_aggregate() {
        let tx = Transaction::aggregate_complete(Deadline::new(1), vec![], NetworkType::MijinTest);
        let bytes = tx.generate_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 4);
        assert_eq!(&bytes[120..], &[0, 0, 0, 0]);
    }
}
