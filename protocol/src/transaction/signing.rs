//! Transaction signing.
//!
//! Signing is a separate step from building because the key may not be at
//! hand when the transaction is assembled. The procedure:
//!
//! 1. Take the unsigned bytes from [`Transaction::generate_bytes`].
//! 2. Sign everything from offset 100 on: version, type, fee, deadline and
//!    body. Size, signature and signer are outside the signing scope.
//! 3. Splice the signature and the signer's public key into the header.
//! 4. Hash `signature.R ‖ payload[68..]` with SHA3-256. Neither the size
//!    field nor the second half of the signature takes part.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::Transaction;
use super::error::TransactionError;
use super::types::TransactionType;
use crate::account::{Account, NetworkType};
use crate::config::{HASH_LENGTH, SIGNATURE_OFFSET, SIGNER_OFFSET, SIGNING_SCOPE_OFFSET};
use crate::crypto::{sha3_256_parts, PublicKey};

/// A signed transaction, ready to announce.
///
/// Payload and hash are uppercase hex, the form nodes accept and return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub payload: String,
    pub hash: String,
    pub transaction_type: TransactionType,
    pub signer: PublicKey,
    pub network: NetworkType,
}

impl SignedTransaction {
    pub fn payload_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        hex::decode(&self.payload).map_err(|e| TransactionError::InvalidPayload(e.to_string()))
    }

    pub fn hash_bytes(&self) -> Result<[u8; HASH_LENGTH], TransactionError> {
        let bytes =
            hex::decode(&self.hash).map_err(|e| TransactionError::InvalidPayload(e.to_string()))?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| TransactionError::InvalidPayload(format!("hash is {} bytes", v.len())))
    }
}

/// The hash nodes identify a signed payload by.
///
/// `SHA3-256(payload[4..36] ‖ payload[68..])`: the R half of the signature
/// followed by signer, version, type, fee, deadline and body.
pub fn transaction_hash(payload: &[u8]) -> Result<[u8; HASH_LENGTH], TransactionError> {
    if payload.len() < SIGNING_SCOPE_OFFSET {
        return Err(TransactionError::InvalidPayload(format!(
            "payload is {} bytes, header alone needs {}",
            payload.len(),
            SIGNING_SCOPE_OFFSET
        )));
    }
    let r = &payload[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 32];
    Ok(sha3_256_parts(&[r, &payload[SIGNER_OFFSET..]]))
}

impl Transaction {
    /// Sign with `account` and produce the announceable form.
    ///
    /// The transaction itself is not modified.
    pub fn sign(&self, account: &Account) -> Result<SignedTransaction, TransactionError> {
        let unsigned = self.generate_bytes()?;
        let scope = &unsigned[SIGNING_SCOPE_OFFSET..];
        let signature = account.sign(scope);
        let signer = account.public_key();

        let mut payload = Vec::with_capacity(unsigned.len());
        payload.extend_from_slice(&unsigned[..SIGNATURE_OFFSET]);
        payload.extend_from_slice(signature.as_bytes());
        payload.extend_from_slice(signer.as_bytes());
        payload.extend_from_slice(scope);

        let hash = transaction_hash(&payload)?;
        debug!(
            transaction_type = %self.transaction_type(),
            signer = %signer.to_hex(),
            size = payload.len(),
            hash = %hex::encode_upper(hash),
            "signed transaction"
        );

        Ok(SignedTransaction {
            payload: hex::encode_upper(&payload),
            hash: hex::encode_upper(hash),
            transaction_type: self.transaction_type(),
            signer,
            network: self.network(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Address;
    use crate::crypto::Signature;
    use crate::id::{Mosaic, MosaicId};
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::header::Deadline;
    use crate::transaction::kinds::{Message, TransferBody};

    const PRIVATE_KEY: &str = "787225AAFF3D2C71F4FFA32D4F19EC4922F3CD869747F267378F81F8E3FCB12D";
    const PAYLOAD: &str = "A5000000773891AD01DD4CDF6E3A55C186C673E256D7DF9D471846F1943CC3529E4E02B38B9AF3F8D13784645FF5FAAFA94A321B94933C673D12DE60E4BC05ABA56F750E1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755039054410000000000000000010000000000000090E8FEBD671DD41BEE94EC3BA5831CB608A312C2F203BA84AC01000100672B0000CE5600006400000000000000";
    const HASH: &str = "350AE56BC97DB805E2098AB2C596FA4C6B37EF974BF24DFD61CD9F77C7687424";

    fn account() -> Account {
        Account::from_private_key_hex(PRIVATE_KEY, NetworkType::MijinTest).unwrap()
    }

    fn transfer(max_fee: u64, deadline: u64) -> Transaction {
        TransactionBuilder::new(NetworkType::MijinTest)
            .deadline(Deadline::new(deadline))
            .max_fee(max_fee)
            .build(TransferBody::new(
                Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap(),
                vec![Mosaic::new(MosaicId::new(95442763262823), 100)],
                Message::empty(),
            ))
            .unwrap()
    }

    #[test]
    fn test_reference_vector() {
        let signed = transfer(0, 1).sign(&account()).unwrap();
        assert_eq!(signed.payload, PAYLOAD);
        assert_eq!(signed.hash, HASH);
        assert_eq!(signed.transaction_type, TransactionType::Transfer);
        assert_eq!(signed.signer, account().public_key());
        assert_eq!(signed.network, NetworkType::MijinTest);
    }

    #[test]
    fn test_signature_verifies_over_signing_scope() {
        let signed = transfer(0, 1).sign(&account()).unwrap();
        let payload = signed.payload_bytes().unwrap();
        let signature = Signature::from_bytes(payload[4..68].try_into().unwrap());
        assert!(account()
            .public_account()
            .verify(&payload[SIGNING_SCOPE_OFFSET..], &signature));
    }

    #[test]
    fn test_fee_and_deadline_are_signed() {
        let base = transfer(0, 1).sign(&account()).unwrap();
        let fee = transfer(1, 1).sign(&account()).unwrap();
        let deadline = transfer(0, 2).sign(&account()).unwrap();
        assert_ne!(base.payload[8..136], fee.payload[8..136]);
        assert_ne!(base.hash, fee.hash);
        assert_ne!(base.payload[8..136], deadline.payload[8..136]);
        assert_ne!(base.hash, deadline.hash);
    }

    #[test]
    fn test_size_field_outside_hash_scope() {
        let mut payload = hex::decode(PAYLOAD).unwrap();
        payload[0] ^= 0xFF;
        assert_eq!(hex::encode_upper(transaction_hash(&payload).unwrap()), HASH);
    }

    #[test]
    fn test_signature_s_half_outside_hash_scope() {
        let mut payload = hex::decode(PAYLOAD).unwrap();
        payload[40] ^= 0xFF;
        assert_eq!(hex::encode_upper(transaction_hash(&payload).unwrap()), HASH);
        payload[5] ^= 0xFF;
        assert_ne!(hex::encode_upper(transaction_hash(&payload).unwrap()), HASH);
    }

    #[test]
    fn test_short_payload_rejected() {
        assert!(matches!(
            transaction_hash(&[0u8; 50]),
            Err(TransactionError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_signing_leaves_transaction_untouched() {
        let tx = transfer(0, 1);
        let before = tx.clone();
        tx.sign(&account()).unwrap();
        assert_eq!(tx, before);
        assert!(tx.signature().is_none());
    }

    #[test]
    fn test_hash_bytes_round_trip() {
        let signed = transfer(0, 1).sign(&account()).unwrap();
        assert_eq!(hex::encode_upper(signed.hash_bytes().unwrap()), HASH);
    }
}
