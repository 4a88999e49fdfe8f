//! Inner transactions of an aggregate.
//!
//! An embedded transaction drops everything an aggregate already provides:
//! the signature, the fee, and the deadline. What remains is a 40-byte
//! header followed by the unchanged body:
//!
//! ```text
//! size     u32   full size minus 80
//! signer   [32]  the account the inner transaction acts for
//! version  u16
//! type     u16
//! body     …
//! ```

use serde::{Deserialize, Serialize};

use super::builder::Transaction;
use super::error::TransactionError;
use super::types::TransactionType;
use crate::account::PublicAccount;
use crate::codec::CodecError;
use crate::config::{EMBEDDED_HEADER_SIZE, EMBEDDING_OVERHEAD, HEADER_SIZE, MAX_FEE_OFFSET, SIGNING_SCOPE_OFFSET};

/// A transaction in its aggregate-inner form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedTransaction {
    pub transaction_type: TransactionType,
    pub signer: PublicAccount,
    #[serde(with = "hex::serde")]
    pub bytes: Vec<u8>,
}

impl EmbeddedTransaction {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn body(&self) -> &[u8] {
        &self.bytes[EMBEDDED_HEADER_SIZE.min(self.bytes.len())..]
    }
}

impl Transaction {
    /// Re-encode for inclusion in an aggregate, acting for `signer`.
    pub fn to_embedded(&self, signer: &PublicAccount) -> Result<EmbeddedTransaction, TransactionError> {
        let full = self.generate_bytes()?;
        let size = full.len() - EMBEDDING_OVERHEAD;
        let size = u32::try_from(size)
            .map_err(|_| CodecError::out_of_range("size", u32::MAX.into(), size))?;

        let mut bytes = Vec::with_capacity(full.len() - EMBEDDING_OVERHEAD);
        bytes.extend_from_slice(&size.to_le_bytes());
        bytes.extend_from_slice(signer.public_key.as_bytes());
        bytes.extend_from_slice(&full[SIGNING_SCOPE_OFFSET..MAX_FEE_OFFSET]);
        bytes.extend_from_slice(&full[HEADER_SIZE..]);

        Ok(EmbeddedTransaction {
            transaction_type: self.transaction_type(),
            signer: *signer,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Address, NetworkType};
    use crate::crypto::PublicKey;
    use crate::id::{Mosaic, MosaicId};
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::header::Deadline;
    use crate::transaction::kinds::{Message, TransferBody};

    fn signer() -> PublicAccount {
        PublicAccount::from_public_key_hex(
            "1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755",
            NetworkType::MijinTest,
        )
        .unwrap()
    }

    fn transfer() -> Transaction {
        TransactionBuilder::new(NetworkType::MijinTest)
            .deadline(Deadline::new(1))
            .max_fee(7)
            .build(TransferBody::new(
                Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap(),
                vec![Mosaic::new(MosaicId::new(95442763262823), 100)],
                Message::empty(),
            ))
            .unwrap()
    }

    #[test]
    fn test_embedded_layout() {
        let tx = transfer();
        let full = tx.generate_bytes().unwrap();
        let embedded = tx.to_embedded(&signer()).unwrap();

        assert_eq!(embedded.size(), full.len() - 80);
        assert_eq!(&embedded.bytes[..4], &((full.len() - 80) as u32).to_le_bytes());
        assert_eq!(&embedded.bytes[4..36], signer().public_key.as_bytes());
        assert_eq!(&embedded.bytes[36..38], &[0x03, 0x90]);
        assert_eq!(&embedded.bytes[38..40], &[0x54, 0x41]);
        assert_eq!(embedded.body(), &full[120..]);
        assert_eq!(embedded.transaction_type, TransactionType::Transfer);
    }

    #[test]
    fn test_fee_and_deadline_dropped() {
        let a = transfer().to_embedded(&signer()).unwrap();
        let b = transfer()
            .with_max_fee(99)
            .to_embedded(&signer())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signer_is_the_given_account() {
        let other = PublicAccount::new(PublicKey::from_bytes([9; 32]), NetworkType::MijinTest);
        let embedded = transfer().to_embedded(&other).unwrap();
        assert_eq!(&embedded.bytes[4..36], &[9; 32]);
        assert_eq!(embedded.signer, other);
    }
}
