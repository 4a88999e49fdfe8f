//! Cosigning an announced bonded aggregate.
//!
//! Once a bonded aggregate is on chain, each remaining cosigner signs its
//! hash and announces the signature on its own. The hash comes from the
//! aggregate's [`TransactionInfo`](super::info::TransactionInfo), so only a
//! transaction reconstructed from a node response can be cosigned.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::Transaction;
use super::error::TransactionError;
use crate::account::Account;
use crate::config::HASH_LENGTH;
use crate::crypto::{PublicKey, Signature};

/// An aggregate hash awaiting a cosignature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosignatureTransaction {
    hash: [u8; HASH_LENGTH],
}

impl CosignatureTransaction {
    /// Wrap the hash of an announced aggregate.
    pub fn create(aggregate: &Transaction) -> Result<Self, TransactionError> {
        let hash = aggregate
            .info()
            .and_then(|info| info.hash.as_deref())
            .ok_or(TransactionError::MissingTransactionHash)?;
        Self::from_hash_hex(hash)
    }

    /// Wrap a hash known out of band, as uppercase or lowercase hex.
    pub fn from_hash_hex(hash: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hash).map_err(|e| TransactionError::InvalidPayload(e.to_string()))?;
        let hash = bytes
            .try_into()
            .map_err(|v: Vec<u8>| TransactionError::InvalidPayload(format!("hash is {} bytes", v.len())))?;
        Ok(Self { hash })
    }

    pub fn hash(&self) -> &[u8; HASH_LENGTH] {
        &self.hash
    }

    pub fn sign_with(&self, account: &Account) -> CosignatureSignedTransaction {
        let signer = account.public_key();
        debug!(signer = %signer.to_hex(), "cosigning aggregate");
        CosignatureSignedTransaction {
            parent_hash: hex::encode_upper(self.hash),
            signature: account.sign(&self.hash),
            signer,
        }
    }
}

/// A cosignature ready to announce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureSignedTransaction {
    pub parent_hash: String,
    pub signature: Signature,
    pub signer: PublicKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::NetworkType;
    use crate::crypto::KeyPair;
    use crate::transaction::header::Deadline;
    use crate::transaction::info::TransactionInfo;

    const HASH: &str = "350AE56BC97DB805E2098AB2C596FA4C6B37EF974BF24DFD61CD9F77C7687424";

    fn bonded() -> Transaction {
        Transaction::aggregate_bonded(Deadline::new(1), vec![], NetworkType::MijinTest)
    }

    #[test]
    fn test_sign_announced_aggregate() {
        let tx = bonded().with_info(TransactionInfo::create(0, None, None, HASH, "AA"));
        let account = Account::new(KeyPair::from_seed(&[5; 32]), NetworkType::MijinTest);
        let cosignature = CosignatureTransaction::create(&tx).unwrap().sign_with(&account);

        assert_eq!(cosignature.parent_hash, HASH);
        assert_eq!(cosignature.signer, account.public_key());
        let hash = hex::decode(HASH).unwrap();
        assert!(account.public_account().verify(&hash, &cosignature.signature));
    }

    #[test]
    fn test_unannounced_aggregate_rejected() {
        assert_eq!(
            CosignatureTransaction::create(&bonded()),
            Err(TransactionError::MissingTransactionHash)
        );
    }

    #[test]
    fn test_inner_info_has_no_hash() {
        let tx = bonded().with_info(TransactionInfo::create_aggregate(0, Some(0), None, HASH, "1"));
        assert_eq!(
            CosignatureTransaction::create(&tx),
            Err(TransactionError::MissingTransactionHash)
        );
    }

    #[test]
    fn test_lowercase_hash_accepted() {
        let cosig = CosignatureTransaction::from_hash_hex(&HASH.to_lowercase()).unwrap();
        assert_eq!(hex::encode_upper(cosig.hash()), HASH);
    }

    #[test]
    fn test_serializes_camel_case() {
        let account = Account::new(KeyPair::from_seed(&[5; 32]), NetworkType::MijinTest);
        let json = serde_json::to_value(
            CosignatureTransaction::from_hash_hex(HASH)
                .unwrap()
                .sign_with(&account),
        )
        .unwrap();
        assert_eq!(json["parentHash"], HASH);
        assert!(json["signature"].is_string());
    }
}
