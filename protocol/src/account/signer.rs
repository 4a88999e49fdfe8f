//! Account wrappers.
//!
//! [`Account`] owns a key pair and can sign. [`PublicAccount`] is what the
//! rest of the world knows about it: the public key and its network.

use serde::{Deserialize, Serialize};

use super::{Address, NetworkType};
use crate::crypto::{KeyError, KeyPair, PublicKey, Signature};

/// The public face of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicAccount {
    pub public_key: PublicKey,
    pub network: NetworkType,
}

impl PublicAccount {
    pub fn new(public_key: PublicKey, network: NetworkType) -> Self {
        Self { public_key, network }
    }

    pub fn from_public_key_hex(hex_str: &str, network: NetworkType) -> Result<Self, KeyError> {
        Ok(Self::new(PublicKey::from_hex(hex_str)?, network))
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key, self.network)
    }

    /// Verify a signature made by this account.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(message, signature)
    }
}

/// An account that can sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    key_pair: KeyPair,
    network: NetworkType,
}

impl Account {
    pub fn new(key_pair: KeyPair, network: NetworkType) -> Self {
        Self { key_pair, network }
    }

    /// Fresh random account on `network`.
    pub fn generate(network: NetworkType) -> Self {
        Self::new(KeyPair::generate(), network)
    }

    pub fn from_private_key_hex(hex_str: &str, network: NetworkType) -> Result<Self, KeyError> {
        Ok(Self::new(KeyPair::from_private_key_hex(hex_str)?, network))
    }

    pub fn public_account(&self) -> PublicAccount {
        PublicAccount::new(self.key_pair.public_key(), self.network)
    }

    pub fn public_key(&self) -> PublicKey {
        self.key_pair.public_key()
    }

    pub fn address(&self) -> Address {
        self.public_account().address()
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.key_pair.sign(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_account_matches_key_pair() {
        let account = Account::generate(NetworkType::MijinTest);
        let public = account.public_account();
        assert_eq!(public.public_key, account.public_key());
        assert_eq!(public.network, NetworkType::MijinTest);
    }

    #[test]
    fn test_public_account_verifies_account_signature() {
        let account = Account::generate(NetworkType::TestNet);
        let sig = account.sign(b"payload");
        assert!(account.public_account().verify(b"payload", &sig));
    }

    #[test]
    fn test_from_private_key_hex() {
        let account = Account::from_private_key_hex(
            "787225aaff3d2c71f4ffa32d4f19ec4922f3cd869747f267378f81f8e3fcb12d",
            NetworkType::MijinTest,
        )
        .unwrap();
        assert_eq!(
            account.public_key().to_hex(),
            "1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755"
        );
        assert_eq!(
            account.address().plain(),
            "SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY"
        );
        assert_eq!(account.public_account().address(), account.address());
    }

    #[test]
    fn test_public_account_serde() {
        let public = Account::generate(NetworkType::MainNet).public_account();
        let json = serde_json::to_value(public).unwrap();
        assert_eq!(json["network"], "main_net");
        let back: PublicAccount = serde_json::from_value(json).unwrap();
        assert_eq!(back, public);
    }
}
