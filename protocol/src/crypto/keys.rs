//! # Key Management
//!
//! Ed25519 key pairs as the network uses them.
//!
//! The curve and the signature equation are plain Ed25519, but every place
//! RFC 8032 says SHA-512 the network says SHA3-512: the private key seed is
//! expanded with SHA3-512, and the per-signature nonce and challenge are
//! SHA3-512 too. A stock Ed25519 key derived from the same seed therefore
//! has a *different* public key, and its signatures do not verify here.
//!
//! We still lean on `ed25519-dalek` for all the curve arithmetic through its
//! `hazmat` layer, which lets us plug in the digest. Nothing in this module
//! touches a field element directly.
//!
//! ## Security considerations
//!
//! - Signing is deterministic. The same key and message always give the
//!   same signature, which is what makes published test vectors reproducible.
//! - The 32-byte seed is held in a `Zeroizing` buffer and the expanded key is
//!   wiped on drop by `ed25519-dalek`.
//! - Key bytes are never logged. `Debug` prints the public half only.

use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::Sha3_512;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use super::hash::sha3_512;
use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur during key operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid private key: expected 32 bytes of hex")]
    InvalidPrivateKey,

    #[error("invalid public key: expected 32 bytes of hex")]
    InvalidPublicKey,

    #[error("invalid signature: expected 64 bytes of hex")]
    InvalidSignature,
}

/// Decode a hex string into a fixed-size array, mapping any failure to `err`.
fn decode_fixed<const N: usize>(hex_str: &str, err: KeyError) -> Result<[u8; N], KeyError> {
    let bytes = hex::decode(hex_str.trim()).map_err(|_| err.clone())?;
    bytes.try_into().map_err(|_| err)
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// A signing key pair.
///
/// Intentionally not `Serialize`. Exporting the private key is a deliberate
/// act: call [`KeyPair::private_key_hex`] if you really mean it.
///
/// # Examples
///
/// ```
/// use catapult_protocol::crypto::KeyPair;
///
/// let kp = KeyPair::generate();
/// let sig = kp.sign(b"announce me");
/// assert!(kp.public_key().verify(b"announce me", &sig));
/// ```
pub struct KeyPair {
    seed: Zeroizing<[u8; SECRET_KEY_LENGTH]>,
    expanded: ExpandedSecretKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Generate a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        OsRng.fill_bytes(&mut seed[..]);
        Self::from_seed(&seed)
    }

    /// Build a key pair from a 32-byte private key seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let digest = Zeroizing::new(sha3_512(seed));
        let expanded = ExpandedSecretKey::from_bytes(&digest);
        let verifying_key = VerifyingKey::from(&expanded);
        Self {
            seed: Zeroizing::new(*seed),
            expanded,
            verifying_key,
        }
    }

    /// Parse a hex-encoded private key (64 hex characters, any case).
    pub fn from_private_key_hex(hex_str: &str) -> Result<Self, KeyError> {
        let seed = Zeroizing::new(decode_fixed::<SECRET_KEY_LENGTH>(
            hex_str,
            KeyError::InvalidPrivateKey,
        )?);
        Ok(Self::from_seed(&seed))
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.verifying_key.to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = raw_sign::<Sha3_512>(&self.expanded, message, &self.verifying_key);
        Signature(sig.to_bytes())
    }

    /// Uppercase hex of the private key seed.
    ///
    /// **Handle with care.** This is the only thing standing between an
    /// attacker and every account derived from it.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(*self.seed)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.seed)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key())
    }
}

impl PartialEq for KeyPair {
    /// Compared by public key only.
    fn eq(&self, other: &Self) -> bool {
        self.verifying_key == other.verifying_key
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key. Serialized as uppercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded public key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        decode_fixed(hex_str, KeyError::InvalidPublicKey).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Uppercase hex, the form the network APIs use.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Verify a signature produced by the matching [`KeyPair`].
    ///
    /// Returns `false` for bad signatures and for byte strings that are not
    /// a point on the curve alike.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = DalekSignature::from_bytes(&signature.0);
        raw_verify::<Sha3_512>(&verifying_key, message, &sig).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.to_hex()
    }
}

impl TryFrom<String> for PublicKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte signature, `R ‖ S`. Serialized as uppercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        decode_fixed(hex_str, KeyError::InvalidSignature).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// The `R` half (first 32 bytes). Transaction hashes commit to it.
    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}..{})", &hex_str[..8], &hex_str[hex_str.len() - 8..])
    }
}

impl From<Signature> for String {
    fn from(sig: Signature) -> Self {
        sig.to_hex()
    }
}

impl TryFrom<String> for Signature {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}
