//! # Hashing Utilities
//!
//! Hash functions used by the transaction engine. The network is built on
//! the SHA-3 family, so that is where almost everything lands:
//!
//! - **SHA3-256**: Transaction hashes, identifier derivation, address
//!   checksums. If you are hashing something that ends up on-chain, this
//!   is the one.
//!
//! - **SHA3-512**: Key expansion and nonce derivation inside the Ed25519
//!   variant the network signs with. Not something callers usually touch.
//!
//! - **RIPEMD-160**: Shortens the SHA3-256 of a public key to the 20-byte
//!   body of an address.
//!
//! - **Keccak-256**, **double SHA-256** and **HASH_160**: Only exist because
//!   secret locks can be proven with Ethereum- and Bitcoin-compatible hashes.
//!
//! Note that Keccak-256 and SHA3-256 are *not* the same function. They
//! differ in padding, and mixing them up produces perfectly plausible
//! garbage.

use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256, Sha3_512};

/// Compute the SHA3-256 hash of the input data.
///
/// # Example
///
/// ```
/// use catapult_protocol::crypto::sha3_256;
///
/// let hash = sha3_256(b"catapult");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    sha3_256_parts(&[data])
}

/// Compute SHA3-256 over the concatenation of several byte slices without
/// materializing the concatenation.
///
/// Transaction hashing and identifier derivation both hash two or three
/// disjoint pieces, so this saves an allocation on each call.
pub fn sha3_256_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute the SHA3-512 hash of the input data.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    hasher.update(data);
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Compute the (pre-standard) Keccak-256 hash of the input data.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute `SHA-256(SHA-256(data))`, the Bitcoin-style double hash.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Compute `RIPEMD-160(SHA-256(data))`, the Bitcoin-style HASH_160.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&Sha256::digest(data))
}
