//! # Cryptographic Primitives
//!
//! Hashing and signing for the transaction engine. Both are thin, typed
//! wrappers around audited crates:
//!
//! - **SHA3-256** (`sha3`) for transaction hashes, identifiers and address
//!   checksums.
//! - **Ed25519 over SHA3-512** (`ed25519-dalek` hazmat + `sha3`) for
//!   signatures. See [`keys`] for why stock Ed25519 does not work here.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. The only thing this module decides is *which digest* goes into
//! the Ed25519 equations. The curve arithmetic is all `ed25519-dalek`.

pub mod hash;
pub mod keys;

pub use hash::{
    double_sha256, hash160, keccak_256, ripemd160, sha3_256, sha3_256_parts, sha3_512,
};
pub use keys::{KeyError, KeyPair, PublicKey, Signature};
