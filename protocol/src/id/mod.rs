//! # Identifiers
//!
//! Namespaces and mosaics are referenced on-chain by 64-bit identifiers
//! derived from hashes, never by their names. Both ID spaces come out of
//! the same SHA3-256 construction; the only structural difference is the
//! top bit, which is forced on for namespaces (negative as `i64`) and off
//! for mosaics (non-negative).
//!
//! Everything here must match other implementations bit for bit, otherwise
//! a transaction references a namespace that does not exist.

pub mod generator;
pub mod mosaic;
pub mod namespace;

pub use generator::{
    generate_id, generate_mosaic_id, generate_namespace_id, generate_namespace_path,
    generate_sub_namespace_id,
};
pub use mosaic::{Mosaic, MosaicId, MosaicNonce, MosaicRef};
pub use namespace::NamespaceId;

use thiserror::Error;

/// Errors raised while deriving or parsing identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The namespace name is empty, too deep, or contains characters outside
    /// `[a-z0-9-_]`.
    #[error("invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// A hex-encoded id or nonce could not be parsed.
    #[error("invalid hex identifier '{0}'")]
    InvalidHex(String),
}
