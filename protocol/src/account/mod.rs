//! # Accounts
//!
//! Who signs and who receives: network identifiers, addresses, and the
//! account wrappers that pair a key with the network it lives on.

pub mod address;
pub mod network;
pub mod signer;

pub use address::Address;
pub use network::NetworkType;
pub use signer::{Account, PublicAccount};

use thiserror::Error;

/// Errors raised while parsing addresses or network identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("unknown network byte 0x{0:02x}")]
    UnknownNetwork(u8),

    #[error("unknown network name '{0}'")]
    UnknownNetworkName(String),

    #[error("address must decode to 40 base32 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid base32 character '{0}' in address")]
    InvalidCharacter(char),

    #[error("address checksum mismatch")]
    ChecksumMismatch,
}
