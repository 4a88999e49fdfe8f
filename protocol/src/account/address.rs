//! # Addresses
//!
//! A decoded address is 25 bytes:
//!
//! ```text
//! [network: 1][account body: 20][checksum: 4]
//! ```
//!
//! The account body is `RIPEMD-160(SHA3-256(public key))` and the checksum
//! is the first four bytes of `SHA3-256(network ‖ body)`.
//! Users see the 40-character RFC 4648 base32 encoding of those bytes,
//! optionally split into dash-separated groups of six.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AddressError, NetworkType};
use crate::config::{ADDRESS_CHECKSUM_LENGTH, ADDRESS_ENCODED_LENGTH, ADDRESS_LENGTH};
use crate::crypto::{ripemd160, sha3_256, PublicKey};

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// A validated network address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address {
    network: NetworkType,
    bytes: [u8; ADDRESS_LENGTH],
}

impl Address {
    /// Parse an address in plain (`SDUP5P…`) or pretty (`SDUP5P-LHDXKB-…`)
    /// form. Case-insensitive.
    pub fn from_raw(raw: &str) -> Result<Self, AddressError> {
        let plain: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if plain.len() != ADDRESS_ENCODED_LENGTH {
            return Err(AddressError::InvalidLength(plain.len()));
        }
        let decoded = base32_decode(&plain)?;
        let bytes: [u8; ADDRESS_LENGTH] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| AddressError::InvalidLength(v.len()))?;
        Self::from_bytes(bytes)
    }

    /// Validate 25 raw address bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Result<Self, AddressError> {
        let network = NetworkType::from_byte(bytes[0])?;
        let split = ADDRESS_LENGTH - ADDRESS_CHECKSUM_LENGTH;
        let expected = sha3_256(&bytes[..split]);
        if bytes[split..] != expected[..ADDRESS_CHECKSUM_LENGTH] {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(Self { network, bytes })
    }

    /// Build an address from its network and 20-byte account body, computing
    /// the checksum.
    pub fn from_body(network: NetworkType, body: &[u8; 20]) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = network.as_byte();
        bytes[1..21].copy_from_slice(body);
        let checksum = sha3_256(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..ADDRESS_CHECKSUM_LENGTH]);
        Self { network, bytes }
    }

    /// Derive the address `public_key` owns on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        let body = ripemd160(&sha3_256(public_key.as_bytes()));
        Self::from_body(network, &body)
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        self.bytes
    }

    /// 40-character base32 form.
    pub fn plain(&self) -> String {
        base32_encode(&self.bytes)
    }

    /// Base32 form split into dash-separated groups of six characters.
    pub fn pretty(&self) -> String {
        let plain = self.plain();
        plain
            .as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw(s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.plain()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_raw(&value)
    }
}

// ---------------------------------------------------------------------------
// Base32 (RFC 4648, no padding)
// ---------------------------------------------------------------------------

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn base32_decode(encoded: &str) -> Result<Vec<u8>, AddressError> {
    let mut out = Vec::with_capacity(encoded.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for c in encoded.chars() {
        let value = BASE32_ALPHABET
            .iter()
            .position(|&a| a as char == c)
            .ok_or(AddressError::InvalidCharacter(c))?;
        buffer = (buffer << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
    }
    Ok(out)
}
