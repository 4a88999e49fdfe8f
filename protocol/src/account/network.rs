//! Network identifiers.
//!
//! The network byte shows up twice on the wire: as the first byte of every
//! address, and packed together with the transaction version in the header.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AddressError;

/// The network a transaction or address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum NetworkType {
    MainNet = 0xb8,
    TestNet = 0xa8,
    Private = 0xc8,
    PrivateTest = 0xb0,
    Mijin = 0x60,
    MijinTest = 0x90,
}

impl NetworkType {
    pub const ALL: [NetworkType; 6] = [
        Self::MainNet,
        Self::TestNet,
        Self::Private,
        Self::PrivateTest,
        Self::Mijin,
        Self::MijinTest,
    ];

    /// The raw network byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Look up a network by its raw byte.
    pub fn from_byte(byte: u8) -> Result<Self, AddressError> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_byte() == byte)
            .ok_or(AddressError::UnknownNetwork(byte))
    }

    fn name(self) -> &'static str {
        match self {
            Self::MainNet => "main_net",
            Self::TestNet => "test_net",
            Self::Private => "private",
            Self::PrivateTest => "private_test",
            Self::Mijin => "mijin",
            Self::MijinTest => "mijin_test",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = AddressError;

    /// Accepts the snake_case name (`mijin_test`), the same with dashes, or
    /// the hex network byte (`0x90`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Some(hex_byte) = normalized.strip_prefix("0x") {
            let byte = u8::from_str_radix(hex_byte, 16)
                .map_err(|_| AddressError::UnknownNetworkName(s.to_string()))?;
            return Self::from_byte(byte);
        }
        Self::ALL
            .into_iter()
            .find(|n| n.name() == normalized)
            .ok_or_else(|| AddressError::UnknownNetworkName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_bytes() {
        assert_eq!(NetworkType::MainNet.as_byte(), 0xb8);
        assert_eq!(NetworkType::TestNet.as_byte(), 0xa8);
        assert_eq!(NetworkType::MijinTest.as_byte(), 0x90);
    }

    #[test]
    fn test_from_byte_round_trip() {
        for network in NetworkType::ALL {
            assert_eq!(NetworkType::from_byte(network.as_byte()).unwrap(), network);
        }
    }

    #[test]
    fn test_from_byte_unknown() {
        assert_eq!(
            NetworkType::from_byte(0x42),
            Err(AddressError::UnknownNetwork(0x42))
        );
    }

    #[test]
    fn test_from_str_accepts_names_and_bytes() {
        assert_eq!("mijin_test".parse::<NetworkType>().unwrap(), NetworkType::MijinTest);
        assert_eq!("MIJIN-TEST".parse::<NetworkType>().unwrap(), NetworkType::MijinTest);
        assert_eq!("0xb8".parse::<NetworkType>().unwrap(), NetworkType::MainNet);
        assert!("moonnet".parse::<NetworkType>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&NetworkType::PrivateTest).unwrap();
        assert_eq!(json, "\"private_test\"");
    }
}
