//! The shared transaction header.
//!
//! Every standalone transaction starts with the same 120 bytes:
//!
//! ```text
//! offset  size  field
//!      0     4  total size
//!      4    64  signature        (zero until signed)
//!     68    32  signer key       (zero until signed)
//!    100     2  version/network  (packed, see pack_version)
//!    102     2  transaction type
//!    104     8  max fee
//!    112     8  deadline
//!    120     …  body
//! ```
//!
//! This module holds the caller-chosen parts of that header plus the time
//! handling behind the deadline field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::account::NetworkType;
use crate::config::NETWORK_EPOCH_MILLIS;

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Point in time after which a node drops the transaction.
///
/// Stored as milliseconds since the network epoch, which is exactly what the
/// wire carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(u64);

impl Deadline {
    /// A deadline from its raw wire value.
    pub fn new(epoch_millis: u64) -> Self {
        Self(epoch_millis)
    }

    /// Convert a wall-clock time. Times before the network epoch clamp to 0.
    pub fn from_utc(time: DateTime<Utc>) -> Self {
        let millis = time.timestamp_millis().saturating_sub(NETWORK_EPOCH_MILLIS);
        Self(u64::try_from(millis).unwrap_or(0))
    }

    /// This deadline pushed back by `duration`, saturating at the largest
    /// wire value.
    pub fn saturating_add(self, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(millis))
    }

    /// Milliseconds since the network epoch.
    pub fn instant(&self) -> u64 {
        self.0
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.0).ok()?.checked_add(NETWORK_EPOCH_MILLIS)?;
        DateTime::from_timestamp_millis(millis)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(time) => write!(f, "{}", time.to_rfc3339()),
            None => write!(f, "epoch+{}ms", self.0),
        }
    }
}

/// Where deadlines come from.
pub trait DeadlineSource: Send + Sync {
    /// The deadline `duration` from now.
    fn now_plus(&self, duration: Duration) -> Deadline;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl DeadlineSource for SystemClock {
    fn now_plus(&self, duration: Duration) -> Deadline {
        Deadline::from_utc(Utc::now()).saturating_add(duration)
    }
}

/// A clock frozen at one instant. For tests and reproducible payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Frozen at the network epoch, so `now_plus(d)` is just `d` in millis.
    pub fn at_epoch() -> Self {
        Self::new(DateTime::from_timestamp_millis(NETWORK_EPOCH_MILLIS).unwrap_or_default())
    }
}

impl DeadlineSource for FixedClock {
    fn now_plus(&self, duration: Duration) -> Deadline {
        Deadline::from_utc(self.now).saturating_add(duration)
    }
}

// ---------------------------------------------------------------------------
// Version packing
// ---------------------------------------------------------------------------

/// Pack network and schema version into the 16-bit header field.
///
/// Nodes expect the value produced by writing the network byte in hex, a
/// literal `0`, then the version in hex, and reading that back as one hex
/// number truncated to 16 bits. For single-digit versions that is simply
/// `network << 8 | version`; two-digit versions shift the network one
/// nibble further and lose it to truncation.
pub fn pack_version(network: NetworkType, version: u8) -> u16 {
    let version_nibbles = if version < 0x10 { 1 } else { 2 };
    let packed = (u32::from(network.as_byte()) << (4 * (version_nibbles + 1))) | u32::from(version);
    (packed & 0xFFFF) as u16
}

// ---------------------------------------------------------------------------
// TransactionHeader
// ---------------------------------------------------------------------------

/// The caller-chosen header fields. Size, signature, signer and type are
/// filled in during serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub network: NetworkType,
    pub version: u8,
    pub max_fee: u64,
    pub deadline: Deadline,
}

impl TransactionHeader {
    pub fn new(network: NetworkType, version: u8, deadline: Deadline, max_fee: u64) -> Self {
        Self {
            network,
            version,
            max_fee,
            deadline,
        }
    }

    /// The value written at offset 100.
    pub fn packed_version(&self) -> u16 {
        pack_version(self.network, self.version)
    }
}
