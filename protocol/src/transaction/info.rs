//! Chain-side metadata about a transaction.
//!
//! A locally built transaction carries no [`TransactionInfo`]. One returned
//! by a node does, and its shape tells where the transaction is in its
//! lifecycle.

use serde::{Deserialize, Serialize};

/// What the node knows about a transaction.
///
/// Top-level transactions carry `hash` and `merkle_component_hash`; inner
/// transactions of an aggregate carry `aggregate_hash` and `aggregate_id`
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub height: u64,
    pub index: Option<u32>,
    pub id: Option<String>,
    pub hash: Option<String>,
    pub merkle_component_hash: Option<String>,
    pub aggregate_hash: Option<String>,
    pub aggregate_id: Option<String>,
}

impl TransactionInfo {
    /// Info for a top-level transaction.
    pub fn create(
        height: u64,
        index: Option<u32>,
        id: Option<String>,
        hash: impl Into<String>,
        merkle_component_hash: impl Into<String>,
    ) -> Self {
        Self {
            height,
            index,
            id,
            hash: Some(hash.into()),
            merkle_component_hash: Some(merkle_component_hash.into()),
            aggregate_hash: None,
            aggregate_id: None,
        }
    }

    /// Info for a transaction embedded in an aggregate.
    pub fn create_aggregate(
        height: u64,
        index: Option<u32>,
        id: Option<String>,
        aggregate_hash: impl Into<String>,
        aggregate_id: impl Into<String>,
    ) -> Self {
        Self {
            height,
            index,
            id,
            hash: None,
            merkle_component_hash: None,
            aggregate_hash: Some(aggregate_hash.into()),
            aggregate_id: Some(aggregate_id.into()),
        }
    }
}

/// Lifecycle stage derived from an optional [`TransactionInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStage {
    /// Built locally, never seen by a node.
    Unannounced,
    /// Waiting in the unconfirmed pool.
    Unconfirmed,
    /// A bonded aggregate waiting for cosignatures.
    MissingSignatures,
    /// Included in a block.
    Confirmed,
}

impl TransactionStage {
    pub fn of(info: Option<&TransactionInfo>) -> Self {
        match info {
            None => Self::Unannounced,
            Some(info) if info.height > 0 => Self::Confirmed,
            Some(info) if info.hash == info.merkle_component_hash => Self::Unconfirmed,
            Some(_) => Self::MissingSignatures,
        }
    }
}
