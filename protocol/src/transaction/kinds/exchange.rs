//! Exchange offers: placing, accepting and withdrawing mosaic offers.
//!
//! An offer trades an amount of one mosaic against a cost in the network
//! currency. Adding an offer opens it for `duration` blocks, an exchange
//! transaction accepts offers owned by other accounts, and a remove
//! transaction withdraws the signer's own offers.

use serde::{Deserialize, Serialize};

use super::{byte_count, BodyEncoder};
use crate::account::PublicAccount;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::id::MosaicId;
use crate::transaction::types::TransactionType;

const ADD_OFFER_FIELDS: &[Field] = &[
    Field::vector("mosaic_id", 4),
    Field::vector("mosaic_amount", 4),
    Field::vector("cost", 4),
    Field::scalar("type", 1),
    Field::vector("duration", 4),
];

const OFFER_FIELDS: &[Field] = &[
    Field::vector("mosaic_id", 4),
    Field::vector("mosaic_amount", 4),
    Field::vector("cost", 4),
    Field::scalar("type", 1),
    Field::vector("owner", 1),
];

const REMOVE_OFFER_FIELDS: &[Field] = &[Field::vector("mosaic_id", 4), Field::scalar("type", 1)];

const ADD_FIELDS: &[Field] = &[
    Field::scalar("offers_count", 1),
    Field::table_vector("offers", ADD_OFFER_FIELDS),
];

const EXCHANGE_FIELDS: &[Field] = &[
    Field::scalar("offers_count", 1),
    Field::table_vector("offers", OFFER_FIELDS),
];

const REMOVE_FIELDS: &[Field] = &[
    Field::scalar("offers_count", 1),
    Field::table_vector("offers", REMOVE_OFFER_FIELDS),
];

pub static EXCHANGE_OFFER_ADD_SCHEMA: Schema = Schema::transaction("exchange_offer_add", ADD_FIELDS);

pub static EXCHANGE_OFFER_SCHEMA: Schema = Schema::transaction("exchange_offer", EXCHANGE_FIELDS);

pub static EXCHANGE_OFFER_REMOVE_SCHEMA: Schema =
    Schema::transaction("exchange_offer_remove", REMOVE_FIELDS);

/// Which side of the trade the offer owner takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ExchangeOfferType {
    Sell = 0,
    Buy = 1,
}

impl ExchangeOfferType {
    pub fn value(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// ExchangeOfferAdd
// ---------------------------------------------------------------------------

/// A new offer placed by the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddExchangeOffer {
    pub mosaic_id: MosaicId,
    pub mosaic_amount: u64,
    pub cost: u64,
    pub offer_type: ExchangeOfferType,
    /// Blocks the offer stays open.
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOfferAddBody {
    pub offers: Vec<AddExchangeOffer>,
}

impl ExchangeOfferAddBody {
    pub fn new(offers: Vec<AddExchangeOffer>) -> Self {
        Self { offers }
    }
}

impl BodyEncoder for ExchangeOfferAddBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ExchangeOfferAdd
    }

    fn schema(&self) -> &'static Schema {
        &EXCHANGE_OFFER_ADD_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u8("offers_count", byte_count("offers_count", self.offers.len())?)?;
        w.write_table_vector("offers", &self.offers, |offer, t| {
            t.write_u64("mosaic_id", offer.mosaic_id.to_u64())?;
            t.write_u64("mosaic_amount", offer.mosaic_amount)?;
            t.write_u64("cost", offer.cost)?;
            t.write_u8("type", offer.offer_type.value())?;
            t.write_u64("duration", offer.duration)
        })
    }
}

// ---------------------------------------------------------------------------
// ExchangeOffer
// ---------------------------------------------------------------------------

/// Acceptance of an offer that `owner` placed earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOffer {
    pub mosaic_id: MosaicId,
    pub mosaic_amount: u64,
    pub cost: u64,
    pub offer_type: ExchangeOfferType,
    pub owner: PublicAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOfferBody {
    pub offers: Vec<ExchangeOffer>,
}

impl ExchangeOfferBody {
    pub fn new(offers: Vec<ExchangeOffer>) -> Self {
        Self { offers }
    }
}

impl BodyEncoder for ExchangeOfferBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ExchangeOffer
    }

    fn schema(&self) -> &'static Schema {
        &EXCHANGE_OFFER_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u8("offers_count", byte_count("offers_count", self.offers.len())?)?;
        w.write_table_vector("offers", &self.offers, |offer, t| {
            t.write_u64("mosaic_id", offer.mosaic_id.to_u64())?;
            t.write_u64("mosaic_amount", offer.mosaic_amount)?;
            t.write_u64("cost", offer.cost)?;
            t.write_u8("type", offer.offer_type.value())?;
            t.write_vector("owner", offer.owner.public_key.as_bytes())
        })
    }
}

// ---------------------------------------------------------------------------
// ExchangeOfferRemove
// ---------------------------------------------------------------------------

/// Withdrawal of one of the signer's open offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveExchangeOffer {
    pub mosaic_id: MosaicId,
    pub offer_type: ExchangeOfferType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOfferRemoveBody {
    pub offers: Vec<RemoveExchangeOffer>,
}

impl ExchangeOfferRemoveBody {
    pub fn new(offers: Vec<RemoveExchangeOffer>) -> Self {
        Self { offers }
    }
}

impl BodyEncoder for ExchangeOfferRemoveBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ExchangeOfferRemove
    }

    fn schema(&self) -> &'static Schema {
        &EXCHANGE_OFFER_REMOVE_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u8("offers_count", byte_count("offers_count", self.offers.len())?)?;
        w.write_table_vector("offers", &self.offers, |offer, t| {
            t.write_u64("mosaic_id", offer.mosaic_id.to_u64())?;
            t.write_u8("type", offer.offer_type.value())
        })
    }
}
