//! Mosaic definition and supply change.

use serde::{Deserialize, Serialize};

use super::{byte_count, BodyEncoder};
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::id::{MosaicId, MosaicNonce};
use crate::transaction::types::TransactionType;

const PROPERTY_FIELDS: &[Field] = &[Field::scalar("id", 1), Field::vector("value", 4)];

const DEFINITION_FIELDS: &[Field] = &[
    Field::scalar("nonce", 4),
    Field::vector("mosaic_id", 4),
    Field::scalar("num_optional_properties", 1),
    Field::scalar("flags", 1),
    Field::scalar("divisibility", 1),
    Field::table_vector("optional_properties", PROPERTY_FIELDS),
];

const SUPPLY_CHANGE_FIELDS: &[Field] = &[
    Field::vector("mosaic_id", 4),
    Field::scalar("direction", 1),
    Field::vector("delta", 4),
];

pub static MOSAIC_DEFINITION_SCHEMA: Schema =
    Schema::transaction("mosaic_definition", DEFINITION_FIELDS);

pub static MOSAIC_SUPPLY_CHANGE_SCHEMA: Schema =
    Schema::transaction("mosaic_supply_change", SUPPLY_CHANGE_FIELDS);

const FLAG_SUPPLY_MUTABLE: u8 = 0x01;
const FLAG_TRANSFERABLE: u8 = 0x02;
const FLAG_LEVY_MUTABLE: u8 = 0x04;

/// Id of the optional duration property.
const PROPERTY_DURATION: u8 = 2;

// ---------------------------------------------------------------------------
// MosaicDefinition
// ---------------------------------------------------------------------------

/// Properties fixed when a mosaic is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub levy_mutable: bool,
    pub divisibility: u8,
    /// Lifetime in blocks. `None` means the mosaic never expires.
    pub duration: Option<u64>,
}

impl MosaicProperties {
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.supply_mutable {
            flags |= FLAG_SUPPLY_MUTABLE;
        }
        if self.transferable {
            flags |= FLAG_TRANSFERABLE;
        }
        if self.levy_mutable {
            flags |= FLAG_LEVY_MUTABLE;
        }
        flags
    }

    fn optional_properties(&self) -> Vec<(u8, u64)> {
        self.duration
            .map(|d| (PROPERTY_DURATION, d))
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicDefinitionBody {
    pub nonce: MosaicNonce,
    pub mosaic_id: MosaicId,
    pub properties: MosaicProperties,
}

impl MosaicDefinitionBody {
    pub fn new(nonce: MosaicNonce, mosaic_id: MosaicId, properties: MosaicProperties) -> Self {
        Self {
            nonce,
            mosaic_id,
            properties,
        }
    }
}

impl BodyEncoder for MosaicDefinitionBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::MosaicDefinition
    }

    fn schema(&self) -> &'static Schema {
        &MOSAIC_DEFINITION_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        let optional = self.properties.optional_properties();
        w.write_scalar("nonce", self.nonce.as_bytes())?;
        w.write_u64("mosaic_id", self.mosaic_id.to_u64())?;
        w.write_u8(
            "num_optional_properties",
            byte_count("num_optional_properties", optional.len())?,
        )?;
        w.write_u8("flags", self.properties.flags())?;
        w.write_u8("divisibility", self.properties.divisibility)?;
        w.write_table_vector("optional_properties", &optional, |(id, value), t| {
            t.write_u8("id", *id)?;
            t.write_u64("value", *value)
        })
    }
}

// ---------------------------------------------------------------------------
// MosaicSupplyChange
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MosaicSupplyType {
    Decrease = 0,
    Increase = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicSupplyChangeBody {
    pub mosaic_id: MosaicId,
    pub direction: MosaicSupplyType,
    pub delta: u64,
}

impl MosaicSupplyChangeBody {
    pub fn new(mosaic_id: MosaicId, direction: MosaicSupplyType, delta: u64) -> Self {
        Self {
            mosaic_id,
            direction,
            delta,
        }
    }
}

impl BodyEncoder for MosaicSupplyChangeBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::MosaicSupplyChange
    }

    fn schema(&self) -> &'static Schema {
        &MOSAIC_SUPPLY_CHANGE_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u64("mosaic_id", self.mosaic_id.to_u64())?;
        w.write_u8("direction", self.direction as u8)?;
        w.write_u64("delta", self.delta)
    }
}
