//! Account links and account properties.
//!
//! A link delegates harvesting to a remote key. Properties restrict what
//! an account accepts: which senders, which mosaics, which transaction
//! types. Each property is an allow list by default or a block list when
//! the block modifier is set.

use serde::{Deserialize, Serialize};

use super::{byte_count, BodyEncoder, LinkAction};
use crate::account::Address;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::crypto::PublicKey;
use crate::id::MosaicId;
use crate::transaction::types::TransactionType;

const LINK_FIELDS: &[Field] = &[
    Field::vector("remote_account_key", 1),
    Field::scalar("link_action", 1),
];

const PROPERTY_MODIFICATION_FIELDS: &[Field] = &[
    Field::scalar("modification_type", 1),
    Field::vector("value", 1),
];

const PROPERTIES_FIELDS: &[Field] = &[
    Field::scalar("property_type", 1),
    Field::scalar("modification_count", 1),
    Field::table_vector("modifications", PROPERTY_MODIFICATION_FIELDS),
];

pub static ACCOUNT_LINK_SCHEMA: Schema = Schema::transaction("account_link", LINK_FIELDS);

pub static ACCOUNT_PROPERTIES_SCHEMA: Schema =
    Schema::transaction("account_properties", PROPERTIES_FIELDS);

const PROPERTY_ADDRESS: u8 = 0x01;
const PROPERTY_MOSAIC: u8 = 0x02;
const PROPERTY_ENTITY_TYPE: u8 = 0x04;
const PROPERTY_BLOCK: u8 = 0x80;

// ---------------------------------------------------------------------------
// AccountLink
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLinkBody {
    pub remote: PublicKey,
    pub action: LinkAction,
}

impl AccountLinkBody {
    pub fn new(remote: PublicKey, action: LinkAction) -> Self {
        Self { remote, action }
    }
}

impl BodyEncoder for AccountLinkBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::AccountLink
    }

    fn schema(&self) -> &'static Schema {
        &ACCOUNT_LINK_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_vector("remote_account_key", self.remote.as_bytes())?;
        w.write_u8("link_action", self.action.value())
    }
}

// ---------------------------------------------------------------------------
// AccountProperties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PropertyModificationType {
    Add = 0,
    Remove = 1,
}

/// Add or remove one value from a property list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyModification<T> {
    pub modification_type: PropertyModificationType,
    pub value: T,
}

impl<T> PropertyModification<T> {
    pub fn add(value: T) -> Self {
        Self {
            modification_type: PropertyModificationType::Add,
            value,
        }
    }

    pub fn remove(value: T) -> Self {
        Self {
            modification_type: PropertyModificationType::Remove,
            value,
        }
    }
}

/// The list being modified, which also fixes the transaction type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyModifications {
    Address(Vec<PropertyModification<Address>>),
    Mosaic(Vec<PropertyModification<MosaicId>>),
    EntityType(Vec<PropertyModification<TransactionType>>),
}

impl PropertyModifications {
    fn base_type(&self) -> u8 {
        match self {
            Self::Address(_) => PROPERTY_ADDRESS,
            Self::Mosaic(_) => PROPERTY_MOSAIC,
            Self::EntityType(_) => PROPERTY_ENTITY_TYPE,
        }
    }

    /// `(modification type, value bytes)` per entry, in order.
    fn encoded(&self) -> Vec<(u8, Vec<u8>)> {
        match self {
            Self::Address(mods) => mods
                .iter()
                .map(|m| (m.modification_type as u8, m.value.to_bytes().to_vec()))
                .collect(),
            Self::Mosaic(mods) => mods
                .iter()
                .map(|m| (m.modification_type as u8, m.value.to_u64().to_le_bytes().to_vec()))
                .collect(),
            Self::EntityType(mods) => mods
                .iter()
                .map(|m| (m.modification_type as u8, m.value.value().to_le_bytes().to_vec()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPropertiesBody {
    /// Block list when set, allow list otherwise.
    pub block: bool,
    pub modifications: PropertyModifications,
}

impl AccountPropertiesBody {
    pub fn allow(modifications: PropertyModifications) -> Self {
        Self {
            block: false,
            modifications,
        }
    }

    pub fn block(modifications: PropertyModifications) -> Self {
        Self {
            block: true,
            modifications,
        }
    }

    /// The property type byte, including the block modifier.
    pub fn property_type(&self) -> u8 {
        let base = self.modifications.base_type();
        if self.block {
            base | PROPERTY_BLOCK
        } else {
            base
        }
    }
}

impl BodyEncoder for AccountPropertiesBody {
    fn transaction_type(&self) -> TransactionType {
        match self.modifications {
            PropertyModifications::Address(_) => TransactionType::AccountPropertiesAddress,
            PropertyModifications::Mosaic(_) => TransactionType::AccountPropertiesMosaic,
            PropertyModifications::EntityType(_) => TransactionType::AccountPropertiesEntityType,
        }
    }

    fn schema(&self) -> &'static Schema {
        &ACCOUNT_PROPERTIES_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        let encoded = self.modifications.encoded();
        w.write_u8("property_type", self.property_type())?;
        w.write_u8(
            "modification_count",
            byte_count("modification_count", encoded.len())?,
        )?;
        w.write_table_vector("modifications", &encoded, |(kind, value), t| {
            t.write_u8("modification_type", *kind)?;
            t.write_vector("value", value)
        })
    }
}
