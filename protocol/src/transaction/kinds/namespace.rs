//! Namespace registration and aliases.
//!
//! Registration claims a root namespace for some number of blocks, or a
//! child below a namespace the signer already owns. An alias then points a
//! namespace at an address or a mosaic so it can stand in for either.

use serde::{Deserialize, Serialize};

use super::{byte_count, BodyEncoder, LinkAction};
use crate::account::Address;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::id::{generate_sub_namespace_id, IdError, MosaicId, NamespaceId};
use crate::transaction::types::TransactionType;

const REGISTER_FIELDS: &[Field] = &[
    Field::scalar("namespace_type", 1),
    Field::vector("duration_parent_id", 4),
    Field::vector("namespace_id", 4),
    Field::scalar("namespace_name_size", 1),
    Field::vector("namespace_name", 1),
];

const ADDRESS_ALIAS_FIELDS: &[Field] = &[
    Field::scalar("action_type", 1),
    Field::vector("namespace_id", 4),
    Field::vector("address", 1),
];

const MOSAIC_ALIAS_FIELDS: &[Field] = &[
    Field::scalar("action_type", 1),
    Field::vector("namespace_id", 4),
    Field::vector("mosaic_id", 4),
];

pub static REGISTER_NAMESPACE_SCHEMA: Schema =
    Schema::transaction("register_namespace", REGISTER_FIELDS);

pub static ADDRESS_ALIAS_SCHEMA: Schema = Schema::transaction("address_alias", ADDRESS_ALIAS_FIELDS);

pub static MOSAIC_ALIAS_SCHEMA: Schema = Schema::transaction("mosaic_alias", MOSAIC_ALIAS_FIELDS);

// ---------------------------------------------------------------------------
// RegisterNamespace
// ---------------------------------------------------------------------------

/// Root or child, with the value that shares the `duration_parent_id` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceRegistration {
    Root { duration: u64 },
    Child { parent: NamespaceId },
}

impl NamespaceRegistration {
    fn type_code(&self) -> u8 {
        match self {
            Self::Root { .. } => 0,
            Self::Child { .. } => 1,
        }
    }

    fn duration_or_parent(&self) -> u64 {
        match self {
            Self::Root { duration } => *duration,
            Self::Child { parent } => parent.to_u64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterNamespaceBody {
    pub name: String,
    pub namespace_id: NamespaceId,
    pub registration: NamespaceRegistration,
}

impl RegisterNamespaceBody {
    /// Claim the root namespace `name` for `duration` blocks.
    pub fn root(name: &str, duration: u64) -> Result<Self, IdError> {
        let namespace_id = NamespaceId::new(generate_sub_namespace_id(0, name)?);
        Ok(Self {
            name: name.to_string(),
            namespace_id,
            registration: NamespaceRegistration::Root { duration },
        })
    }

    /// Register `name` directly below `parent`.
    pub fn child(name: &str, parent: NamespaceId) -> Result<Self, IdError> {
        Ok(Self {
            name: name.to_string(),
            namespace_id: NamespaceId::child(parent, name)?,
            registration: NamespaceRegistration::Child { parent },
        })
    }
}

impl BodyEncoder for RegisterNamespaceBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::RegisterNamespace
    }

    fn schema(&self) -> &'static Schema {
        &REGISTER_NAMESPACE_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        let name = self.name.as_bytes();
        w.write_u8("namespace_type", self.registration.type_code())?;
        w.write_u64("duration_parent_id", self.registration.duration_or_parent())?;
        w.write_u64("namespace_id", self.namespace_id.to_u64())?;
        w.write_u8("namespace_name_size", byte_count("namespace_name_size", name.len())?)?;
        w.write_vector("namespace_name", name)
    }
}

// ---------------------------------------------------------------------------
// Alias
// ---------------------------------------------------------------------------

/// What a namespace is aliased to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasTarget {
    Address(Address),
    Mosaic(MosaicId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasBody {
    pub action: LinkAction,
    pub namespace_id: NamespaceId,
    pub target: AliasTarget,
}

impl AliasBody {
    pub fn new(action: LinkAction, namespace_id: NamespaceId, target: AliasTarget) -> Self {
        Self {
            action,
            namespace_id,
            target,
        }
    }
}

impl BodyEncoder for AliasBody {
    fn transaction_type(&self) -> TransactionType {
        match self.target {
            AliasTarget::Address(_) => TransactionType::AddressAlias,
            AliasTarget::Mosaic(_) => TransactionType::MosaicAlias,
        }
    }

    fn schema(&self) -> &'static Schema {
        match self.target {
            AliasTarget::Address(_) => &ADDRESS_ALIAS_SCHEMA,
            AliasTarget::Mosaic(_) => &MOSAIC_ALIAS_SCHEMA,
        }
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u8("action_type", self.action.value())?;
        w.write_u64("namespace_id", self.namespace_id.to_u64())?;
        match &self.target {
            AliasTarget::Address(address) => w.write_vector("address", &address.to_bytes()),
            AliasTarget::Mosaic(mosaic_id) => w.write_u64("mosaic_id", mosaic_id.to_u64()),
        }
    }
}
