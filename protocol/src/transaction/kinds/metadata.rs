//! Metadata modifications on accounts, mosaics and namespaces.
//!
//! Each modification is self-sized:
//!
//! ```text
//! size        u32   4 + 1 + 1 + 2 + key + value
//! type         u8   add 0, remove 1
//! key_size     u8
//! value_size  u16
//! key          …
//! value        …    empty for removals
//! ```

use serde::{Deserialize, Serialize};

use super::{byte_count, short_count, BodyEncoder};
use crate::account::Address;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::id::{MosaicId, NamespaceId};
use crate::transaction::types::TransactionType;

const MODIFICATION_FIELDS: &[Field] = &[
    Field::scalar("size", 4),
    Field::scalar("modification_type", 1),
    Field::scalar("key_size", 1),
    // Two bytes kept as a vector so a zero length is still written.
    Field::vector("value_size", 1),
    Field::vector("key", 1),
    Field::vector("value", 1),
];

const METADATA_FIELDS: &[Field] = &[
    Field::scalar("metadata_type", 1),
    Field::vector("metadata_id", 1),
    Field::table_vector("modifications", MODIFICATION_FIELDS),
];

pub static MODIFY_METADATA_SCHEMA: Schema = Schema::transaction("modify_metadata", METADATA_FIELDS);

/// Fixed part of a modification: size, type, key size, value size.
const MODIFICATION_HEADER_SIZE: usize = 4 + 1 + 1 + 2;

/// What the metadata is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataTarget {
    Address(Address),
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

impl MetadataTarget {
    fn type_code(&self) -> u8 {
        match self {
            Self::Address(_) => 1,
            Self::Mosaic(_) => 2,
            Self::Namespace(_) => 3,
        }
    }

    fn id_bytes(&self) -> Vec<u8> {
        match self {
            Self::Address(address) => address.to_bytes().to_vec(),
            Self::Mosaic(id) => id.to_u64().to_le_bytes().to_vec(),
            Self::Namespace(id) => id.to_u64().to_le_bytes().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MetadataModificationType {
    Add = 0,
    Remove = 1,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataModification {
    pub modification_type: MetadataModificationType,
    pub key: String,
    /// Always `None` for removals.
    pub value: Option<String>,
}

impl MetadataModification {
    pub fn add(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            modification_type: MetadataModificationType::Add,
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self {
            modification_type: MetadataModificationType::Remove,
            key: key.into(),
            value: None,
        }
    }

    fn value_bytes(&self) -> &[u8] {
        match (self.modification_type, &self.value) {
            (MetadataModificationType::Add, Some(value)) => value.as_bytes(),
            _ => &[],
        }
    }

    /// Encoded size of this modification.
    pub fn size(&self) -> usize {
        MODIFICATION_HEADER_SIZE + self.key.len() + self.value_bytes().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyMetadataBody {
    pub target: MetadataTarget,
    pub modifications: Vec<MetadataModification>,
}

impl ModifyMetadataBody {
    pub fn new(target: MetadataTarget, modifications: Vec<MetadataModification>) -> Self {
        Self {
            target,
            modifications,
        }
    }
}

impl BodyEncoder for ModifyMetadataBody {
    fn transaction_type(&self) -> TransactionType {
        match self.target {
            MetadataTarget::Address(_) => TransactionType::ModifyAddressMetadata,
            MetadataTarget::Mosaic(_) => TransactionType::ModifyMosaicMetadata,
            MetadataTarget::Namespace(_) => TransactionType::ModifyNamespaceMetadata,
        }
    }

    fn schema(&self) -> &'static Schema {
        &MODIFY_METADATA_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u8("metadata_type", self.target.type_code())?;
        w.write_vector("metadata_id", &self.target.id_bytes())?;
        w.write_table_vector("modifications", &self.modifications, |m, t| {
            let key = m.key.as_bytes();
            let value = m.value_bytes();
            let size = u32::try_from(m.size())
                .map_err(|_| CodecError::out_of_range("size", u32::MAX.into(), m.size()))?;
            t.write_u32("size", size)?;
            t.write_u8("modification_type", m.modification_type as u8)?;
            t.write_u8("key_size", byte_count("key_size", key.len())?)?;
            t.write_vector("value_size", &short_count("value_size", value.len())?.to_le_bytes())?;
            t.write_vector("key", key)?;
            t.write_vector("value", value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::kinds::body_bytes;

    #[test]
    fn test_add_modification_layout() {
        let body = ModifyMetadataBody::new(
            MetadataTarget::Mosaic(MosaicId::new(0x0A)),
            vec![MetadataModification::add("k", "vv")],
        );
        assert_eq!(body.transaction_type(), TransactionType::ModifyMosaicMetadata);
        assert_eq!(
            hex::encode_upper(body_bytes(&body)),
            "020A000000000000000B000000000102006B7676"
        );
    }

    #[test]
    fn test_remove_writes_zero_value_size() {
        let m = MetadataModification::remove("key");
        assert_eq!(m.size(), 8 + 3);
        let body = ModifyMetadataBody::new(
            MetadataTarget::Namespace(NamespaceId::new(-1)),
            vec![m],
        );
        let bytes = body_bytes(&body);
        assert_eq!(bytes[0], 3);
        let modification = &bytes[9..];
        assert_eq!(&modification[..4], &[11, 0, 0, 0]);
        assert_eq!(modification[4], 1);
        assert_eq!(modification[5], 3);
        assert_eq!(&modification[6..8], &[0, 0]);
        assert_eq!(&modification[8..], b"key");
    }

    #[test]
    fn test_address_target_uses_raw_address() {
        let address = Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap();
        let body = ModifyMetadataBody::new(MetadataTarget::Address(address), vec![]);
        let bytes = body_bytes(&body);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..], &address.to_bytes());
        assert_eq!(body.transaction_type(), TransactionType::ModifyAddressMetadata);
    }
}
