//! Multisig account modification.
//!
//! Turns an account into a multisig account, or changes an existing one:
//! cosignatories are added or removed and the approval/removal thresholds
//! move by the given deltas. Nodes require every added cosignatory to opt
//! in, so this kind is normally announced inside a bonded aggregate.

use serde::{Deserialize, Serialize};

use super::{byte_count, BodyEncoder};
use crate::account::PublicAccount;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::transaction::types::TransactionType;

pub(crate) const MODIFICATION_FIELDS: &[Field] = &[
    Field::scalar("type", 1),
    Field::vector("cosignatory_public_key", 1),
];

const MULTISIG_FIELDS: &[Field] = &[
    Field::scalar("min_removal_delta", 1),
    Field::scalar("min_approval_delta", 1),
    Field::scalar("num_modifications", 1),
    Field::table_vector("modifications", MODIFICATION_FIELDS),
];

pub static MODIFY_MULTISIG_SCHEMA: Schema =
    Schema::transaction("modify_multisig_account", MULTISIG_FIELDS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MultisigModificationType {
    Add = 0,
    Remove = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosignatoryModification {
    pub modification_type: MultisigModificationType,
    pub cosignatory: PublicAccount,
}

impl CosignatoryModification {
    pub fn add(cosignatory: PublicAccount) -> Self {
        Self {
            modification_type: MultisigModificationType::Add,
            cosignatory,
        }
    }

    pub fn remove(cosignatory: PublicAccount) -> Self {
        Self {
            modification_type: MultisigModificationType::Remove,
            cosignatory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyMultisigBody {
    /// Signed change to the number of approvals a transaction needs.
    pub min_approval_delta: i8,
    /// Signed change to the number of approvals a removal needs.
    pub min_removal_delta: i8,
    pub modifications: Vec<CosignatoryModification>,
}

impl ModifyMultisigBody {
    pub fn new(
        min_approval_delta: i8,
        min_removal_delta: i8,
        modifications: Vec<CosignatoryModification>,
    ) -> Self {
        Self {
            min_approval_delta,
            min_removal_delta,
            modifications,
        }
    }
}

impl BodyEncoder for ModifyMultisigBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ModifyMultisigAccount
    }

    fn schema(&self) -> &'static Schema {
        &MODIFY_MULTISIG_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_scalar("min_approval_delta", &self.min_approval_delta.to_le_bytes())?;
        w.write_scalar("min_removal_delta", &self.min_removal_delta.to_le_bytes())?;
        w.write_u8(
            "num_modifications",
            byte_count("num_modifications", self.modifications.len())?,
        )?;
        w.write_table_vector("modifications", &self.modifications, |m, t| {
            t.write_u8("type", m.modification_type as u8)?;
            t.write_vector("cosignatory_public_key", m.cosignatory.public_key.as_bytes())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::NetworkType;
    use crate::crypto::PublicKey;
    use crate::transaction::kinds::body_bytes;

    fn cosignatory(fill: u8) -> PublicAccount {
        PublicAccount::new(PublicKey::from_bytes([fill; 32]), NetworkType::MijinTest)
    }

    #[test]
    fn test_removal_delta_comes_first() {
        let body = ModifyMultisigBody::new(2, -1, vec![]);
        assert_eq!(body_bytes(&body), vec![0xFF, 0x02, 0x00]);
    }

    #[test]
    fn test_modifications_layout() {
        let body = ModifyMultisigBody::new(
            1,
            1,
            vec![
                CosignatoryModification::add(cosignatory(0xAA)),
                CosignatoryModification::remove(cosignatory(0xBB)),
            ],
        );
        let bytes = body_bytes(&body);
        assert_eq!(bytes.len(), 3 + 2 * 33);
        assert_eq!(bytes[2], 2);
        assert_eq!(bytes[3], 0);
        assert_eq!(&bytes[4..36], &[0xAA; 32]);
        assert_eq!(bytes[36], 1);
        assert_eq!(&bytes[37..], &[0xBB; 32]);
    }
}
