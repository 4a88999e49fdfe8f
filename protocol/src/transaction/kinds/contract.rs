//! Contract modification.
//!
//! A contract is a multisig-like account whose participants come in three
//! roles: customers, executors and verifiers. Each role's membership is
//! changed with the same add/remove modifications multisig accounts use.

use serde::{Deserialize, Serialize};

use super::multisig::MODIFICATION_FIELDS;
use super::{byte_count, BodyEncoder, CosignatoryModification};
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::transaction::types::TransactionType;

const CONTRACT_FIELDS: &[Field] = &[
    Field::vector("duration_delta", 4),
    Field::vector("hash", 1),
    Field::scalar("num_customers", 1),
    Field::scalar("num_executors", 1),
    Field::scalar("num_verifiers", 1),
    Field::table_vector("customers", MODIFICATION_FIELDS),
    Field::table_vector("executors", MODIFICATION_FIELDS),
    Field::table_vector("verifiers", MODIFICATION_FIELDS),
];

pub static MODIFY_CONTRACT_SCHEMA: Schema = Schema::transaction("modify_contract", CONTRACT_FIELDS);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyContractBody {
    /// Signed change to the contract's lifetime in blocks.
    pub duration_delta: i64,
    /// Content hash as text. Nodes receive its UTF-8 bytes unchanged.
    pub content_hash: String,
    pub customers: Vec<CosignatoryModification>,
    pub executors: Vec<CosignatoryModification>,
    pub verifiers: Vec<CosignatoryModification>,
}

impl ModifyContractBody {
    pub fn new(duration_delta: i64, content_hash: impl Into<String>) -> Self {
        Self {
            duration_delta,
            content_hash: content_hash.into(),
            customers: Vec::new(),
            executors: Vec::new(),
            verifiers: Vec::new(),
        }
    }

    pub fn customers(mut self, customers: Vec<CosignatoryModification>) -> Self {
        self.customers = customers;
        self
    }

    pub fn executors(mut self, executors: Vec<CosignatoryModification>) -> Self {
        self.executors = executors;
        self
    }

    pub fn verifiers(mut self, verifiers: Vec<CosignatoryModification>) -> Self {
        self.verifiers = verifiers;
        self
    }
}

fn write_modifications<W: LayoutWriter>(
    w: &mut W,
    name: &str,
    modifications: &[CosignatoryModification],
) -> Result<(), CodecError> {
    w.write_table_vector(name, modifications, |m, t| {
        t.write_u8("type", m.modification_type as u8)?;
        t.write_vector("cosignatory_public_key", m.cosignatory.public_key.as_bytes())
    })
}

impl BodyEncoder for ModifyContractBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ModifyContract
    }

    fn schema(&self) -> &'static Schema {
        &MODIFY_CONTRACT_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_u64("duration_delta", self.duration_delta as u64)?;
        w.write_vector("hash", self.content_hash.as_bytes())?;
        w.write_u8("num_customers", byte_count("num_customers", self.customers.len())?)?;
        w.write_u8("num_executors", byte_count("num_executors", self.executors.len())?)?;
        w.write_u8("num_verifiers", byte_count("num_verifiers", self.verifiers.len())?)?;
        write_modifications(w, "customers", &self.customers)?;
        write_modifications(w, "executors", &self.executors)?;
        write_modifications(w, "verifiers", &self.verifiers)
    }
}
