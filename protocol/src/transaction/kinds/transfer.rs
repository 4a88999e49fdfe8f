//! Transfers: move mosaics and/or a message to a recipient.
//!
//! ```text
//! recipient      25 bytes
//! message_size    u16   payload length + 1 (the type byte)
//! mosaics_count    u8
//! message.type     u8
//! message.payload  …
//! mosaics        [id u64, amount u64] × count
//! ```

use serde::{Deserialize, Serialize};

use super::{byte_count, short_count, BodyEncoder, MOSAIC_FIELDS};
use crate::account::Address;
use crate::codec::{CodecError, Field, LayoutWriter, Schema};
use crate::config::{ADDRESS_LENGTH, NAMESPACE_RECIPIENT_PREFIX};
use crate::id::{Mosaic, NamespaceId};
use crate::transaction::types::TransactionType;

const MESSAGE_FIELDS: &[Field] = &[Field::scalar("type", 1), Field::vector("payload", 1)];

const TRANSFER_FIELDS: &[Field] = &[
    Field::vector("recipient", 1),
    Field::scalar("message_size", 2),
    Field::scalar("num_mosaics", 1),
    Field::table("message", MESSAGE_FIELDS),
    Field::table_vector("mosaics", MOSAIC_FIELDS),
];

pub static TRANSFER_SCHEMA: Schema = Schema::transaction("transfer", TRANSFER_FIELDS);

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Where a transfer goes: straight to an address, or to whatever address a
/// namespace is aliased to at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    Address(Address),
    Namespace(NamespaceId),
}

impl Recipient {
    /// The 25 bytes written on the wire. An alias is the prefix byte, the
    /// namespace id in little-endian, then zero padding.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        match self {
            Self::Address(address) => address.to_bytes(),
            Self::Namespace(namespace_id) => {
                let mut bytes = [0u8; ADDRESS_LENGTH];
                bytes[0] = NAMESPACE_RECIPIENT_PREFIX;
                bytes[1..9].copy_from_slice(&namespace_id.to_u64().to_le_bytes());
                bytes
            }
        }
    }
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<NamespaceId> for Recipient {
    fn from(namespace_id: NamespaceId) -> Self {
        Self::Namespace(namespace_id)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MessageType {
    Plain = 0,
    /// Payload already encrypted for the recipient by the caller.
    Secure = 1,
}

/// A message attached to a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub message_type: MessageType,
    pub payload: Vec<u8>,
}

impl Message {
    /// UTF-8 text, sent in the clear.
    pub fn plain(text: &str) -> Self {
        Self {
            message_type: MessageType::Plain,
            payload: text.as_bytes().to_vec(),
        }
    }

    /// An empty plain message.
    pub fn empty() -> Self {
        Self::plain("")
    }

    /// Bytes the caller has already encrypted.
    pub fn secure(ciphertext: Vec<u8>) -> Self {
        Self {
            message_type: MessageType::Secure,
            payload: ciphertext,
        }
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// TransferBody
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferBody {
    pub recipient: Recipient,
    /// Written in the order given.
    pub mosaics: Vec<Mosaic>,
    pub message: Message,
}

impl TransferBody {
    pub fn new(recipient: impl Into<Recipient>, mosaics: Vec<Mosaic>, message: Message) -> Self {
        Self {
            recipient: recipient.into(),
            mosaics,
            message,
        }
    }
}

impl BodyEncoder for TransferBody {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::Transfer
    }

    fn schema(&self) -> &'static Schema {
        &TRANSFER_SCHEMA
    }

    fn write_body<W: LayoutWriter>(&self, w: &mut W) -> Result<(), CodecError> {
        w.write_vector("recipient", &self.recipient.to_bytes())?;
        w.write_u16(
            "message_size",
            short_count("message_size", self.message.payload.len() + 1)?,
        )?;
        w.write_u8("num_mosaics", byte_count("num_mosaics", self.mosaics.len())?)?;
        w.write_table("message", |m| {
            m.write_u8("type", self.message.message_type as u8)?;
            m.write_vector("payload", &self.message.payload)
        })?;
        w.write_table_vector("mosaics", &self.mosaics, |mosaic, t| {
            t.write_u64("id", mosaic.id.to_u64())?;
            t.write_u64("amount", mosaic.amount)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::MosaicId;
    use crate::transaction::kinds::body_bytes;

    const RECIPIENT: &str = "SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM";

    fn recipient() -> Address {
        Address::from_raw(RECIPIENT).unwrap()
    }

    #[test]
    fn test_reference_body() {
        let body = TransferBody::new(
            recipient(),
            vec![Mosaic::new(MosaicId::new(95442763262823), 100)],
            Message::empty(),
        );
        assert_eq!(
            hex::encode_upper(body_bytes(&body)),
            "90E8FEBD671DD41BEE94EC3BA5831CB608A312C2F203BA84AC\
             01000100672B0000CE5600006400000000000000"
        );
    }

    #[test]
    fn test_message_size_counts_type_byte() {
        let body = TransferBody::new(recipient(), vec![], Message::plain("hi"));
        let bytes = body_bytes(&body);
        assert_eq!(&bytes[25..27], &[3, 0]);
        assert_eq!(bytes[27], 0);
        assert_eq!(&bytes[28..], &[0, b'h', b'i']);
    }

    #[test]
    fn test_mosaics_keep_caller_order() {
        let body = TransferBody::new(
            recipient(),
            vec![
                Mosaic::new(MosaicId::new(9), 1),
                Mosaic::new(MosaicId::new(3), 2),
            ],
            Message::empty(),
        );
        let bytes = body_bytes(&body);
        let mosaics = &bytes[29..];
        assert_eq!(mosaics.len(), 32);
        assert_eq!(mosaics[0], 9);
        assert_eq!(mosaics[16], 3);
    }

    #[test]
    fn test_namespace_recipient_bytes() {
        let ns = NamespaceId::new(-8884663987180930485);
        let bytes = Recipient::from(ns).to_bytes();
        assert_eq!(bytes[0], 0x91);
        assert_eq!(&bytes[1..9], &ns.to_u64().to_le_bytes());
        assert!(bytes[9..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_secure_message_type() {
        let body = TransferBody::new(recipient(), vec![], Message::secure(vec![0xAB]));
        let bytes = body_bytes(&body);
        assert_eq!(&bytes[28..], &[1, 0xAB]);
    }

    #[test]
    fn test_too_many_mosaics_rejected() {
        let mosaics = vec![Mosaic::new(MosaicId::new(1), 1); 256];
        let body = TransferBody::new(recipient(), mosaics, Message::empty());
        let schema = body.schema();
        let bare = Schema::bare(schema.name, schema.fields);
        let err = crate::codec::encode(&bare, |b| body.write_body(b)).unwrap_err();
        assert!(matches!(err, CodecError::ValueOutOfRange { field: "num_mosaics", .. }));
    }
}
