//! # Binary Layout Codec
//!
//! The network's wire format is a fixed, C-struct-like layout: fields
//! follow each other in a prescribed order with no tags and no padding.
//! Building that directly is brittle, so encoders go through two steps:
//!
//! 1. Fill a [`TableBuilder`] by field name. It produces a self-describing
//!    offset-table buffer in which every field can be found independently.
//! 2. [`flatten`] walks the declared [`Schema`] and, slot by slot, pulls each
//!    field out of that buffer through a [`LayoutReader`], concatenating the
//!    raw bytes in schema order.
//!
//! The intermediate buffer's own ordering never reaches the wire.
//!
//! ## Absent fields vs. broken buffers
//!
//! A field that was never written (zero slot offset, or a slot past the end
//! of a short vtable) is legitimate and flattens to its natural default:
//! `width` zero bytes for a scalar, nothing for a vector or table vector,
//! and recursively-absent fields for a table. A buffer whose offsets point
//! outside itself is *not* legitimate and fails with
//! [`CodecError::MalformedPayload`] instead of producing short output.

pub mod builder;
pub mod reader;
pub mod schema;

pub use builder::{LayoutWriter, TableBuilder};
pub use reader::{FieldData, LayoutReader, TableReader};
pub use schema::{Field, FieldKind, Schema, HEADER_FIELDS};

use thiserror::Error;
use tracing::trace;

/// Errors from building or flattening a layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A read ran past the end of the buffer or an offset pointed outside it.
    #[error("malformed payload: need {needed} bytes at offset {offset}, buffer holds {available}")]
    MalformedPayload {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The schema has no field with this name.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// The field exists but is a different kind.
    #[error("field '{field}' is not a {expected}")]
    FieldKindMismatch { field: String, expected: &'static str },

    /// Scalar width or vector element width does not match the schema.
    #[error("field '{field}' expects width {expected}, got {actual} bytes")]
    WidthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// An offset or length does not fit its on-buffer integer type.
    #[error("layout offset overflow")]
    LayoutOverflow,

    /// The reader returned data of a different shape than the schema field.
    #[error("field '{0}' has an unexpected shape in the buffer")]
    ShapeMismatch(&'static str),

    /// A count or length is too large for the field that carries it.
    #[error("field '{field}' holds at most {max}, got {actual}")]
    ValueOutOfRange {
        field: &'static str,
        max: u64,
        actual: usize,
    },
}

impl CodecError {
    pub(crate) fn out_of_range(field: &'static str, max: u64, actual: usize) -> Self {
        Self::ValueOutOfRange { field, max, actual }
    }
}

/// Flatten the root table of `reader` into wire order per `fields`.
pub fn flatten<R: LayoutReader>(reader: &R, fields: &[Field]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    let root = reader.root()?;
    flatten_table(reader, Some(root), fields, &mut out)?;
    Ok(out)
}

fn flatten_table<R: LayoutReader>(
    reader: &R,
    object: Option<usize>,
    fields: &[Field],
    out: &mut Vec<u8>,
) -> Result<(), CodecError> {
    for (slot, field) in fields.iter().enumerate() {
        let data = match object {
            Some(object) => reader.read_field(object, slot, field.kind)?,
            None => FieldData::Absent,
        };
        match (field.kind, data) {
            (FieldKind::Scalar(width), FieldData::Absent) => out.resize(out.len() + width, 0),
            (FieldKind::Scalar(_) | FieldKind::Vector(_), FieldData::Bytes(bytes)) => {
                out.extend_from_slice(bytes)
            }
            (FieldKind::Vector(_) | FieldKind::TableVector(_), FieldData::Absent) => {}
            (FieldKind::Table(nested), FieldData::Table(child)) => {
                flatten_table(reader, Some(child), nested, out)?
            }
            (FieldKind::Table(nested), FieldData::Absent) => {
                flatten_table(reader, None, nested, out)?
            }
            (FieldKind::TableVector(nested), FieldData::Tables(children)) => {
                for child in children {
                    flatten_table(reader, Some(child), nested, out)?;
                }
            }
            _ => return Err(CodecError::ShapeMismatch(field.name)),
        }
    }
    Ok(())
}

/// Build, serialize, and flatten in one go.
///
/// `fill` writes the fields of `schema` into a fresh builder; the result is
/// the canonical wire bytes.
pub fn encode<F>(schema: &Schema, fill: F) -> Result<Vec<u8>, CodecError>
where
    F: FnOnce(&mut TableBuilder) -> Result<(), CodecError>,
{
    let mut builder = TableBuilder::for_schema(schema);
    fill(&mut builder)?;
    let intermediate = builder.finish()?;
    let fields = schema.all_fields();
    let wire = flatten(&TableReader::new(&intermediate), &fields)?;
    trace!(
        schema = schema.name,
        intermediate_len = intermediate.len(),
        wire_len = wire.len(),
        "flattened layout"
    );
    Ok(wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PAIR: &[Field] = &[Field::vector("id", 4), Field::vector("amount", 4)];
    const MESSAGE: &[Field] = &[Field::scalar("type", 1), Field::vector("payload", 1)];
    const BODY: &[Field] = &[
        Field::vector("recipient", 1),
        Field::scalar("count", 1),
        Field::table("message", MESSAGE),
        Field::table_vector("pairs", PAIR),
    ];
    const SCHEMA: Schema = Schema::bare("demo", BODY);

    #[test]
    fn test_output_follows_schema_order_not_write_order() {
        let wire = encode(&SCHEMA, |b| {
            // Deliberately written back to front.
            b.write_table_vector("pairs", &[(1u64, 2u64)], |(id, amount), t| {
                t.write_u64("amount", *amount)?;
                t.write_u64("id", *id)
            })?;
            b.write_table("message", |t| {
                t.write_vector("payload", b"hi")?;
                t.write_u8("type", 0)
            })?;
            b.write_u8("count", 1)?;
            b.write_vector("recipient", &[0xAA, 0xBB])
        })
        .unwrap();

        let mut expected = vec![0xAA, 0xBB, 1, 0, b'h', b'i'];
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.extend_from_slice(&2u64.to_le_bytes());
        assert_eq!(wire, expected);
    }

    #[test]
    fn test_absent_fields_use_defaults() {
        let wire = encode(&SCHEMA, |b| b.write_u8("count", 3)).unwrap();
        // recipient: nothing; count: 3; message.type: one zero byte;
        // message.payload: nothing; pairs: nothing.
        assert_eq!(wire, vec![3, 0]);
    }

    #[test]
    fn test_header_schema_widths() {
        let schema = Schema::transaction("header-only", &[]);
        let wire = encode(&schema, |b| {
            b.write_u32("size", 120)?;
            b.write_vector("signature", &[0u8; 64])?;
            b.write_vector("signer", &[0u8; 32])?;
            b.write_u16("version", 0x9003)?;
            b.write_u16("type", 0x4154)?;
            b.write_u64("max_fee", 0)?;
            b.write_u64("deadline", 1)
        })
        .unwrap();
        assert_eq!(wire.len(), 120);
        assert_eq!(&wire[..4], &[120, 0, 0, 0]);
        assert_eq!(&wire[100..104], &[0x03, 0x90, 0x54, 0x41]);
        assert_eq!(&wire[112..120], &[1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_table_vector_preserves_item_order() {
        let items = [(3u64, 30u64), (1, 10), (2, 20)];
        let wire = encode(&SCHEMA, |b| {
            b.write_table_vector("pairs", &items, |(id, amount), t| {
                t.write_u64("id", *id)?;
                t.write_u64("amount", *amount)
            })
        })
        .unwrap();
        // count scalar + message.type default, then the pairs.
        let pairs = &wire[2..];
        let ids: Vec<u64> = pairs
            .chunks(16)
            .map(|c| u64::from_le_bytes(c[..8].try_into().unwrap()))
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    /// A reader that claims every field is a nested table, to exercise the
    /// shape check.
    struct LyingReader;

    impl LayoutReader for LyingReader {
        fn root(&self) -> Result<usize, CodecError> {
            Ok(0)
        }

        fn read_field(
            &self,
            _object: usize,
            _slot: usize,
            _kind: FieldKind,
        ) -> Result<FieldData<'_>, CodecError> {
            Ok(FieldData::Table(0))
        }
    }

    #[test]
    fn test_shape_mismatch_detected() {
        let err = flatten(&LyingReader, BODY).unwrap_err();
        assert_eq!(err, CodecError::ShapeMismatch("recipient"));
    }

    proptest! {
        #[test]
        fn prop_flatten_concatenates_in_schema_order(
            recipient in proptest::collection::vec(any::<u8>(), 0..40),
            count in any::<u8>(),
            kind in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..64),
            pairs in proptest::collection::vec((any::<u64>(), any::<u64>()), 0..8),
        ) {
            let wire = encode(&SCHEMA, |b| {
                b.write_vector("recipient", &recipient)?;
                b.write_u8("count", count)?;
                b.write_table("message", |t| {
                    t.write_u8("type", kind)?;
                    t.write_vector("payload", &payload)
                })?;
                b.write_table_vector("pairs", &pairs, |(id, amount), t| {
                    t.write_u64("id", *id)?;
                    t.write_u64("amount", *amount)
                })
            }).unwrap();

            let mut expected = recipient.clone();
            expected.push(count);
            expected.push(kind);
            expected.extend_from_slice(&payload);
            for (id, amount) in &pairs {
                expected.extend_from_slice(&id.to_le_bytes());
                expected.extend_from_slice(&amount.to_le_bytes());
            }
            prop_assert_eq!(wire, expected);
        }
    }
}
