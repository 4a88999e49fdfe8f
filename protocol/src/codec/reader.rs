//! The offset-table reader.
//!
//! Walks a buffer produced by [`TableBuilder`](super::TableBuilder) (or any
//! writer of the same convention) without generated accessors: every field
//! lookup recomputes the vtable position from the object, then follows the
//! slot offset. All reads are bounds-checked; a buffer that points outside
//! itself is a [`CodecError::MalformedPayload`].

use super::schema::FieldKind;
use super::CodecError;

/// What a field lookup found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldData<'a> {
    /// The field was never written. Not an error.
    Absent,
    /// Raw bytes of a scalar, or the elements of a vector.
    Bytes(&'a [u8]),
    /// Object position of a nested table.
    Table(usize),
    /// Object positions of each table in a table vector.
    Tables(Vec<usize>),
}

/// The narrow interface the flattener reads through.
pub trait LayoutReader {
    /// Object position of the root table.
    fn root(&self) -> Result<usize, CodecError>;

    /// Look up the field in `slot` of the table at `object`.
    fn read_field(
        &self,
        object: usize,
        slot: usize,
        kind: FieldKind,
    ) -> Result<FieldData<'_>, CodecError>;
}

/// Bounds-checked reader over an intermediate buffer.
#[derive(Debug, Clone, Copy)]
pub struct TableReader<'a> {
    buf: &'a [u8],
}

impl<'a> TableReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn bytes(&self, at: usize, len: usize) -> Result<&'a [u8], CodecError> {
        at.checked_add(len)
            .and_then(|end| self.buf.get(at..end))
            .ok_or(CodecError::MalformedPayload {
                offset: at,
                needed: len,
                available: self.buf.len(),
            })
    }

    fn read_u16(&self, at: usize) -> Result<u16, CodecError> {
        let b = self.bytes(at, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&self, at: usize) -> Result<u32, CodecError> {
        let b = self.bytes(at, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i32(&self, at: usize) -> Result<i32, CodecError> {
        self.read_u32(at).map(|v| v as i32)
    }

    /// Follow a relative offset, failing if it leaves the buffer.
    fn follow(&self, at: usize, delta: i64) -> Result<usize, CodecError> {
        let target = at as i64 + delta;
        if target < 0 || target as usize >= self.buf.len() {
            return Err(CodecError::MalformedPayload {
                offset: at,
                needed: 0,
                available: self.buf.len(),
            });
        }
        Ok(target as usize)
    }

    /// Position of the slot's data inside the object, or `None` if absent.
    fn field_position(&self, object: usize, slot: usize) -> Result<Option<usize>, CodecError> {
        let vtable = self.follow(object, -i64::from(self.read_i32(object)?))?;
        let vtable_len = usize::from(self.read_u16(vtable)?);
        let entry = 4 + 2 * slot;
        if entry + 2 > vtable_len {
            return Ok(None);
        }
        match self.read_u16(vtable + entry)? {
            0 => Ok(None),
            offset => Ok(Some(object + usize::from(offset))),
        }
    }

    /// Resolve a vector at `field`: returns (element start, element count).
    fn vector(&self, field: usize) -> Result<(usize, usize), CodecError> {
        let start = self.follow(field, i64::from(self.read_u32(field)?))?;
        let count = self.read_u32(start)? as usize;
        Ok((start + 4, count))
    }
}

impl LayoutReader for TableReader<'_> {
    fn root(&self) -> Result<usize, CodecError> {
        self.follow(0, i64::from(self.read_u32(0)?))
    }

    fn read_field(
        &self,
        object: usize,
        slot: usize,
        kind: FieldKind,
    ) -> Result<FieldData<'_>, CodecError> {
        let Some(field) = self.field_position(object, slot)? else {
            return Ok(FieldData::Absent);
        };
        match kind {
            FieldKind::Scalar(width) => self.bytes(field, width).map(FieldData::Bytes),
            FieldKind::Vector(element_width) => {
                let (start, count) = self.vector(field)?;
                let len = count
                    .checked_mul(element_width)
                    .ok_or(CodecError::LayoutOverflow)?;
                self.bytes(start, len).map(FieldData::Bytes)
            }
            FieldKind::Table(_) => self
                .follow(field, i64::from(self.read_i32(field)?))
                .map(FieldData::Table),
            FieldKind::TableVector(_) => {
                let (start, count) = self.vector(field)?;
                // Each child needs at least its 4-byte offset.
                self.bytes(start, count.saturating_mul(4))?;
                let mut tables = Vec::with_capacity(count);
                for i in 0..count {
                    let at = start + 4 * i;
                    tables.push(self.follow(at, i64::from(self.read_u32(at)?))?);
                }
                Ok(FieldData::Tables(tables))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::schema::Field;
    use crate::codec::{LayoutWriter, TableBuilder};

    const ITEM: &[Field] = &[Field::scalar("kind", 1), Field::vector("data", 1)];
    const FIELDS: &[Field] = &[
        Field::scalar("flag", 2),
        Field::vector("id", 4),
        Field::table("item", ITEM),
        Field::table_vector("items", ITEM),
    ];

    fn sample() -> Vec<u8> {
        let mut b = TableBuilder::new(FIELDS.to_vec());
        b.write_u16("flag", 0x0102).unwrap();
        b.write_u64("id", 7).unwrap();
        b.write_table("item", |t| {
            t.write_u8("kind", 9)?;
            t.write_vector("data", b"abc")
        })
        .unwrap();
        b.write_table_vector("items", &[1u8, 2], |n, t| t.write_u8("kind", *n))
            .unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn test_reads_scalar_and_vector() {
        let buf = sample();
        let reader = TableReader::new(&buf);
        let root = reader.root().unwrap();
        assert_eq!(
            reader.read_field(root, 0, FieldKind::Scalar(2)).unwrap(),
            FieldData::Bytes(&[0x02, 0x01])
        );
        assert_eq!(
            reader.read_field(root, 1, FieldKind::Vector(4)).unwrap(),
            FieldData::Bytes(&[7, 0, 0, 0, 0, 0, 0, 0])
        );
    }

    #[test]
    fn test_reads_nested_tables() {
        let buf = sample();
        let reader = TableReader::new(&buf);
        let root = reader.root().unwrap();
        let FieldData::Table(item) = reader.read_field(root, 2, FieldKind::Table(ITEM)).unwrap()
        else {
            panic!("expected table");
        };
        assert_eq!(
            reader.read_field(item, 1, FieldKind::Vector(1)).unwrap(),
            FieldData::Bytes(b"abc")
        );
        let FieldData::Tables(items) = reader
            .read_field(root, 3, FieldKind::TableVector(ITEM))
            .unwrap()
        else {
            panic!("expected tables");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(
            reader.read_field(items[1], 0, FieldKind::Scalar(1)).unwrap(),
            FieldData::Bytes(&[2])
        );
        assert_eq!(
            reader.read_field(items[1], 1, FieldKind::Vector(1)).unwrap(),
            FieldData::Absent
        );
    }

    #[test]
    fn test_slot_beyond_vtable_is_absent() {
        let buf = sample();
        let reader = TableReader::new(&buf);
        let root = reader.root().unwrap();
        assert_eq!(
            reader.read_field(root, 40, FieldKind::Scalar(1)).unwrap(),
            FieldData::Absent
        );
    }

    #[test]
    fn test_truncated_buffer_is_malformed() {
        let buf = sample();
        let cut = &buf[..buf.len() - 3];
        let reader = TableReader::new(cut);
        let root = reader.root().unwrap();
        let err = reader
            .read_field(root, 3, FieldKind::TableVector(ITEM))
            .and_then(|data| match data {
                FieldData::Tables(items) => {
                    reader.read_field(items[1], 0, FieldKind::Scalar(1)).map(|_| ())
                }
                _ => Ok(()),
            })
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload { .. }));
    }

    #[test]
    fn test_empty_buffer_is_malformed() {
        let reader = TableReader::new(&[]);
        assert!(matches!(reader.root(), Err(CodecError::MalformedPayload { .. })));
    }

    #[test]
    fn test_root_pointing_outside_buffer() {
        let buf = [0xFF, 0, 0, 0, 0, 0];
        let reader = TableReader::new(&buf);
        assert!(matches!(reader.root(), Err(CodecError::MalformedPayload { .. })));
    }

    #[test]
    fn test_oversized_vector_count_is_malformed() {
        let mut buf = sample();
        let reader = TableReader::new(&buf);
        let root = reader.root().unwrap();
        let field = reader.field_position(root, 1).unwrap().unwrap();
        let (start, _) = reader.vector(field).unwrap();
        buf[start - 4..start].copy_from_slice(&u32::MAX.to_le_bytes());
        let reader = TableReader::new(&buf);
        let err = reader.read_field(root, 1, FieldKind::Vector(4)).unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload { .. }));
    }
}
