//! The intermediate table builder.
//!
//! Encoders do not write wire bytes directly. They fill a [`TableBuilder`]
//! by field name, in whatever order is convenient, and [`TableBuilder::finish`]
//! serializes the result as a self-describing offset-table buffer:
//!
//! ```text
//! [root: u32]                          offset of the root object
//! per table:
//!   vtable  [len: u16][inline: u16][slot offset: u16; n]
//!   object  [soffset: i32 = object - vtable][inline fields...]
//! scalars live inline; vectors and tables are u32 forward offsets
//! vector  [count: u32][elements...]
//! tables  [count: u32][u32 offset to each child object...][children...]
//! ```
//!
//! A slot offset of 0 means the field was never written.

use super::schema::{Field, FieldKind, Schema};
use super::CodecError;

// ---------------------------------------------------------------------------
// LayoutWriter
// ---------------------------------------------------------------------------

/// The narrow interface encoders write through.
pub trait LayoutWriter: Sized {
    /// Store a fixed-width scalar. `value` must be exactly the declared width.
    fn write_scalar(&mut self, name: &str, value: &[u8]) -> Result<(), CodecError>;

    /// Store a vector. `value` must be a whole number of elements.
    fn write_vector(&mut self, name: &str, value: &[u8]) -> Result<(), CodecError>;

    /// Fill a nested table.
    fn write_table<F>(&mut self, name: &str, fill: F) -> Result<(), CodecError>
    where
        F: FnOnce(&mut Self) -> Result<(), CodecError>;

    /// Fill one nested table per item, preserving item order.
    fn write_table_vector<T, F>(
        &mut self,
        name: &str,
        items: &[T],
        fill: F,
    ) -> Result<(), CodecError>
    where
        F: FnMut(&T, &mut Self) -> Result<(), CodecError>;

    fn write_u8(&mut self, name: &str, value: u8) -> Result<(), CodecError> {
        self.write_scalar(name, &[value])
    }

    fn write_u16(&mut self, name: &str, value: u16) -> Result<(), CodecError> {
        self.write_scalar(name, &value.to_le_bytes())
    }

    fn write_u32(&mut self, name: &str, value: u32) -> Result<(), CodecError> {
        self.write_scalar(name, &value.to_le_bytes())
    }

    /// Store a 64-bit value as a vector of two 4-byte halves, low first.
    /// Little-endian halves in that order are exactly the value's
    /// little-endian bytes.
    fn write_u64(&mut self, name: &str, value: u64) -> Result<(), CodecError> {
        self.write_vector(name, &value.to_le_bytes())
    }
}

// ---------------------------------------------------------------------------
// TableBuilder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Value {
    Scalar(Vec<u8>),
    Vector { bytes: Vec<u8>, count: usize },
    Table(TableBuilder),
    Tables(Vec<TableBuilder>),
}

/// Collects field values for one table and serializes them.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    fields: Vec<Field>,
    values: Vec<Option<Value>>,
}

impl TableBuilder {
    pub fn new(fields: Vec<Field>) -> Self {
        let values = vec![None; fields.len()];
        Self { fields, values }
    }

    pub fn for_schema(schema: &Schema) -> Self {
        Self::new(schema.all_fields())
    }

    fn slot(&self, name: &str) -> Result<(usize, FieldKind), CodecError> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|slot| (slot, self.fields[slot].kind))
            .ok_or_else(|| CodecError::UnknownField(name.to_string()))
    }

    fn kind_mismatch(name: &str, expected: &'static str) -> CodecError {
        CodecError::FieldKindMismatch {
            field: name.to_string(),
            expected,
        }
    }

    /// Serialize into a fresh buffer with this table as the root.
    pub fn finish(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = vec![0u8; 4];
        let root = self.emit(&mut buf)?;
        patch_u32(&mut buf, 0, root)?;
        Ok(buf)
    }

    /// Append this table (vtable, object, then referenced data) to `buf` and
    /// return the object position.
    fn emit(&self, buf: &mut Vec<u8>) -> Result<usize, CodecError> {
        let mut inline_offsets = vec![0u16; self.fields.len()];
        let mut cursor = 4usize;
        for (slot, value) in self.values.iter().enumerate() {
            let Some(value) = value else { continue };
            inline_offsets[slot] = to_u16(cursor)?;
            cursor += match value {
                Value::Scalar(bytes) => bytes.len(),
                _ => 4,
            };
        }

        let vtable_pos = buf.len();
        buf.extend_from_slice(&to_u16(4 + 2 * self.fields.len())?.to_le_bytes());
        buf.extend_from_slice(&to_u16(cursor)?.to_le_bytes());
        for offset in &inline_offsets {
            buf.extend_from_slice(&offset.to_le_bytes());
        }

        let object_pos = buf.len();
        let soffset =
            i32::try_from(object_pos - vtable_pos).map_err(|_| CodecError::LayoutOverflow)?;
        buf.extend_from_slice(&soffset.to_le_bytes());

        let mut pending = Vec::new();
        for value in self.values.iter().flatten() {
            match value {
                Value::Scalar(bytes) => buf.extend_from_slice(bytes),
                other => {
                    pending.push((buf.len(), other));
                    buf.extend_from_slice(&[0u8; 4]);
                }
            }
        }

        for (placeholder, value) in pending {
            let target = match value {
                Value::Vector { bytes, count } => {
                    let start = buf.len();
                    buf.extend_from_slice(&to_u32(*count)?.to_le_bytes());
                    buf.extend_from_slice(bytes);
                    start
                }
                Value::Table(child) => child.emit(buf)?,
                Value::Tables(children) => {
                    let start = buf.len();
                    buf.extend_from_slice(&to_u32(children.len())?.to_le_bytes());
                    let offsets_start = buf.len();
                    buf.resize(offsets_start + 4 * children.len(), 0);
                    for (i, child) in children.iter().enumerate() {
                        let child_pos = child.emit(buf)?;
                        let at = offsets_start + 4 * i;
                        patch_u32(buf, at, child_pos - at)?;
                    }
                    start
                }
                Value::Scalar(_) => continue,
            };
            patch_u32(buf, placeholder, target - placeholder)?;
        }

        Ok(object_pos)
    }
}

impl LayoutWriter for TableBuilder {
    fn write_scalar(&mut self, name: &str, value: &[u8]) -> Result<(), CodecError> {
        let (slot, kind) = self.slot(name)?;
        let FieldKind::Scalar(width) = kind else {
            return Err(Self::kind_mismatch(name, "scalar"));
        };
        if value.len() != width {
            return Err(CodecError::WidthMismatch {
                field: name.to_string(),
                expected: width,
                actual: value.len(),
            });
        }
        self.values[slot] = Some(Value::Scalar(value.to_vec()));
        Ok(())
    }

    fn write_vector(&mut self, name: &str, value: &[u8]) -> Result<(), CodecError> {
        let (slot, kind) = self.slot(name)?;
        let FieldKind::Vector(element_width) = kind else {
            return Err(Self::kind_mismatch(name, "vector"));
        };
        if element_width == 0 || value.len() % element_width != 0 {
            return Err(CodecError::WidthMismatch {
                field: name.to_string(),
                expected: element_width,
                actual: value.len(),
            });
        }
        self.values[slot] = Some(Value::Vector {
            bytes: value.to_vec(),
            count: value.len() / element_width,
        });
        Ok(())
    }

    fn write_table<F>(&mut self, name: &str, fill: F) -> Result<(), CodecError>
    where
        F: FnOnce(&mut Self) -> Result<(), CodecError>,
    {
        let (slot, kind) = self.slot(name)?;
        let FieldKind::Table(fields) = kind else {
            return Err(Self::kind_mismatch(name, "table"));
        };
        let mut child = TableBuilder::new(fields.to_vec());
        fill(&mut child)?;
        self.values[slot] = Some(Value::Table(child));
        Ok(())
    }

    fn write_table_vector<T, F>(
        &mut self,
        name: &str,
        items: &[T],
        mut fill: F,
    ) -> Result<(), CodecError>
    where
        F: FnMut(&T, &mut Self) -> Result<(), CodecError>,
    {
        let (slot, kind) = self.slot(name)?;
        let FieldKind::TableVector(fields) = kind else {
            return Err(Self::kind_mismatch(name, "table vector"));
        };
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            let mut child = TableBuilder::new(fields.to_vec());
            fill(item, &mut child)?;
            children.push(child);
        }
        self.values[slot] = Some(Value::Tables(children));
        Ok(())
    }
}

fn to_u16(value: usize) -> Result<u16, CodecError> {
    u16::try_from(value).map_err(|_| CodecError::LayoutOverflow)
}

fn to_u32(value: usize) -> Result<u32, CodecError> {
    u32::try_from(value).map_err(|_| CodecError::LayoutOverflow)
}

fn patch_u32(buf: &mut [u8], at: usize, value: usize) -> Result<(), CodecError> {
    buf[at..at + 4].copy_from_slice(&to_u32(value)?.to_le_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &[Field] = &[Field::scalar("kind", 1), Field::vector("data", 1)];
    const FIELDS: &[Field] = &[
        Field::scalar("flag", 1),
        Field::vector("id", 4),
        Field::table("item", ITEM),
        Field::table_vector("items", ITEM),
    ];

    fn builder() -> TableBuilder {
        TableBuilder::new(FIELDS.to_vec())
    }

    fn read_u16(buf: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([buf[at], buf[at + 1]])
    }

    fn read_u32(buf: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    }

    #[test]
    fn test_empty_table_layout() {
        let buf = builder().finish().unwrap();
        // root offset, vtable (4 + 2 * 4 fields), soffset
        assert_eq!(buf.len(), 4 + 12 + 4);
        let root = read_u32(&buf, 0) as usize;
        assert_eq!(root, 16);
        assert_eq!(read_u16(&buf, 4), 12);
        assert_eq!(read_u16(&buf, 6), 4);
        for slot in 0..4 {
            assert_eq!(read_u16(&buf, 8 + 2 * slot), 0);
        }
    }

    #[test]
    fn test_scalar_is_inline() {
        let mut b = builder();
        b.write_u8("flag", 0xAB).unwrap();
        let buf = b.finish().unwrap();
        let root = read_u32(&buf, 0) as usize;
        let offset = read_u16(&buf, 8) as usize;
        assert_eq!(offset, 4);
        assert_eq!(buf[root + offset], 0xAB);
    }

    #[test]
    fn test_vector_is_length_prefixed() {
        let mut b = builder();
        b.write_u64("id", 0x0102_0304_0506_0708).unwrap();
        let buf = b.finish().unwrap();
        let root = read_u32(&buf, 0) as usize;
        let field = root + read_u16(&buf, 10) as usize;
        let start = field + read_u32(&buf, field) as usize;
        assert_eq!(read_u32(&buf, start), 2);
        assert_eq!(&buf[start + 4..start + 12], &[8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = builder().write_u8("nope", 1).unwrap_err();
        assert_eq!(err, CodecError::UnknownField("nope".into()));
    }

    #[test]
    fn test_scalar_width_enforced() {
        let err = builder().write_u16("flag", 1).unwrap_err();
        assert!(matches!(err, CodecError::WidthMismatch { expected: 1, actual: 2, .. }));
    }

    #[test]
    fn test_vector_element_width_enforced() {
        let err = builder().write_vector("id", &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, CodecError::WidthMismatch { expected: 4, actual: 3, .. }));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let err = builder().write_vector("flag", &[1]).unwrap_err();
        assert!(matches!(err, CodecError::FieldKindMismatch { expected: "vector", .. }));
        let err = builder().write_table("id", |_| Ok(())).unwrap_err();
        assert!(matches!(err, CodecError::FieldKindMismatch { expected: "table", .. }));
    }

    #[test]
    fn test_fill_error_propagates() {
        let err = builder()
            .write_table("item", |t| t.write_u32("kind", 1))
            .unwrap_err();
        assert!(matches!(err, CodecError::WidthMismatch { .. }));
    }
}
