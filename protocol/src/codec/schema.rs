//! Schema descriptors.
//!
//! A schema is plain ordered data: a list of named fields, each a scalar,
//! a byte vector, a nested table, or a vector of nested tables. The order
//! of the list *is* the wire order. Field slots in the intermediate buffer
//! are the indices into that list.

/// Shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-width little-endian value stored inline.
    Scalar(usize),
    /// Length-prefixed run of elements, each `n` bytes wide.
    Vector(usize),
    /// A nested table with its own fields.
    Table(&'static [Field]),
    /// A length-prefixed run of nested tables, all with the same fields.
    TableVector(&'static [Field]),
}

/// One named field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn scalar(name: &'static str, width: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar(width),
        }
    }

    pub const fn vector(name: &'static str, element_width: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Vector(element_width),
        }
    }

    pub const fn table(name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name,
            kind: FieldKind::Table(fields),
        }
    }

    pub const fn table_vector(name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name,
            kind: FieldKind::TableVector(fields),
        }
    }
}

/// The common transaction header, in wire order.
///
/// Signature and signer are zero-filled in the unsigned bytes; the 64-bit
/// fee and deadline are vectors of two 4-byte halves.
pub const HEADER_FIELDS: &[Field] = &[
    Field::scalar("size", 4),
    Field::vector("signature", 1),
    Field::vector("signer", 1),
    Field::scalar("version", 2),
    Field::scalar("type", 2),
    Field::vector("max_fee", 4),
    Field::vector("deadline", 4),
];

/// A complete top-level layout: a fixed prefix (usually the header)
/// followed by the kind-specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub prefix: &'static [Field],
    pub fields: &'static [Field],
}

impl Schema {
    /// A transaction schema: [`HEADER_FIELDS`] followed by `fields`.
    pub const fn transaction(name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name,
            prefix: HEADER_FIELDS,
            fields,
        }
    }

    /// A schema with no header prefix.
    pub const fn bare(name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name,
            prefix: &[],
            fields,
        }
    }

    /// All fields in slot order.
    pub fn all_fields(&self) -> Vec<Field> {
        self.prefix.iter().chain(self.fields).copied().collect()
    }
}
