//! Schema records.
//!
//! The database bodies are arrays of records: ordered field lists whose
//! layout the schema decides per version epoch. A [`Record`] keeps its
//! fields in wire order under stable names, so a decoded file re-encodes
//! byte-for-byte even when some fields only exist under certain epochs.

use crate::error::EncodeError;
use crate::model::{Decimal, Ticks, Variant};

// ====================================================
// Record kinds
// ====================================================

/// The closed set of record shapes the schemas produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// One beatmap entry in the main database.
    Beatmap,
    /// One mod-combination difficulty rating in a beatmap's star cache.
    DifficultyRating,
    /// One uninherited or inherited timing point.
    TimingPoint,
    /// One sampled frame of a replay's life/score graph.
    ReplayGraph,
    /// One named collection in the collection database.
    Collection,
    /// One beatmap reference inside a collection.
    CollectionEntry,
}

impl RecordKind {
    /// Stable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Beatmap => "Beatmap",
            RecordKind::DifficultyRating => "DifficultyRating",
            RecordKind::TimingPoint => "TimingPoint",
            RecordKind::ReplayGraph => "ReplayGraph",
            RecordKind::Collection => "Collection",
            RecordKind::CollectionEntry => "CollectionEntry",
        }
    }
}

// ====================================================
// Field values
// ====================================================

/// One field value inside a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(Option<String>),
    Decimal(Decimal),
    Time(Ticks),
    Bytes(Vec<u8>),
    Variant(Variant),
    Records(Vec<Record>),
}

impl Field {
    fn type_name(&self) -> &'static str {
        match self {
            Field::Bool(_) => "bool",
            Field::U8(_) => "u8",
            Field::U16(_) => "u16",
            Field::U32(_) => "u32",
            Field::U64(_) => "u64",
            Field::I8(_) => "i8",
            Field::I16(_) => "i16",
            Field::I32(_) => "i32",
            Field::I64(_) => "i64",
            Field::F32(_) => "f32",
            Field::F64(_) => "f64",
            Field::Str(_) => "string",
            Field::Decimal(_) => "decimal",
            Field::Time(_) => "time",
            Field::Bytes(_) => "bytes",
            Field::Variant(_) => "variant",
            Field::Records(_) => "records",
        }
    }
}

// ====================================================
// Records
// ====================================================

/// An ordered, named field list of one [`RecordKind`].
///
/// Fields stay in the order they were pushed, which for decoded records is
/// wire order. Lookup is linear; records are small and short-lived.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: RecordKind,
    fields: Vec<(&'static str, Field)>,
}

impl Record {
    /// Creates an empty record of the given kind.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    /// Returns the record's kind.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Appends a field. Order is significant.
    pub fn push(&mut self, name: &'static str, value: Field) {
        self.fields.push((name, value));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, name: &'static str, value: Field) -> Self {
        self.push(name, value);
        self
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Returns true if a field with the given name is present.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates the fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Field)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn require(&self, field: &'static str) -> Result<&Field, EncodeError> {
        self.get(field).ok_or(EncodeError::MissingField {
            kind: self.kind.name(),
            field,
        })
    }

    fn mismatch(&self, field: &'static str, expected: &'static str, found: &Field) -> EncodeError {
        EncodeError::FieldType {
            kind: self.kind.name(),
            field,
            expected,
            found: found.type_name(),
        }
    }

    // Typed accessors, used by the schemas when re-encoding. A missing
    // field or a value of the wrong type is an encode error, not a panic.

    pub fn bool_field(&self, field: &'static str) -> Result<bool, EncodeError> {
        match self.require(field)? {
            Field::Bool(v) => Ok(*v),
            other => Err(self.mismatch(field, "bool", other)),
        }
    }

    pub fn u8_field(&self, field: &'static str) -> Result<u8, EncodeError> {
        match self.require(field)? {
            Field::U8(v) => Ok(*v),
            other => Err(self.mismatch(field, "u8", other)),
        }
    }

    pub fn u16_field(&self, field: &'static str) -> Result<u16, EncodeError> {
        match self.require(field)? {
            Field::U16(v) => Ok(*v),
            other => Err(self.mismatch(field, "u16", other)),
        }
    }

    pub fn u32_field(&self, field: &'static str) -> Result<u32, EncodeError> {
        match self.require(field)? {
            Field::U32(v) => Ok(*v),
            other => Err(self.mismatch(field, "u32", other)),
        }
    }

    pub fn i16_field(&self, field: &'static str) -> Result<i16, EncodeError> {
        match self.require(field)? {
            Field::I16(v) => Ok(*v),
            other => Err(self.mismatch(field, "i16", other)),
        }
    }

    pub fn i32_field(&self, field: &'static str) -> Result<i32, EncodeError> {
        match self.require(field)? {
            Field::I32(v) => Ok(*v),
            other => Err(self.mismatch(field, "i32", other)),
        }
    }

    pub fn f32_field(&self, field: &'static str) -> Result<f32, EncodeError> {
        match self.require(field)? {
            Field::F32(v) => Ok(*v),
            other => Err(self.mismatch(field, "f32", other)),
        }
    }

    pub fn f64_field(&self, field: &'static str) -> Result<f64, EncodeError> {
        match self.require(field)? {
            Field::F64(v) => Ok(*v),
            other => Err(self.mismatch(field, "f64", other)),
        }
    }

    pub fn str_field(&self, field: &'static str) -> Result<Option<&str>, EncodeError> {
        match self.require(field)? {
            Field::Str(v) => Ok(v.as_deref()),
            other => Err(self.mismatch(field, "string", other)),
        }
    }

    pub fn time_field(&self, field: &'static str) -> Result<Ticks, EncodeError> {
        match self.require(field)? {
            Field::Time(v) => Ok(*v),
            other => Err(self.mismatch(field, "time", other)),
        }
    }

    pub fn bytes_field(&self, field: &'static str) -> Result<&[u8], EncodeError> {
        match self.require(field)? {
            Field::Bytes(v) => Ok(v),
            other => Err(self.mismatch(field, "bytes", other)),
        }
    }

    pub fn variant_field(&self, field: &'static str) -> Result<&Variant, EncodeError> {
        match self.require(field)? {
            Field::Variant(v) => Ok(v),
            other => Err(self.mismatch(field, "variant", other)),
        }
    }

    pub fn records_field(&self, field: &'static str) -> Result<&[Record], EncodeError> {
        match self.require(field)? {
            Field::Records(v) => Ok(v),
            other => Err(self.mismatch(field, "records", other)),
        }
    }
}

// ====================================================
// Tests
// ====================================================
