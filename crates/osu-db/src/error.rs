//! Error types for database decoding and encoding.

use thiserror::Error;

use crate::model::RecordKind;

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Fewer bytes remain than a read requires. The cursor position is left
    /// where it was before the failed read, so the caller may retry at a
    /// coarser granularity.
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    /// The input ended in the middle of a variable-length integer.
    #[error("input ended mid-varint while reading {context}")]
    TruncatedVarint { context: &'static str },

    #[error("varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("varint overflow (value exceeds u64)")]
    VarintOverflow,

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    /// Variant tag 18 marks a value the client's internal object serializer
    /// produced. It carries no decodable payload.
    #[error("variant tag {tag} (serialized object) is not supported")]
    UnsupportedVariant { tag: u8 },

    /// A variant tag outside the defined table (> 18) was read. Undefined
    /// tags are never skipped.
    #[error("invalid variant tag {tag}")]
    InvalidVariantTag { tag: u8 },

    /// A signed length or count prefix was negative.
    #[error("{field} has negative length {len}")]
    NegativeLength { field: &'static str, len: i32 },

    /// A decimal's flags word declares a base-10 scale outside 0..=28.
    #[error("decimal scale {scale} out of range (maximum 28)")]
    DecimalScaleOutOfRange { scale: u8 },

    /// The version epoch fell in a range for which no field layout is
    /// defined. This indicates a schema logic gap, not a corrupt file.
    #[error("version {version} falls outside the defined gate table for {context}")]
    SchemaGap { context: &'static str, version: i32 },
}

/// Error during binary encoding.
///
/// Every variant is raised before the offending structure emits any bytes,
/// so a failed encode never leaves a partially written array behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A record array contained more than one record kind.
    #[error("record array mixes kinds: expected {expected:?}, found {found:?}")]
    MixedRecordKind {
        expected: RecordKind,
        found: RecordKind,
    },

    #[error("missing field {field} on {kind} record")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("field {field} on {kind} record is a {found}, expected {expected}")]
    FieldType {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
