//! The tag-dispatched variant value type.
//!
//! A variant is a one-byte tag followed by the payload of the primitive the
//! tag selects. The table is closed: one enum case per wire tag, matched
//! exhaustively at the codec.

use crate::model::{Decimal, Ticks};

/// One wire slot capable of holding any supported primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// Tag 0 — no value.
    Null,
    /// Tag 1.
    Bool(bool),
    /// Tag 2.
    U8(u8),
    /// Tag 3.
    U16(u16),
    /// Tag 4.
    U32(u32),
    /// Tag 5.
    U64(u64),
    /// Tag 6.
    I8(i8),
    /// Tag 7.
    I16(i16),
    /// Tag 8.
    I32(i32),
    /// Tag 9.
    I64(i64),
    /// Tag 10 — a single raw character byte.
    Char(u8),
    /// Tag 11 — an optional length-prefixed string.
    String(Option<String>),
    /// Tag 12.
    F32(f32),
    /// Tag 13.
    F64(f64),
    /// Tag 14 — a 16-byte decimal.
    Decimal(Decimal),
    /// Tag 15 — an 8-byte tick timestamp.
    Time(Ticks),
    /// Tag 16 — a length-prefixed byte array.
    ByteArray(Vec<u8>),
    /// Tag 17 — a length-prefixed character array.
    CharArray(Vec<u8>),
}

impl Variant {
    /// Returns the wire tag for this variant.
    pub fn tag(&self) -> u8 {
        match self {
            Variant::Null => 0,
            Variant::Bool(_) => 1,
            Variant::U8(_) => 2,
            Variant::U16(_) => 3,
            Variant::U32(_) => 4,
            Variant::U64(_) => 5,
            Variant::I8(_) => 6,
            Variant::I16(_) => 7,
            Variant::I32(_) => 8,
            Variant::I64(_) => 9,
            Variant::Char(_) => 10,
            Variant::String(_) => 11,
            Variant::F32(_) => 12,
            Variant::F64(_) => 13,
            Variant::Decimal(_) => 14,
            Variant::Time(_) => 15,
            Variant::ByteArray(_) => 16,
            Variant::CharArray(_) => 17,
        }
    }
}
