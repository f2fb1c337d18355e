//! Tagged variant encoding.
//!
//! A variant slot is a one-byte tag in `0..=17` followed by that tag's
//! payload. Tag 18 marks a value the producing serializer could not encode;
//! it carries no payload and cannot be decoded into a value. Tags above 18
//! are not part of the table at all.

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::model::{Decimal, Ticks, Variant};

// ====================================================
// Wire tags
// ====================================================

pub const TAG_NULL: u8 = 0;
pub const TAG_BOOL: u8 = 1;
pub const TAG_U8: u8 = 2;
pub const TAG_U16: u8 = 3;
pub const TAG_U32: u8 = 4;
pub const TAG_U64: u8 = 5;
pub const TAG_I8: u8 = 6;
pub const TAG_I16: u8 = 7;
pub const TAG_I32: u8 = 8;
pub const TAG_I64: u8 = 9;
pub const TAG_CHAR: u8 = 10;
pub const TAG_STRING: u8 = 11;
pub const TAG_F32: u8 = 12;
pub const TAG_F64: u8 = 13;
pub const TAG_DECIMAL: u8 = 14;
pub const TAG_TIME: u8 = 15;
pub const TAG_BYTE_ARRAY: u8 = 16;
pub const TAG_CHAR_ARRAY: u8 = 17;
/// Sentinel written by serializers for values they cannot represent.
pub const TAG_UNSUPPORTED: u8 = 18;

// ====================================================
// Decoding
// ====================================================

/// Reads one tagged variant from the cursor.
pub fn decode_variant(r: &mut Reader<'_>) -> Result<Variant, DecodeError> {
    let tag = r.read_u8("variant tag")?;
    let value = match tag {
        TAG_NULL => Variant::Null,
        TAG_BOOL => Variant::Bool(r.read_bool("bool variant")?),
        TAG_U8 => Variant::U8(r.read_u8("u8 variant")?),
        TAG_U16 => Variant::U16(r.read_u16("u16 variant")?),
        TAG_U32 => Variant::U32(r.read_u32("u32 variant")?),
        TAG_U64 => Variant::U64(r.read_u64("u64 variant")?),
        TAG_I8 => Variant::I8(r.read_i8("i8 variant")?),
        TAG_I16 => Variant::I16(r.read_i16("i16 variant")?),
        TAG_I32 => Variant::I32(r.read_i32("i32 variant")?),
        TAG_I64 => Variant::I64(r.read_i64("i64 variant")?),
        TAG_CHAR => Variant::Char(r.read_u8("char variant")?),
        // The string payload is a full optional string, flag byte included.
        TAG_STRING => Variant::String(r.read_optional_string("string variant")?),
        TAG_F32 => Variant::F32(r.read_f32("f32 variant")?),
        TAG_F64 => Variant::F64(r.read_f64("f64 variant")?),
        TAG_DECIMAL => {
            let bytes = r.read_bytes(16, "decimal variant")?;
            let mut buf = [0u8; 16];
            buf.copy_from_slice(bytes);
            Variant::Decimal(Decimal::from_bytes(buf))
        }
        TAG_TIME => Variant::Time(Ticks(r.read_u64("time variant")?)),
        TAG_BYTE_ARRAY => Variant::ByteArray(r.read_byte_array("byte array variant")?),
        TAG_CHAR_ARRAY => Variant::CharArray(r.read_byte_array("char array variant")?),
        TAG_UNSUPPORTED => return Err(DecodeError::UnsupportedVariant { tag }),
        _ => return Err(DecodeError::InvalidVariantTag { tag }),
    };
    Ok(value)
}

// ====================================================
// Encoding
// ====================================================

/// Writes one tagged variant to the buffer.
pub fn encode_variant(w: &mut Writer, value: &Variant) {
    w.write_u8(value.tag());
    match value {
        Variant::Null => {}
        Variant::Bool(v) => w.write_bool(*v),
        Variant::U8(v) => w.write_u8(*v),
        Variant::U16(v) => w.write_u16(*v),
        Variant::U32(v) => w.write_u32(*v),
        Variant::U64(v) => w.write_u64(*v),
        Variant::I8(v) => w.write_i8(*v),
        Variant::I16(v) => w.write_i16(*v),
        Variant::I32(v) => w.write_i32(*v),
        Variant::I64(v) => w.write_i64(*v),
        Variant::Char(v) => w.write_u8(*v),
        Variant::String(v) => w.write_optional_string(v.as_deref()),
        Variant::F32(v) => w.write_f32(*v),
        Variant::F64(v) => w.write_f64(*v),
        Variant::Decimal(v) => w.write_bytes(&v.to_bytes()),
        Variant::Time(v) => w.write_u64(v.0),
        Variant::ByteArray(v) => w.write_byte_array(v),
        Variant::CharArray(v) => w.write_byte_array(v),
    }
}

// ====================================================
// Tests
// ====================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: Variant) -> Vec<u8> {
        let mut w = Writer::new();
        encode_variant(&mut w, &value);
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes);
        let decoded = decode_variant(&mut r).unwrap();
        assert_eq!(decoded, value);
        assert!(r.is_empty());
        bytes
    }

    #[test]
    fn null_is_a_single_byte() {
        let bytes = roundtrip(Variant::Null);
        assert_eq!(bytes, vec![0x00]);
    }

    #[test]
    fn scalar_roundtrips() {
        roundtrip(Variant::Bool(true));
        roundtrip(Variant::U8(0xfe));
        roundtrip(Variant::U16(0xbeef));
        roundtrip(Variant::U32(0xdead_beef));
        roundtrip(Variant::U64(u64::MAX));
        roundtrip(Variant::I8(-1));
        roundtrip(Variant::I16(-2));
        roundtrip(Variant::I32(-3));
        roundtrip(Variant::I64(i64::MIN));
        roundtrip(Variant::Char(b'x'));
        roundtrip(Variant::F32(1.5));
        roundtrip(Variant::F64(-2.25));
        roundtrip(Variant::Time(Ticks(635_000_000_000_000_000)));
    }

    #[test]
    fn string_payload_carries_its_own_flag_byte() {
        let bytes = roundtrip(Variant::String(Some("ok".to_owned())));
        assert_eq!(bytes, vec![TAG_STRING, 0x0b, 0x02, b'o', b'k']);

        let bytes = roundtrip(Variant::String(None));
        assert_eq!(bytes, vec![TAG_STRING, 0x00]);
    }

    #[test]
    fn arrays_and_decimal_roundtrip() {
        roundtrip(Variant::ByteArray(vec![1, 2, 3]));
        roundtrip(Variant::CharArray(vec![b'a', b'b']));
        roundtrip(Variant::Decimal(Decimal::new(123, 0, 0, 2 << 16)));
    }

    #[test]
    fn unsupported_tag_is_rejected() {
        let mut r = Reader::new(&[18]);
        assert!(matches!(
            decode_variant(&mut r),
            Err(DecodeError::UnsupportedVariant { tag: 18 })
        ));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut r = Reader::new(&[42]);
        assert!(matches!(
            decode_variant(&mut r),
            Err(DecodeError::InvalidVariantTag { tag: 42 })
        ));
    }
}
