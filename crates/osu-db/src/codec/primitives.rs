//! Primitive encoding/decoding for the osu! binary database formats.
//!
//! Implements the .NET-flavored wire primitives every file format shares:
//! little-endian fixed-width integers and floats, single-byte booleans,
//! 7-bit variable-length integers, flag-prefixed optional strings, and
//! length-prefixed raw arrays.

use crate::error::DecodeError;

/// Longest accepted varint encoding of a u64.
const MAX_VARINT_BYTES: usize = 10;

/// Wire flag marking a present optional string.
pub(crate) const STRING_PRESENT: u8 = 0x0b;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides position-tracked reads for every
/// primitive. A failed read leaves the position where it was, so callers
/// can peek or retry at a coarser granularity.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads exactly n bytes.
    ///
    /// `n` may be attacker-controlled (varint string lengths reach here
    /// unchecked), so the bounds check must not overflow.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn read_i8(&mut self, context: &'static str) -> Result<i8, DecodeError> {
        Ok(self.read_u8(context)? as i8)
    }

    /// Reads a little-endian unsigned 16-bit integer.
    #[inline]
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2, context)?;
        // read_bytes guarantees exactly 2 bytes, try_into always succeeds
        Ok(u16::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// Reads a little-endian signed 16-bit integer.
    #[inline]
    pub fn read_i16(&mut self, context: &'static str) -> Result<i16, DecodeError> {
        Ok(self.read_u16(context)? as i16)
    }

    /// Reads a little-endian unsigned 32-bit integer.
    #[inline]
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4, context)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// Reads a little-endian signed 32-bit integer.
    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(self.read_u32(context)? as i32)
    }

    /// Reads a little-endian unsigned 64-bit integer.
    #[inline]
    pub fn read_u64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let bytes = self.read_bytes(8, context)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// Reads a little-endian signed 64-bit integer.
    #[inline]
    pub fn read_i64(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        Ok(self.read_u64(context)? as i64)
    }

    /// Reads a little-endian IEEE 754 single.
    #[inline]
    pub fn read_f32(&mut self, context: &'static str) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32(context)?))
    }

    /// Reads a little-endian IEEE 754 double.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_u64(context)?))
    }

    /// Reads a single-byte boolean; any nonzero byte is true.
    #[inline]
    pub fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        Ok(self.read_u8(context)? != 0)
    }

    /// Reads a 7-bit variable-length unsigned integer.
    ///
    /// Stops at the first byte with the continuation bit clear. An input
    /// that ends mid-sequence fails with [`DecodeError::TruncatedVarint`].
    pub fn read_uleb128(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for i in 0..MAX_VARINT_BYTES {
            let byte = match self.read_u8(context) {
                Ok(b) => b,
                Err(DecodeError::UnexpectedEof { .. }) => {
                    return Err(DecodeError::TruncatedVarint { context });
                }
                Err(e) => return Err(e),
            };
            let value = (byte & 0x7f) as u64;

            if shift == 63 && value > 1 {
                return Err(DecodeError::VarintOverflow);
            }
            result |= value << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;

            if i == MAX_VARINT_BYTES - 1 {
                return Err(DecodeError::VarintTooLong);
            }
        }

        Err(DecodeError::VarintTooLong)
    }

    /// Reads an optional length-prefixed UTF-8 string.
    ///
    /// A leading flag byte of 0 yields `None` (absent, not empty). Any other
    /// flag byte is treated as present, matching the client's own lenient
    /// reader, and is followed by a varint byte count and that many bytes.
    pub fn read_optional_string(
        &mut self,
        field: &'static str,
    ) -> Result<Option<String>, DecodeError> {
        let flag = self.read_u8(field)?;
        if flag == 0 {
            return Ok(None);
        }
        let len = self.read_uleb128(field)? as usize;
        let bytes = self.read_bytes(len, field)?;
        std::str::from_utf8(bytes)
            .map(|s| Some(s.to_string()))
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Reads a byte array with a signed 32-bit length prefix.
    pub fn read_byte_array(&mut self, field: &'static str) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_i32(field)?;
        if len < 0 {
            return Err(DecodeError::NegativeLength { field, len });
        }
        Ok(self.read_bytes(len as usize, field)?.to_vec())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    /// Writes a little-endian unsigned 16-bit integer.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian signed 16-bit integer.
    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian unsigned 32-bit integer.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian signed 32-bit integer.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian unsigned 64-bit integer.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian signed 64-bit integer.
    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian IEEE 754 single.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian IEEE 754 double.
    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a single-byte boolean.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(if value { 1 } else { 0 });
    }

    /// Writes a 7-bit variable-length unsigned integer, minimal-length.
    #[inline]
    pub fn write_uleb128(&mut self, mut value: u64) {
        // Stack buffer to batch the writes
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf[len] = byte;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes an optional string: flag byte 0 for absent, otherwise the
    /// present flag followed by a varint byte count and the UTF-8 bytes.
    pub fn write_optional_string(&mut self, value: Option<&str>) {
        match value {
            None => self.buf.push(0),
            Some(s) => {
                self.buf.push(STRING_PRESENT);
                self.write_uleb128(s.len() as u64);
                self.buf.extend_from_slice(s.as_bytes());
            }
        }
    }

    /// Writes a byte array with a signed 32-bit length prefix.
    pub fn write_byte_array(&mut self, bytes: &[u8]) {
        self.write_i32(bytes.len() as i32);
        self.buf.extend_from_slice(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_roundtrip() {
        let mut writer = Writer::new();
        writer.write_u8(0xab);
        writer.write_i16(-12345);
        writer.write_u32(0xdead_beef);
        writer.write_i64(i64::MIN);
        writer.write_f32(1.5);
        writer.write_f64(-2.25);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_u8("t").unwrap(), 0xab);
        assert_eq!(reader.read_i16("t").unwrap(), -12345);
        assert_eq!(reader.read_u32("t").unwrap(), 0xdead_beef);
        assert_eq!(reader.read_i64("t").unwrap(), i64::MIN);
        assert_eq!(reader.read_f32("t").unwrap(), 1.5);
        assert_eq!(reader.read_f64("t").unwrap(), -2.25);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_little_endian_layout() {
        let mut writer = Writer::new();
        writer.write_u32(0x0403_0201);
        assert_eq!(writer.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_eof_restores_position() {
        let data = [1u8, 2, 3];
        let mut reader = Reader::new(&data);
        reader.read_u8("t").unwrap();
        let result = reader.read_u32("t");
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
        // Failed wide read did not consume the remaining bytes
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u16("t").unwrap(), 0x0302);
    }

    #[test]
    fn test_uleb128_roundtrip() {
        let test_values = [0u64, 1, 127, 128, 255, 256, 16383, 16384, u64::MAX];

        for v in test_values {
            let mut writer = Writer::new();
            writer.write_uleb128(v);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_uleb128("test").unwrap();
            assert_eq!(v, decoded, "failed for {}", v);
        }
    }

    #[test]
    fn test_uleb128_minimal_length() {
        for (value, expected_len) in [(0u64, 1), (127, 1), (128, 2), (16383, 2), (16384, 3)] {
            let mut writer = Writer::new();
            writer.write_uleb128(value);
            assert_eq!(writer.len(), expected_len, "length for {}", value);
        }
    }

    #[test]
    fn test_uleb128_truncated() {
        let data = [0x80u8, 0x80];
        let mut reader = Reader::new(&data);
        let result = reader.read_uleb128("test");
        assert!(matches!(result, Err(DecodeError::TruncatedVarint { .. })));
    }

    #[test]
    fn test_uleb128_too_long() {
        let data = [0x80u8; 11];
        let mut reader = Reader::new(&data);
        let result = reader.read_uleb128("test");
        assert!(matches!(result, Err(DecodeError::VarintTooLong)));
    }

    #[test]
    fn test_optional_string_roundtrip() {
        for s in [None, Some(""), Some("hello"), Some("unicode: \u{1F600}")] {
            let mut writer = Writer::new();
            writer.write_optional_string(s);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_optional_string("test").unwrap();
            assert_eq!(decoded.as_deref(), s);
        }
    }

    #[test]
    fn test_optional_string_absent_is_single_byte() {
        let mut writer = Writer::new();
        writer.write_optional_string(None);
        assert_eq!(writer.as_bytes(), &[0]);
    }

    #[test]
    fn test_optional_string_lenient_flag() {
        // Any nonzero flag byte means present
        let data = [0x7fu8, 2, b'h', b'i'];
        let mut reader = Reader::new(&data);
        let decoded = reader.read_optional_string("test").unwrap();
        assert_eq!(decoded.as_deref(), Some("hi"));
    }

    #[test]
    fn test_huge_declared_string_length_is_eof() {
        // A present-string flag followed by a varint declaring a length
        // near u64::MAX. The bounds check must fail cleanly instead of
        // overflowing the position arithmetic.
        let mut data = vec![STRING_PRESENT];
        data.extend_from_slice(&[0xff; 9]);
        data.push(0x01);

        let mut reader = Reader::new(&data);
        let result = reader.read_optional_string("test");
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_read_bytes_length_overflow_is_eof() {
        let data = [1u8, 2, 3];
        let mut reader = Reader::new(&data);
        reader.read_u8("t").unwrap();
        let result = reader.read_bytes(usize::MAX, "t");
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_byte_array_roundtrip() {
        let payload = [9u8, 8, 7, 6];
        let mut writer = Writer::new();
        writer.write_byte_array(&payload);

        let mut reader = Reader::new(writer.as_bytes());
        let decoded = reader.read_byte_array("test").unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_byte_array_negative_length() {
        let mut writer = Writer::new();
        writer.write_i32(-1);
        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_byte_array("test");
        assert!(matches!(result, Err(DecodeError::NegativeLength { .. })));
    }

    #[test]
    fn test_bool_nonzero_is_true() {
        let data = [0u8, 1, 0xff];
        let mut reader = Reader::new(&data);
        assert!(!reader.read_bool("t").unwrap());
        assert!(reader.read_bool("t").unwrap());
        assert!(reader.read_bool("t").unwrap());
    }
}
