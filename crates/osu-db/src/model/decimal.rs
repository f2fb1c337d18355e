//! The client's 96-bit decimal number type.
//!
//! Four 32-bit words: a 96-bit unsigned magnitude in `lo`/`mid`/`hi` plus a
//! `flags` word packing a sign bit and a base-10 scale exponent. The value
//! is `magnitude * 10^-scale`, negated when the sign bit is set.

use crate::error::DecodeError;

/// Sign bit in the flags word.
const SIGN_MASK: u32 = 0x8000_0000;

/// Scale exponent bits in the flags word.
const SCALE_MASK: u32 = 0x00ff_0000;
const SCALE_SHIFT: u32 = 16;

/// Largest scale exponent a well-formed decimal may carry.
pub const MAX_SCALE: u8 = 28;

/// A 16-byte decimal as stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    pub lo: u32,
    pub mid: u32,
    pub hi: u32,
    pub flags: u32,
}

impl Decimal {
    /// Creates a decimal from its four words.
    pub fn new(lo: u32, mid: u32, hi: u32, flags: u32) -> Self {
        Self { lo, mid, hi, flags }
    }

    /// Returns the base-10 scale exponent from the flags word.
    pub fn scale(&self) -> u8 {
        ((self.flags & SCALE_MASK) >> SCALE_SHIFT) as u8
    }

    /// Returns true if the sign bit is set.
    pub fn is_negative(&self) -> bool {
        self.flags & SIGN_MASK != 0
    }

    /// Returns the unsigned 96-bit magnitude.
    pub fn magnitude(&self) -> u128 {
        ((self.hi as u128) << 64) | ((self.mid as u128) << 32) | (self.lo as u128)
    }

    /// Splits the value into its integer part and fractional remainder.
    ///
    /// The magnitude is divided by `10^scale`; the quotient carries the
    /// sign, the remainder is the unsigned fractional magnitude. A scale
    /// above [`MAX_SCALE`] is a format violation.
    pub fn split(&self) -> Result<(i128, u128), DecodeError> {
        let scale = self.scale();
        if scale > MAX_SCALE {
            return Err(DecodeError::DecimalScaleOutOfRange { scale });
        }
        let divisor = 10u128.pow(scale as u32);
        let integer = (self.magnitude() / divisor) as i128;
        let remainder = self.magnitude() % divisor;
        if self.is_negative() {
            Ok((-integer, remainder))
        } else {
            Ok((integer, remainder))
        }
    }

    /// Packs the four words little-endian into 16 bytes.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.lo.to_le_bytes());
        out[4..8].copy_from_slice(&self.mid.to_le_bytes());
        out[8..12].copy_from_slice(&self.hi.to_le_bytes());
        out[12..16].copy_from_slice(&self.flags.to_le_bytes());
        out
    }

    /// Reads back the layout produced by [`Decimal::to_bytes`].
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        // Fixed-size subslices, try_into always succeeds
        Self {
            lo: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            mid: u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            hi: u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
            flags: u32::from_le_bytes(bytes[12..16].try_into().unwrap()),
        }
    }
}
