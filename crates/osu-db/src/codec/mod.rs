//! Binary encoding and decoding.

pub mod primitives;
pub mod variant;

pub use primitives::{Reader, Writer};
pub use variant::{decode_variant, encode_variant};
