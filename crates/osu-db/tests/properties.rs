//! Property tests over the primitive codecs.

use proptest::prelude::*;

use osu_db::{Decimal, Reader, Ticks, Variant, Writer};
use osu_db::codec::{decode_variant, encode_variant};

proptest! {
    #[test]
    fn varint_roundtrips_and_is_minimal(value: u64) {
        let mut w = Writer::new();
        w.write_uleb128(value);
        let bytes = w.into_bytes();

        // Minimal length: one byte per started 7-bit group.
        let expected_len = ((64 - value.leading_zeros()).div_ceil(7)).max(1) as usize;
        prop_assert_eq!(bytes.len(), expected_len);

        let mut r = Reader::new(&bytes);
        prop_assert_eq!(r.read_uleb128("varint").unwrap(), value);
        prop_assert!(r.is_empty());
    }

    #[test]
    fn decimal_words_survive_the_wire(lo: u32, mid: u32, hi: u32, flags: u32) {
        let decimal = Decimal::new(lo, mid, hi, flags);
        let restored = Decimal::from_bytes(decimal.to_bytes());
        prop_assert_eq!(restored, decimal);
    }

    #[test]
    fn ticks_convert_exactly_between_1970_and_2100(
        secs in 0i64..4_102_444_800,
        subticks in 0u32..10_000_000,
    ) {
        let nanos = subticks * 100;
        let ticks = Ticks::from_unix(secs, nanos);
        prop_assert_eq!(ticks.to_unix(), (secs, nanos));
    }

    #[test]
    fn sub_tick_nanoseconds_truncate(secs in 0i64..4_102_444_800, extra in 0u32..100) {
        // Anything below the 100ns tick granularity is dropped, never rounded.
        let ticks = Ticks::from_unix(secs, 500 + extra);
        prop_assert_eq!(ticks.to_unix(), (secs, 500));
    }

    #[test]
    fn optional_strings_roundtrip(value in proptest::option::of(".{0,64}")) {
        let mut w = Writer::new();
        w.write_optional_string(value.as_deref());
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        prop_assert_eq!(r.read_optional_string("string").unwrap(), value);
        prop_assert!(r.is_empty());
    }

    #[test]
    fn string_variants_roundtrip(value in proptest::option::of(".{0,64}")) {
        let variant = Variant::String(value);
        let mut w = Writer::new();
        encode_variant(&mut w, &variant);
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        prop_assert_eq!(decode_variant(&mut r).unwrap(), variant);
        prop_assert!(r.is_empty());
    }
}
