//! The client's 100-nanosecond-tick timestamp type.
//!
//! Timestamps travel on the wire as an unsigned 64-bit tick count, one tick
//! being 100 ns, counted from an epoch that sits 621,355,968,000,000,000
//! ticks (62,135,596,800 seconds) before the Unix epoch. Conversions to and
//! from wall-clock time are exact integer arithmetic; precision below one
//! tick is truncated.

/// Ticks between the tick epoch and the Unix epoch.
pub const UNIX_EPOCH_TICKS: u64 = 621_355_968_000_000_000;

/// 100-nanosecond ticks per second.
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Nanoseconds per tick.
const NANOS_PER_TICK: u32 = 100;

/// An absolute timestamp as a raw tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(pub u64);

impl Ticks {
    /// The Unix epoch, 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Ticks = Ticks(UNIX_EPOCH_TICKS);

    /// Builds a timestamp from Unix seconds and a subsecond nanosecond part.
    ///
    /// Nanoseconds are truncated to whole ticks; anything below 100 ns is
    /// lost. Seconds before 1970 are supported down to the tick epoch.
    pub fn from_unix(secs: i64, nanos: u32) -> Ticks {
        let ticks = UNIX_EPOCH_TICKS as i128
            + secs as i128 * TICKS_PER_SECOND as i128
            + (nanos / NANOS_PER_TICK) as i128;
        Ticks(ticks as u64)
    }

    /// Returns the timestamp as Unix seconds plus a subsecond nanosecond
    /// part. Exact for every representable tick count.
    pub fn to_unix(self) -> (i64, u32) {
        let delta = self.0 as i128 - UNIX_EPOCH_TICKS as i128;
        let secs = delta.div_euclid(TICKS_PER_SECOND as i128) as i64;
        let sub_ticks = delta.rem_euclid(TICKS_PER_SECOND as i128) as u32;
        (secs, sub_ticks * NANOS_PER_TICK)
    }

    /// Returns the timestamp as whole Unix seconds, truncating toward
    /// negative infinity.
    pub fn unix_seconds(self) -> i64 {
        self.to_unix().0
    }
}
