//! Data model shared by the database schemas.

pub mod decimal;
pub mod record;
pub mod time;
pub mod variant;

pub use decimal::Decimal;
pub use record::{Field, Record, RecordKind};
pub use time::Ticks;
pub use variant::Variant;

/// The four game modes, in wire byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Osu = 0,
    Taiko = 1,
    Fruits = 2,
    Mania = 3,
}

impl Mode {
    /// All modes, ordered by wire byte.
    pub const ALL: [Mode; 4] = [Mode::Osu, Mode::Taiko, Mode::Fruits, Mode::Mania];

    /// Returns the wire byte for this mode.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maps a wire byte back to a mode, if in range.
    pub fn from_u8(byte: u8) -> Option<Mode> {
        match byte {
            0 => Some(Mode::Osu),
            1 => Some(Mode::Taiko),
            2 => Some(Mode::Fruits),
            3 => Some(Mode::Mania),
            _ => None,
        }
    }
}
