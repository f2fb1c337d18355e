//! The `.osr` replay schema.
//!
//! The only format with a pre-version prefix (the game-mode byte) and a
//! conditional footer: the online score id widened from 32 to 64 bits at
//! one epoch, and a target-accuracy double trails the file when the
//! target-practice mod is set.

use crate::codec::{Reader, Writer};
use crate::db::DbSchema;
use crate::error::{DecodeError, EncodeError};
use crate::model::{Mode, Ticks};

/// Online score ids join the footer.
pub const VERSION_SCORE_ID: i32 = 20121008;
/// Online score ids widen to 64 bits.
pub const VERSION_BIG_ID: i32 = 20140721;
/// Target-practice accuracy joins the footer.
pub const VERSION_MOD_TARGET: i32 = 20140307;

/// Mod bit marking a target-practice score.
pub const MOD_TARGET_PRACTICE: u32 = 0x0080_0000;

/// One decoded replay file, or one embedded score-archive entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub version: i32,
    /// Raw game-mode byte from the prefix.
    pub mode: u8,
    pub map_hash: Option<String>,
    pub player_name: Option<String>,
    pub replay_hash: Option<String>,
    pub count_300: u16,
    pub count_100: u16,
    pub count_50: u16,
    pub count_geki: u16,
    pub count_katu: u16,
    pub count_miss: u16,
    pub score: i32,
    pub max_combo: u16,
    pub perfect: bool,
    pub mods: u32,
    /// Compressed life-graph sample string.
    pub life_graph: Option<String>,
    pub timestamp: Ticks,
    /// Compressed input stream; opaque to this codec.
    pub replay_data: Vec<u8>,
    pub online_id: u64,
    /// Required when the target-practice mod bit is set at or above
    /// [`VERSION_MOD_TARGET`].
    pub target_accuracy: Option<f64>,
}

impl Default for Replay {
    fn default() -> Self {
        Self {
            version: 0,
            mode: 0,
            map_hash: None,
            player_name: None,
            replay_hash: None,
            count_300: 0,
            count_100: 0,
            count_50: 0,
            count_geki: 0,
            count_katu: 0,
            count_miss: 0,
            score: 0,
            max_combo: 0,
            perfect: false,
            mods: 0,
            life_graph: None,
            timestamp: Ticks::UNIX_EPOCH,
            replay_data: Vec::new(),
            online_id: 0,
            target_accuracy: None,
        }
    }
}

impl Replay {
    /// Returns the game mode, or `None` for a mode byte outside the four
    /// defined modes. The raw byte is kept in [`mode`](Self::mode) so an
    /// out-of-range value still round-trips.
    pub fn game_mode(&self) -> Option<Mode> {
        Mode::from_u8(self.mode)
    }

    fn has_target_accuracy(&self) -> bool {
        self.version >= VERSION_MOD_TARGET && self.mods & MOD_TARGET_PRACTICE != 0
    }

    /// Returns a copy with the replay payload cleared and the online id
    /// zeroed, keeping only result-screen metadata.
    pub fn strip_replay_data(&self) -> Replay {
        let mut stripped = self.clone();
        stripped.strip_replay_data_mut();
        stripped
    }

    /// Clears the replay payload and zeroes the online id in place.
    pub fn strip_replay_data_mut(&mut self) -> &mut Self {
        self.replay_data.clear();
        self.online_id = 0;
        self
    }
}

impl DbSchema for Replay {
    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }

    fn read_precontent(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        self.mode = r.read_u8("game mode")?;
        Ok(())
    }

    fn write_precontent(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_u8(self.mode);
        Ok(())
    }

    fn read_content(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        self.map_hash = r.read_optional_string("map hash")?;
        self.player_name = r.read_optional_string("player name")?;
        self.replay_hash = r.read_optional_string("replay hash")?;
        self.count_300 = r.read_u16("300 count")?;
        self.count_100 = r.read_u16("100 count")?;
        self.count_50 = r.read_u16("50 count")?;
        self.count_geki = r.read_u16("geki count")?;
        self.count_katu = r.read_u16("katu count")?;
        self.count_miss = r.read_u16("miss count")?;
        self.score = r.read_i32("score")?;
        self.max_combo = r.read_u16("max combo")?;
        self.perfect = r.read_bool("perfect combo")?;
        self.mods = r.read_u32("mods")?;
        self.life_graph = r.read_optional_string("life graph")?;
        self.timestamp = Ticks(r.read_u64("timestamp")?);
        self.replay_data = r.read_byte_array("replay data")?;

        if self.version >= VERSION_BIG_ID {
            self.online_id = r.read_u64("online id")?;
        } else if self.version >= VERSION_SCORE_ID {
            self.online_id = r.read_u32("online id")? as u64;
        }
        if self.has_target_accuracy() {
            self.target_accuracy = Some(r.read_f64("target accuracy")?);
        }
        Ok(())
    }

    fn write_content(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_optional_string(self.map_hash.as_deref());
        w.write_optional_string(self.player_name.as_deref());
        w.write_optional_string(self.replay_hash.as_deref());
        w.write_u16(self.count_300);
        w.write_u16(self.count_100);
        w.write_u16(self.count_50);
        w.write_u16(self.count_geki);
        w.write_u16(self.count_katu);
        w.write_u16(self.count_miss);
        w.write_i32(self.score);
        w.write_u16(self.max_combo);
        w.write_bool(self.perfect);
        w.write_u32(self.mods);
        w.write_optional_string(self.life_graph.as_deref());
        w.write_u64(self.timestamp.0);
        w.write_byte_array(&self.replay_data);

        // Footer gates mirror the read path exactly.
        if self.version >= VERSION_BIG_ID {
            w.write_u64(self.online_id);
        } else if self.version >= VERSION_SCORE_ID {
            w.write_u32(self.online_id as u32);
        }
        if self.has_target_accuracy() {
            let accuracy = self.target_accuracy.ok_or(EncodeError::MissingField {
                kind: "Replay",
                field: "TargetAccuracy",
            })?;
            w.write_f64(accuracy);
        }
        Ok(())
    }
}

// ====================================================
// Tests
// ====================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(version: i32) -> Replay {
        Replay {
            version,
            mode: 0,
            map_hash: Some("a".repeat(32)),
            player_name: Some("player".into()),
            replay_hash: Some("b".repeat(32)),
            count_300: 500,
            count_100: 20,
            count_50: 1,
            count_geki: 90,
            count_katu: 5,
            count_miss: 0,
            score: 7_345_678,
            max_combo: 812,
            perfect: true,
            mods: 0,
            life_graph: Some("0|1,".into()),
            timestamp: Ticks(635_000_000_000_000_000),
            replay_data: vec![0x5d, 0x00, 0x00, 0x01],
            online_id: 99,
            target_accuracy: None,
        }
    }

    #[test]
    fn modern_replay_roundtrips() {
        let replay = sample(20150414);
        let bytes = replay.to_bytes().unwrap();
        let (decoded, report) = Replay::read_bytes(&bytes).unwrap();
        assert_eq!(report.trailing, 0);
        assert_eq!(decoded, replay);
    }

    #[test]
    fn online_id_width_follows_the_epoch() {
        let wide = sample(VERSION_BIG_ID).to_bytes().unwrap();
        let narrow = sample(VERSION_BIG_ID - 1).to_bytes().unwrap();
        assert_eq!(wide.len(), narrow.len() + 4);

        let mut ancient = sample(VERSION_SCORE_ID - 1);
        ancient.online_id = 0;
        let none = ancient.to_bytes().unwrap();
        assert_eq!(narrow.len(), none.len() + 4);

        let (decoded, _) = Replay::read_bytes(&none).unwrap();
        assert_eq!(decoded.online_id, 0);
    }

    #[test]
    fn target_accuracy_requires_mod_bit_and_epoch() {
        let mut replay = sample(20150414);
        replay.mods = MOD_TARGET_PRACTICE;
        replay.target_accuracy = Some(0.9123);
        let bytes = replay.to_bytes().unwrap();
        let (decoded, _) = Replay::read_bytes(&bytes).unwrap();
        assert_eq!(decoded.target_accuracy, Some(0.9123));

        // Same mods below the epoch: the field never hits the wire.
        replay.version = VERSION_MOD_TARGET - 1;
        let older = replay.to_bytes().unwrap();
        assert!(older.len() < bytes.len());
        let (decoded, report) = Replay::read_bytes(&older).unwrap();
        assert_eq!(report.trailing, 0);
        assert_eq!(decoded.target_accuracy, None);
    }

    #[test]
    fn missing_target_accuracy_is_an_encode_error() {
        let mut replay = sample(20150414);
        replay.mods = MOD_TARGET_PRACTICE;
        replay.target_accuracy = None;
        assert!(matches!(
            replay.to_bytes(),
            Err(EncodeError::MissingField {
                kind: "Replay",
                field: "TargetAccuracy",
            })
        ));
    }

    #[test]
    fn game_mode_maps_the_prefix_byte() {
        let mut replay = sample(20150414);
        replay.mode = 3;
        let bytes = replay.to_bytes().unwrap();
        let (decoded, _) = Replay::read_bytes(&bytes).unwrap();
        assert_eq!(decoded.game_mode(), Some(Mode::Mania));

        // An undefined byte stays on the wire but maps to no mode.
        replay.mode = 9;
        let bytes = replay.to_bytes().unwrap();
        let (decoded, _) = Replay::read_bytes(&bytes).unwrap();
        assert_eq!(decoded.mode, 9);
        assert_eq!(decoded.game_mode(), None);
    }

    #[test]
    fn strip_replay_data_clears_payload_and_id() {
        let replay = sample(20150414);
        let stripped = replay.strip_replay_data();
        assert!(stripped.replay_data.is_empty());
        assert_eq!(stripped.online_id, 0);
        // The original is untouched.
        assert_eq!(replay.online_id, 99);
        assert!(!replay.replay_data.is_empty());
        // Metadata survives.
        assert_eq!(stripped.max_combo, replay.max_combo);
    }
}
