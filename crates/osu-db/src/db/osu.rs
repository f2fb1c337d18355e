//! The main `osu!.db` beatmap cache schema.
//!
//! The largest and most heavily gated format: roughly fifteen version
//! epochs decide which beatmap fields exist, their width, and their order.
//! Gates are applied identically on read and write, so a file decoded at
//! any supported epoch re-encodes byte-for-byte.

use crate::codec::{decode_variant, encode_variant, Reader, Writer};
use crate::db::{read_array, write_records, DbSchema};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Field, Mode, Record, RecordKind, Ticks};

// ====================================================
// Version epochs
// ====================================================

/// Unicode artist/title columns appear.
pub const VERSION_UNICODE: i32 = 20121008;
/// Mania goes public; ranking grades grow to four slots.
pub const VERSION_MANIA: i32 = 20121008;
/// Account status, unlock time and player name join the header.
pub const VERSION_HEADER: i32 = 20121023;
/// Editor bookmark time appears (gate is strictly greater).
pub const VERSION_EDITOR_TIME: i32 = 20121009;
/// Per-map visual preset flags appear (gate is strictly greater).
pub const VERSION_PRESET: i32 = 20120620;
/// The "ignore video" preset flag appears.
pub const VERSION_PRESET_VIDEO: i32 = 20130624;
/// The explicit visual-override flag appears.
pub const VERSION_PRESET_OVERRIDE: i32 = 20130913;
/// The legacy dim-rate short disappears (present strictly below).
pub const VERSION_PRESET_NO_DIM: i32 = 20140608;
/// Approach rate is stored alongside HP/CS/OD.
pub const VERSION_STORE_AR: i32 = 20120620;
/// Per-mode difficulty-rating caches appear.
pub const VERSION_DIFFICULTY_CACHE: i32 = 20140609;
/// Rating cache entries switch to the flagged mod representation.
pub const VERSION_CACHE_STYLE: i32 = 20140610;
/// Difficulty values widen from one byte to a 32-bit float.
pub const VERSION_PRECISE: i32 = 20140612;
/// Account permissions footer appears.
pub const VERSION_FLAG_CACHE: i32 = 20141028;
/// Versions that prefix each beatmap entry with its byte size.
pub const VERSION_BEATMAP_SIZE: std::ops::RangeInclusive<i32> = 20160408..=20191106;

/// Epochs below which a mode's cached ratings are considered stale.
///
/// Some modes carry a single recalculation epoch, others a historical list
/// whose maximum is the one that counts. The table is a literal port of the
/// client's history and is consulted, never reinterpreted.
#[derive(Debug, Clone, Copy)]
pub enum RecheckEpochs {
    Single(i32),
    Versioned(&'static [i32]),
}

/// Per-mode force-recheck table, indexed by wire mode byte.
pub const FORCE_RECHECK: [RecheckEpochs; 4] = [
    RecheckEpochs::Versioned(&[20150211, 20160722]),
    RecheckEpochs::Single(20140610),
    RecheckEpochs::Single(20141123),
    RecheckEpochs::Single(20150110),
];

/// How a rating cache entry's mod combination is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingStyle {
    /// Pre-flag representation, used strictly below [`VERSION_CACHE_STYLE`].
    Legacy,
    /// Integer-flag representation.
    Flagged,
}

const STARS_FIELDS: [&str; 4] = ["StarsOsu", "StarsTaiko", "StarsFruits", "StarsMania"];

// ====================================================
// Schema
// ====================================================

/// The decoded main database.
#[derive(Debug, Clone, PartialEq)]
pub struct OsuDb {
    pub version: i32,
    pub folder_count: i32,
    pub account_verified: bool,
    pub account_unlock_time: Ticks,
    pub player_name: Option<String>,
    pub beatmaps: Vec<Record>,
    pub account_permissions: u32,
}

impl Default for OsuDb {
    fn default() -> Self {
        // Header defaults for files older than VERSION_HEADER.
        Self {
            version: 0,
            folder_count: 0,
            account_verified: true,
            account_unlock_time: Ticks::UNIX_EPOCH,
            player_name: None,
            beatmaps: Vec::new(),
            account_permissions: 0,
        }
    }
}

impl OsuDb {
    /// Returns how this file encodes rating cache mod combinations.
    pub fn rating_style(&self) -> RatingStyle {
        if self.version < VERSION_CACHE_STYLE {
            RatingStyle::Legacy
        } else {
            RatingStyle::Flagged
        }
    }

    /// Returns true if the given mode's cached ratings predate its
    /// force-recheck epoch and should be recomputed by the caller.
    ///
    /// Stale arrays are still decoded and retained so the file re-encodes
    /// byte-for-byte; staleness is a signal, not a filter.
    pub fn ratings_stale(&self, mode: Mode) -> bool {
        if self.version < VERSION_CACHE_STYLE {
            return true;
        }
        match FORCE_RECHECK[mode.as_u8() as usize] {
            RecheckEpochs::Single(epoch) => self.version < epoch,
            RecheckEpochs::Versioned(epochs) => {
                let max = epochs.iter().copied().max().unwrap_or(i32::MIN);
                self.version < max
            }
        }
    }

    // ------------------------------------------------
    // Reading
    // ------------------------------------------------

    fn read_header(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        self.folder_count = r.read_i32("folder count")?;
        if self.version >= VERSION_HEADER {
            self.account_verified = r.read_bool("account verified")?;
            self.account_unlock_time = Ticks(r.read_u64("account unlock time")?);
            self.player_name = r.read_optional_string("player name")?;
        }
        Ok(())
    }

    fn read_beatmap(&self, r: &mut Reader<'_>) -> Result<Record, DecodeError> {
        let version = self.version;
        let mut map = Record::new(RecordKind::Beatmap);

        if VERSION_BEATMAP_SIZE.contains(&version) {
            map.push("EntrySize", Field::I32(r.read_i32("entry size")?));
        }

        let artist = r.read_optional_string("artist")?;
        map.push("Artist", Field::Str(artist.clone()));
        if version >= VERSION_UNICODE {
            map.push(
                "ArtistUnicode",
                Field::Str(r.read_optional_string("artist unicode")?),
            );
        } else {
            map.push("ArtistUnicode", Field::Str(artist));
        }
        let title = r.read_optional_string("title")?;
        map.push("Title", Field::Str(title.clone()));
        if version >= VERSION_UNICODE {
            map.push(
                "TitleUnicode",
                Field::Str(r.read_optional_string("title unicode")?),
            );
        } else {
            map.push("TitleUnicode", Field::Str(title));
        }
        map.push("Creator", Field::Str(r.read_optional_string("creator")?));
        map.push(
            "Difficulty",
            Field::Str(r.read_optional_string("difficulty name")?),
        );
        map.push(
            "AudioFile",
            Field::Str(r.read_optional_string("audio file")?),
        );
        map.push("MapHash", Field::Str(r.read_optional_string("map hash")?));
        map.push("MapFile", Field::Str(r.read_optional_string("map file")?));
        map.push("Status", Field::U8(r.read_u8("submission status")?));
        map.push("CircleCount", Field::I16(r.read_i16("circle count")?));
        map.push("SliderCount", Field::I16(r.read_i16("slider count")?));
        map.push("SpinnerCount", Field::I16(r.read_i16("spinner count")?));
        map.push(
            "LastModified",
            Field::Time(Ticks(r.read_u64("last modified")?)),
        );

        for name in self.difficulty_fields() {
            let value = if version >= VERSION_PRECISE {
                Field::F32(r.read_f32("difficulty value")?)
            } else {
                Field::U8(r.read_u8("difficulty value")?)
            };
            map.push(name, value);
        }
        map.push("SliderVelocity", Field::F64(r.read_f64("slider velocity")?));

        for name in STARS_FIELDS {
            let ratings = if version >= VERSION_DIFFICULTY_CACHE {
                self.read_ratings(r)?
            } else {
                Vec::new()
            };
            map.push(name, Field::Records(ratings));
        }

        map.push("DrainTime", Field::U32(r.read_u32("drain time")?));
        map.push("TotalTime", Field::U32(r.read_u32("total time")?));
        map.push("PreviewTime", Field::U32(r.read_u32("preview time")?));
        map.push("TimingPoints", Field::Records(self.read_timing_points(r)?));
        map.push("MapId", Field::U32(r.read_u32("map id")?));
        map.push("MapsetId", Field::U32(r.read_u32("mapset id")?));
        map.push("ThreadId", Field::U32(r.read_u32("thread id")?));

        let grade_slots = if version >= VERSION_MANIA { 4 } else { 3 };
        map.push(
            "Ranking",
            Field::Bytes(r.read_bytes(grade_slots, "ranking grades")?.to_vec()),
        );

        map.push("LocalOffset", Field::I16(r.read_i16("local offset")?));
        map.push("StackLeniency", Field::F32(r.read_f32("stack leniency")?));
        map.push("ModeId", Field::U8(r.read_u8("mode")?));
        map.push("Source", Field::Str(r.read_optional_string("source")?));
        map.push("Tags", Field::Str(r.read_optional_string("tags")?));
        map.push("GlobalOffset", Field::I16(r.read_i16("global offset")?));
        map.push(
            "OnlineTitle",
            Field::Str(r.read_optional_string("online title")?),
        );
        map.push("Unplayed", Field::Bool(r.read_bool("unplayed")?));
        map.push("LastPlayed", Field::Time(Ticks(r.read_u64("last played")?)));
        map.push("Osz2", Field::Bool(r.read_bool("osz2 flag")?));
        map.push(
            "FolderPath",
            Field::Str(r.read_optional_string("folder path")?),
        );
        map.push("LastChecked", Field::Time(Ticks(r.read_u64("last checked")?)));

        if version > VERSION_PRESET {
            map.push("IgnoreHitsounds", Field::Bool(r.read_bool("ignore hitsounds")?));
            let skin = r.read_bool("ignore skin")?;
            map.push("IgnoreSkin", Field::Bool(skin));
            let storyboard = r.read_bool("ignore storyboard")?;
            map.push("IgnoreStoryboard", Field::Bool(storyboard));
            let video = if version >= VERSION_PRESET_VIDEO {
                r.read_bool("ignore video")?
            } else {
                false
            };
            map.push("IgnoreVideo", Field::Bool(video));
            let visual = if version >= VERSION_PRESET_OVERRIDE {
                r.read_bool("visual override")?
            } else {
                skin | storyboard | video
            };
            map.push("VisualOverride", Field::Bool(visual));
            if version < VERSION_PRESET_NO_DIM {
                map.push("DimRate", Field::U16(r.read_u16("dim rate")?));
            }
        }
        if version > VERSION_EDITOR_TIME {
            map.push("EditorTime", Field::U32(r.read_u32("editor time")?));
        }
        if version >= VERSION_MANIA {
            map.push("ManiaSpeed", Field::U8(r.read_u8("mania scroll speed")?));
        }

        Ok(map)
    }

    fn read_ratings(&self, r: &mut Reader<'_>) -> Result<Vec<Record>, DecodeError> {
        read_array(r, "difficulty ratings", |r| {
            let mut rating = Record::new(RecordKind::DifficultyRating);
            rating.push("Mods", Field::Variant(decode_variant(r)?));
            rating.push("Rating", Field::Variant(decode_variant(r)?));
            Ok(rating)
        })
    }

    fn read_timing_points(&self, r: &mut Reader<'_>) -> Result<Vec<Record>, DecodeError> {
        read_array(r, "timing points", |r| {
            let mut point = Record::new(RecordKind::TimingPoint);
            point.push("BeatLength", Field::F64(r.read_f64("beat length")?));
            point.push("Offset", Field::F64(r.read_f64("timing offset")?));
            point.push("Uninherited", Field::Bool(r.read_bool("uninherited")?));
            Ok(point)
        })
    }

    fn read_footer(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        if self.version >= VERSION_FLAG_CACHE {
            self.account_permissions = r.read_u32("account permissions")?;
        }
        Ok(())
    }

    // ------------------------------------------------
    // Writing
    // ------------------------------------------------

    fn write_header(&self, w: &mut Writer) {
        w.write_i32(self.folder_count);
        if self.version >= VERSION_HEADER {
            w.write_bool(self.account_verified);
            w.write_u64(self.account_unlock_time.0);
            w.write_optional_string(self.player_name.as_deref());
        }
    }

    fn write_beatmap(&self, w: &mut Writer, map: &Record) -> Result<(), EncodeError> {
        let version = self.version;

        if VERSION_BEATMAP_SIZE.contains(&version) {
            w.write_i32(map.i32_field("EntrySize")?);
        }

        w.write_optional_string(map.str_field("Artist")?);
        if version >= VERSION_UNICODE {
            w.write_optional_string(map.str_field("ArtistUnicode")?);
        }
        w.write_optional_string(map.str_field("Title")?);
        if version >= VERSION_UNICODE {
            w.write_optional_string(map.str_field("TitleUnicode")?);
        }
        w.write_optional_string(map.str_field("Creator")?);
        w.write_optional_string(map.str_field("Difficulty")?);
        w.write_optional_string(map.str_field("AudioFile")?);
        w.write_optional_string(map.str_field("MapHash")?);
        w.write_optional_string(map.str_field("MapFile")?);
        w.write_u8(map.u8_field("Status")?);
        w.write_i16(map.i16_field("CircleCount")?);
        w.write_i16(map.i16_field("SliderCount")?);
        w.write_i16(map.i16_field("SpinnerCount")?);
        w.write_u64(map.time_field("LastModified")?.0);

        for name in self.difficulty_fields() {
            if version >= VERSION_PRECISE {
                w.write_f32(map.f32_field(name)?);
            } else {
                w.write_u8(map.u8_field(name)?);
            }
        }
        w.write_f64(map.f64_field("SliderVelocity")?);

        if version >= VERSION_DIFFICULTY_CACHE {
            for name in STARS_FIELDS {
                self.write_ratings(w, map.records_field(name)?)?;
            }
        }

        w.write_u32(map.u32_field("DrainTime")?);
        w.write_u32(map.u32_field("TotalTime")?);
        w.write_u32(map.u32_field("PreviewTime")?);
        self.write_timing_points(w, map.records_field("TimingPoints")?)?;
        w.write_u32(map.u32_field("MapId")?);
        w.write_u32(map.u32_field("MapsetId")?);
        w.write_u32(map.u32_field("ThreadId")?);

        // Grade slots are padded or truncated to the exact width the
        // version expects.
        let grade_slots = if version >= VERSION_MANIA { 4 } else { 3 };
        let mut grades = map.bytes_field("Ranking")?.to_vec();
        grades.resize(grade_slots, 0);
        w.write_bytes(&grades);

        w.write_i16(map.i16_field("LocalOffset")?);
        w.write_f32(map.f32_field("StackLeniency")?);
        w.write_u8(map.u8_field("ModeId")?);
        w.write_optional_string(map.str_field("Source")?);
        w.write_optional_string(map.str_field("Tags")?);
        w.write_i16(map.i16_field("GlobalOffset")?);
        w.write_optional_string(map.str_field("OnlineTitle")?);
        w.write_bool(map.bool_field("Unplayed")?);
        w.write_u64(map.time_field("LastPlayed")?.0);
        w.write_bool(map.bool_field("Osz2")?);
        w.write_optional_string(map.str_field("FolderPath")?);
        w.write_u64(map.time_field("LastChecked")?.0);

        if version > VERSION_PRESET {
            w.write_bool(map.bool_field("IgnoreHitsounds")?);
            w.write_bool(map.bool_field("IgnoreSkin")?);
            w.write_bool(map.bool_field("IgnoreStoryboard")?);
            if version >= VERSION_PRESET_VIDEO {
                w.write_bool(map.bool_field("IgnoreVideo")?);
            }
            if version >= VERSION_PRESET_OVERRIDE {
                w.write_bool(map.bool_field("VisualOverride")?);
            }
            if version < VERSION_PRESET_NO_DIM {
                w.write_u16(map.u16_field("DimRate")?);
            }
        }
        if version > VERSION_EDITOR_TIME {
            w.write_u32(map.u32_field("EditorTime")?);
        }
        if version >= VERSION_MANIA {
            w.write_u8(map.u8_field("ManiaSpeed")?);
        }

        Ok(())
    }

    fn write_ratings(&self, w: &mut Writer, ratings: &[Record]) -> Result<(), EncodeError> {
        write_records(w, ratings, |w, rating| {
            encode_variant(w, rating.variant_field("Mods")?);
            encode_variant(w, rating.variant_field("Rating")?);
            Ok(())
        })
    }

    fn write_timing_points(&self, w: &mut Writer, points: &[Record]) -> Result<(), EncodeError> {
        write_records(w, points, |w, point| {
            w.write_f64(point.f64_field("BeatLength")?);
            w.write_f64(point.f64_field("Offset")?);
            w.write_bool(point.bool_field("Uninherited")?);
            Ok(())
        })
    }

    fn write_footer(&self, w: &mut Writer) {
        if self.version >= VERSION_FLAG_CACHE {
            w.write_u32(self.account_permissions);
        }
    }

    /// Difficulty value fields in wire order for this version.
    fn difficulty_fields(&self) -> &'static [&'static str] {
        if self.version >= VERSION_STORE_AR {
            &["ApproachRate", "DrainRate", "CircleSize", "OverallDifficulty"]
        } else {
            &["DrainRate", "CircleSize", "OverallDifficulty"]
        }
    }
}

impl DbSchema for OsuDb {
    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }

    fn read_content(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        self.read_header(r)?;
        self.beatmaps = read_array(r, "beatmaps", |r| self.read_beatmap(r))?;
        self.read_footer(r)
    }

    fn write_content(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.write_header(w);
        write_records(w, &self.beatmaps, |w, map| self.write_beatmap(w, map))?;
        self.write_footer(w);
        Ok(())
    }
}

// ====================================================
// Tests
// ====================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variant;

    fn synthetic_beatmap(version: i32, title: &str) -> Record {
        let mut map = Record::new(RecordKind::Beatmap);
        if VERSION_BEATMAP_SIZE.contains(&version) {
            map.push("EntrySize", Field::I32(0));
        }
        map.push("Artist", Field::Str(Some("artist".into())));
        map.push("ArtistUnicode", Field::Str(Some("artist".into())));
        map.push("Title", Field::Str(Some(title.to_owned())));
        map.push("TitleUnicode", Field::Str(Some(title.to_owned())));
        map.push("Creator", Field::Str(Some("creator".into())));
        map.push("Difficulty", Field::Str(Some("Insane".into())));
        map.push("AudioFile", Field::Str(Some("audio.mp3".into())));
        map.push("MapHash", Field::Str(Some("d41d8cd98f".into())));
        map.push("MapFile", Field::Str(Some("map.osu".into())));
        map.push("Status", Field::U8(4));
        map.push("CircleCount", Field::I16(100));
        map.push("SliderCount", Field::I16(50));
        map.push("SpinnerCount", Field::I16(2));
        map.push("LastModified", Field::Time(Ticks(635_000_000_000_000_000)));
        for name in ["ApproachRate", "DrainRate", "CircleSize", "OverallDifficulty"] {
            if version >= VERSION_PRECISE {
                map.push(name, Field::F32(7.0));
            } else {
                map.push(name, Field::U8(7));
            }
        }
        map.push("SliderVelocity", Field::F64(1.4));
        for name in STARS_FIELDS {
            let ratings = if version >= VERSION_DIFFICULTY_CACHE {
                vec![Record::new(RecordKind::DifficultyRating)
                    .with("Mods", Field::Variant(Variant::I32(0)))
                    .with("Rating", Field::Variant(Variant::F64(5.25)))]
            } else {
                Vec::new()
            };
            map.push(name, Field::Records(ratings));
        }
        map.push("DrainTime", Field::U32(90));
        map.push("TotalTime", Field::U32(120_000));
        map.push("PreviewTime", Field::U32(30_000));
        map.push(
            "TimingPoints",
            Field::Records(vec![Record::new(RecordKind::TimingPoint)
                .with("BeatLength", Field::F64(350.0))
                .with("Offset", Field::F64(12.5))
                .with("Uninherited", Field::Bool(true))]),
        );
        map.push("MapId", Field::U32(123_456));
        map.push("MapsetId", Field::U32(65_432));
        map.push("ThreadId", Field::U32(0));
        map.push("Ranking", Field::Bytes(vec![9, 9, 9, 9]));
        map.push("LocalOffset", Field::I16(0));
        map.push("StackLeniency", Field::F32(0.7));
        map.push("ModeId", Field::U8(0));
        map.push("Source", Field::Str(None));
        map.push("Tags", Field::Str(None));
        map.push("GlobalOffset", Field::I16(0));
        map.push("OnlineTitle", Field::Str(None));
        map.push("Unplayed", Field::Bool(false));
        map.push("LastPlayed", Field::Time(Ticks(635_000_000_000_000_000)));
        map.push("Osz2", Field::Bool(false));
        map.push("FolderPath", Field::Str(Some("artist - title".into())));
        map.push("LastChecked", Field::Time(Ticks(635_000_000_000_000_000)));
        if version > VERSION_PRESET {
            map.push("IgnoreHitsounds", Field::Bool(false));
            map.push("IgnoreSkin", Field::Bool(false));
            map.push("IgnoreStoryboard", Field::Bool(true));
            map.push("IgnoreVideo", Field::Bool(false));
            map.push("VisualOverride", Field::Bool(false));
            if version < VERSION_PRESET_NO_DIM {
                map.push("DimRate", Field::U16(80));
            }
        }
        if version > VERSION_EDITOR_TIME {
            map.push("EditorTime", Field::U32(0));
        }
        if version >= VERSION_MANIA {
            map.push("ManiaSpeed", Field::U8(0));
        }
        map
    }

    fn synthetic_db(version: i32, count: usize) -> OsuDb {
        OsuDb {
            version,
            folder_count: 1,
            account_verified: true,
            account_unlock_time: Ticks::UNIX_EPOCH,
            player_name: Some("player".into()),
            beatmaps: (0..count)
                .map(|i| synthetic_beatmap(version, &format!("title {i}")))
                .collect(),
            account_permissions: 0,
        }
    }

    #[test]
    fn four_beatmap_db_at_cache_epoch_roundtrips_exactly() {
        // 20140609 supports the rating cache but predates the flagged style.
        let db = synthetic_db(20140609, 4);
        let bytes = db.to_bytes().unwrap();

        let (decoded, report) = OsuDb::read_bytes(&bytes).unwrap();
        assert_eq!(report.trailing, 0);
        assert_eq!(decoded.beatmaps.len(), 4);
        assert_eq!(decoded.rating_style(), RatingStyle::Legacy);
        for mode in Mode::ALL {
            assert!(decoded.ratings_stale(mode));
        }

        let reencoded = decoded.to_bytes().unwrap();
        assert_eq!(reencoded, bytes);
    }

    #[test]
    fn header_epoch_boundary() {
        let below = synthetic_db(VERSION_HEADER - 1, 0);
        let at = synthetic_db(VERSION_HEADER, 0);

        let bytes_below = below.to_bytes().unwrap();
        let bytes_at = at.to_bytes().unwrap();

        // version + folder_count + beatmap count below the gate; the header
        // fields only exist at the gate.
        assert_eq!(bytes_below.len(), 12);
        assert!(bytes_at.len() > bytes_below.len());

        let (decoded, _) = OsuDb::read_bytes(&bytes_below).unwrap();
        assert!(decoded.account_verified);
        assert_eq!(decoded.account_unlock_time, Ticks::UNIX_EPOCH);
        assert_eq!(decoded.player_name, None);

        let (decoded, _) = OsuDb::read_bytes(&bytes_at).unwrap();
        assert_eq!(decoded.player_name.as_deref(), Some("player"));
    }

    #[test]
    fn stale_ratings_are_retained() {
        let db = synthetic_db(20140609, 1);
        let bytes = db.to_bytes().unwrap();
        let (decoded, _) = OsuDb::read_bytes(&bytes).unwrap();

        let ratings = decoded.beatmaps[0].records_field("StarsOsu").unwrap();
        assert_eq!(ratings.len(), 1);
        assert!(decoded.ratings_stale(Mode::Osu));
    }

    #[test]
    fn recheck_table_uses_maximum_of_versioned_epochs() {
        let mut db = synthetic_db(20150211, 0);
        // At the first osu! recheck epoch but below the second.
        assert!(db.ratings_stale(Mode::Osu));
        assert!(!db.ratings_stale(Mode::Taiko));

        db.version = 20160722;
        assert!(!db.ratings_stale(Mode::Osu));
    }

    #[test]
    fn modern_db_roundtrips_with_footer_and_precise_difficulty() {
        let db = synthetic_db(20141028, 2);
        let bytes = db.to_bytes().unwrap();
        let (decoded, report) = OsuDb::read_bytes(&bytes).unwrap();
        assert_eq!(report.trailing, 0);
        assert_eq!(decoded, db);
        assert_eq!(decoded.rating_style(), RatingStyle::Flagged);
    }

    #[test]
    fn entry_size_range_gates_the_prefix() {
        let db = synthetic_db(20160408, 1);
        let bytes = db.to_bytes().unwrap();
        let (decoded, _) = OsuDb::read_bytes(&bytes).unwrap();
        assert!(decoded.beatmaps[0].has("EntrySize"));
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn grade_slots_are_padded_to_width() {
        let mut db = synthetic_db(20140609, 1);
        // Two grade bytes in a four-slot version: encoder pads with zeros.
        let mut map = db.beatmaps[0].clone();
        let mut padded = Record::new(RecordKind::Beatmap);
        for (name, value) in map.fields() {
            if name == "Ranking" {
                padded.push(name, Field::Bytes(vec![1, 2]));
            } else {
                padded.push(name, value.clone());
            }
        }
        map = padded;
        db.beatmaps[0] = map;

        let bytes = db.to_bytes().unwrap();
        let (decoded, _) = OsuDb::read_bytes(&bytes).unwrap();
        assert_eq!(
            decoded.beatmaps[0].bytes_field("Ranking").unwrap(),
            &[1, 2, 0, 0]
        );
    }

    #[test]
    fn ancient_version_reads_byte_difficulty_and_no_presets() {
        // 20120620 == VERSION_PRESET, gate is strictly greater, so no
        // preset flags; difficulty values are single bytes with AR stored.
        let db = synthetic_db(20120620, 1);
        let bytes = db.to_bytes().unwrap();
        let (decoded, report) = OsuDb::read_bytes(&bytes).unwrap();
        assert_eq!(report.trailing, 0);
        assert!(!decoded.beatmaps[0].has("IgnoreHitsounds"));
        assert_eq!(decoded.beatmaps[0].u8_field("ApproachRate").unwrap(), 7);
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }
}
