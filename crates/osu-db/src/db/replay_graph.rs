//! The spectator replay-graph frame list schema.
//!
//! A flat record array of sampled result-screen frames. The only gate is
//! the hit-type field narrowing from 32 to 16 bits at one epoch.

use crate::codec::{Reader, Writer};
use crate::db::{read_array, write_records, DbSchema};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Field, Record, RecordKind};

/// Hit-type narrows from i32 to i16.
pub const VERSION_COMPRESS: i32 = 20160101;

/// The decoded frame list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplayGraphDb {
    pub version: i32,
    pub frames: Vec<Record>,
}

impl DbSchema for ReplayGraphDb {
    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }

    fn read_content(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        let version = self.version;
        self.frames = read_array(r, "graph frames", |r| {
            let mut frame = Record::new(RecordKind::ReplayGraph);
            frame.push("Time", Field::I32(r.read_i32("frame time")?));
            frame.push("NoGauge", Field::U8(r.read_u8("gauge disabled")?));
            frame.push("Count300", Field::U16(r.read_u16("300 count")?));
            frame.push("Count100", Field::U16(r.read_u16("100 count")?));
            frame.push("Count50", Field::U16(r.read_u16("50 count")?));
            frame.push("CountGeki", Field::U16(r.read_u16("geki count")?));
            frame.push("CountKatu", Field::U16(r.read_u16("katu count")?));
            frame.push("CountMiss", Field::U16(r.read_u16("miss count")?));
            frame.push("Score", Field::U32(r.read_u32("score")?));
            frame.push("MaxCombo", Field::U16(r.read_u16("max combo")?));
            frame.push("CurrentCombo", Field::U16(r.read_u16("current combo")?));
            frame.push("Finished", Field::Bool(r.read_bool("finished")?));
            frame.push("LifeGauge", Field::U8(r.read_u8("life gauge")?));
            let hit_type = if version < VERSION_COMPRESS {
                Field::I32(r.read_i32("hit type")?)
            } else {
                Field::I16(r.read_i16("hit type")?)
            };
            frame.push("HitType", hit_type);
            Ok(frame)
        })?;
        Ok(())
    }

    fn write_content(&self, w: &mut Writer) -> Result<(), EncodeError> {
        let version = self.version;
        write_records(w, &self.frames, |w, frame| {
            w.write_i32(frame.i32_field("Time")?);
            w.write_u8(frame.u8_field("NoGauge")?);
            w.write_u16(frame.u16_field("Count300")?);
            w.write_u16(frame.u16_field("Count100")?);
            w.write_u16(frame.u16_field("Count50")?);
            w.write_u16(frame.u16_field("CountGeki")?);
            w.write_u16(frame.u16_field("CountKatu")?);
            w.write_u16(frame.u16_field("CountMiss")?);
            w.write_u32(frame.u32_field("Score")?);
            w.write_u16(frame.u16_field("MaxCombo")?);
            w.write_u16(frame.u16_field("CurrentCombo")?);
            w.write_bool(frame.bool_field("Finished")?);
            w.write_u8(frame.u8_field("LifeGauge")?);
            if version < VERSION_COMPRESS {
                w.write_i32(frame.i32_field("HitType")?);
            } else {
                w.write_i16(frame.i16_field("HitType")?);
            }
            Ok(())
        })
    }
}

// ====================================================
// Tests
// ====================================================
