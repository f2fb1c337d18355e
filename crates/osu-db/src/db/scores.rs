//! The `scores.db` local score archive schema.
//!
//! A list of per-beatmap score sets, each embedding full replay files
//! (minus their payloads) decoded by delegating to the [`Replay`] schema
//! against the same cursor.

use crate::codec::{Reader, Writer};
use crate::db::{read_array, write_array, DbSchema, Replay};
use crate::error::{DecodeError, EncodeError};

/// All local scores for one beatmap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreSet {
    pub map_hash: Option<String>,
    pub scores: Vec<Replay>,
}

/// The decoded score archive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreDb {
    pub version: i32,
    pub score_sets: Vec<ScoreSet>,
}

impl DbSchema for ScoreDb {
    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }

    fn read_content(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        self.score_sets = read_array(r, "score sets", |r| {
            let map_hash = r.read_optional_string("score set map hash")?;
            // Each embedded replay carries its own mode byte and version
            // epoch and is decoded in full against the shared cursor.
            let scores = read_array(r, "scores", |r| {
                let mut replay = Replay::default();
                replay.decode(r)?;
                Ok(replay)
            })?;
            Ok(ScoreSet { map_hash, scores })
        })?;
        Ok(())
    }

    fn write_content(&self, w: &mut Writer) -> Result<(), EncodeError> {
        write_array(w, &self.score_sets, |w, set| {
            w.write_optional_string(set.map_hash.as_deref());
            write_array(w, &set.scores, |w, replay| replay.encode(w))
        })
    }
}

// ====================================================
// Tests
// ====================================================
