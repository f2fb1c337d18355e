//! The database file schemas.
//!
//! Every file the client writes shares one skeleton: an optional
//! pre-version prefix, a little-endian `i32` version epoch, and a body
//! whose field layout is gated on that epoch. [`DbSchema`] captures the
//! skeleton; each schema module supplies the gated body.

use crate::codec::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::Record;

pub mod collection;
pub mod osu;
pub mod replay;
pub mod replay_graph;
pub mod scores;

pub use collection::CollectionDb;
pub use osu::OsuDb;
pub use replay::Replay;
pub use replay_graph::ReplayGraphDb;
pub use scores::{ScoreDb, ScoreSet};

// ====================================================
// Schema skeleton
// ====================================================

/// What a completed decode consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    /// Bytes this schema consumed from the cursor.
    pub consumed: usize,
    /// Bytes left on the cursor after the schema finished. A well-formed
    /// standalone file leaves zero; trailing bytes are reported, not
    /// rejected.
    pub trailing: usize,
}

/// A version-gated database file schema.
///
/// Implementors provide the body; the provided `decode`/`encode` wrap it in
/// the shared prefix/epoch/body skeleton. Field layouts inside the body are
/// chosen by comparing [`version`](Self::version) against the schema's gate
/// epochs, on both the read and the write path, so a struct decoded at one
/// epoch re-encodes with the same layout.
pub trait DbSchema {
    /// The file's version epoch.
    fn version(&self) -> i32;

    /// Sets the version epoch. Called by `decode` before the body is read.
    fn set_version(&mut self, version: i32);

    /// Reads whatever precedes the version epoch. Most schemas have none.
    fn read_precontent(&mut self, _r: &mut Reader<'_>) -> Result<(), DecodeError> {
        Ok(())
    }

    /// Writes whatever precedes the version epoch.
    fn write_precontent(&self, _w: &mut Writer) -> Result<(), EncodeError> {
        Ok(())
    }

    /// Reads the version-gated body.
    fn read_content(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError>;

    /// Writes the version-gated body.
    fn write_content(&self, w: &mut Writer) -> Result<(), EncodeError>;

    /// Decodes one file from the cursor: prefix, epoch, body.
    ///
    /// A non-positive epoch cannot select any gate and fails with
    /// [`DecodeError::SchemaGap`] before the body is touched.
    fn decode(&mut self, r: &mut Reader<'_>) -> Result<DecodeReport, DecodeError> {
        let start = r.position();
        self.read_precontent(r)?;
        let version = r.read_i32("version epoch")?;
        if version <= 0 {
            return Err(DecodeError::SchemaGap {
                context: "version epoch",
                version,
            });
        }
        self.set_version(version);
        self.read_content(r)?;
        Ok(DecodeReport {
            consumed: r.position() - start,
            trailing: r.remaining_len(),
        })
    }

    /// Encodes one file to the buffer: prefix, epoch, body.
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.write_precontent(w)?;
        w.write_i32(self.version());
        self.write_content(w)
    }

    /// Decodes a file from a byte slice.
    fn read_bytes(data: &[u8]) -> Result<(Self, DecodeReport), DecodeError>
    where
        Self: Default + Sized,
    {
        let mut db = Self::default();
        let mut reader = Reader::new(data);
        let report = db.decode(&mut reader)?;
        Ok((db, report))
    }

    /// Encodes the file to a fresh byte vector.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new();
        self.encode(&mut writer)?;
        Ok(writer.into_bytes())
    }
}

// ====================================================
// Count-prefixed arrays
// ====================================================

/// Reads a count-prefixed array, one element per call to `read_element`.
pub fn read_array<T>(
    r: &mut Reader<'_>,
    field: &'static str,
    mut read_element: impl FnMut(&mut Reader<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let count = r.read_i32(field)?;
    if count < 0 {
        return Err(DecodeError::NegativeLength { field, len: count });
    }
    // Cap the preallocation; a corrupt count should not balloon memory
    // before element reads start failing.
    let mut items = Vec::with_capacity((count as usize).min(4096));
    for _ in 0..count {
        items.push(read_element(r)?);
    }
    Ok(items)
}

/// Writes a count-prefixed array, one element per call to `write_element`.
pub fn write_array<T>(
    w: &mut Writer,
    items: &[T],
    mut write_element: impl FnMut(&mut Writer, &T) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    w.write_i32(items.len() as i32);
    for item in items {
        write_element(w, item)?;
    }
    Ok(())
}

/// Writes a count-prefixed array of records of a single kind.
///
/// Homogeneity is checked against the first record before the count byte
/// is written, so a mixed array produces zero output.
pub fn write_records(
    w: &mut Writer,
    records: &[Record],
    write_element: impl FnMut(&mut Writer, &Record) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    if let Some(first) = records.first() {
        let expected = first.kind();
        for record in &records[1..] {
            if record.kind() != expected {
                return Err(EncodeError::MixedRecordKind {
                    expected,
                    found: record.kind(),
                });
            }
        }
    }
    write_array(w, records, write_element)
}

// ====================================================
// Tests
// ====================================================
