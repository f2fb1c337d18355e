//! The `collection.db` schema: named lists of beatmap hashes.

use crate::codec::{Reader, Writer};
use crate::db::{read_array, write_records, DbSchema};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Field, Record, RecordKind};

/// The decoded collection list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionDb {
    pub version: i32,
    pub collections: Vec<Record>,
}

impl DbSchema for CollectionDb {
    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }

    fn read_content(&mut self, r: &mut Reader<'_>) -> Result<(), DecodeError> {
        self.collections = read_array(r, "collections", |r| {
            let mut collection = Record::new(RecordKind::Collection);
            collection.push("Name", Field::Str(r.read_optional_string("collection name")?));
            let entries = read_array(r, "collection entries", |r| {
                let mut entry = Record::new(RecordKind::CollectionEntry);
                entry.push("MapHash", Field::Str(r.read_optional_string("entry map hash")?));
                Ok(entry)
            })?;
            collection.push("Entries", Field::Records(entries));
            Ok(collection)
        })?;
        Ok(())
    }

    fn write_content(&self, w: &mut Writer) -> Result<(), EncodeError> {
        write_records(w, &self.collections, |w, collection| {
            w.write_optional_string(collection.str_field("Name")?);
            write_records(w, collection.records_field("Entries")?, |w, entry| {
                w.write_optional_string(entry.str_field("MapHash")?);
                Ok(())
            })
        })
    }
}

// ====================================================
// Tests
// ====================================================
