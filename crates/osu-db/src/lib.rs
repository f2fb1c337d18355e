//! Schema-versioned binary codec for osu! client database files.
//!
//! The client stores its local state in a family of proprietary binary
//! formats: the main beatmap cache (`osu!.db`), replay files (`.osr`), the
//! local score archive (`scores.db`), and collection lists
//! (`collection.db`). Every file opens with a signed 32-bit version epoch
//! that retroactively decides which fields exist, their width, and their
//! order. This crate decodes and re-encodes every supported historical
//! layout losslessly from one schema per format.
//!
//! # Quick Start
//!
//! ```rust
//! use osu_db::{CollectionDb, DbSchema, Field, Record, RecordKind};
//!
//! let db = CollectionDb {
//!     version: 20150203,
//!     collections: vec![Record::new(RecordKind::Collection)
//!         .with("Name", Field::Str(Some("favourites".to_string())))
//!         .with("Entries", Field::Records(Vec::new()))],
//! };
//!
//! // Encode to binary
//! let bytes = db.to_bytes().unwrap();
//!
//! // Decode back
//! let (decoded, report) = CollectionDb::read_bytes(&bytes).unwrap();
//! assert_eq!(decoded, db);
//! assert_eq!(report.trailing, 0);
//! ```
//!
//! # Modules
//!
//! - [`codec`]: The binary cursor and the tagged variant encoding
//! - [`model`]: Records, decimals, tick timestamps, variants
//! - [`db`]: The four file schemas and the version-gate skeleton
//! - [`error`]: Error types
//!
//! # Round-trip guarantee
//!
//! Every gate is consulted identically on the read and write path, so for
//! any file a compliant client produced, `encode(decode(bytes)) == bytes`
//! byte-for-byte. Decoding never interprets field meaning beyond what is
//! needed to size and gate fields; stale difficulty caches, for example,
//! are retained and merely flagged via [`OsuDb::ratings_stale`].

pub mod codec;
pub mod db;
pub mod error;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{Reader, Writer};
pub use db::{
    CollectionDb, DbSchema, DecodeReport, OsuDb, Replay, ReplayGraphDb, ScoreDb, ScoreSet,
};
pub use error::{DecodeError, EncodeError};
pub use model::{Decimal, Field, Mode, Record, RecordKind, Ticks, Variant};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
