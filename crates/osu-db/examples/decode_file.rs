//! Simple decoder to inspect an osu!.db beatmap cache.

use std::fs;

use osu_db::db::osu::RatingStyle;
use osu_db::{DbSchema, Mode, OsuDb, Record};

fn field_str<'a>(map: &'a Record, name: &'static str) -> &'a str {
    map.str_field(name).ok().flatten().unwrap_or("<unset>")
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "osu!.db".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let (db, report) = OsuDb::read_bytes(&data).expect("Failed to decode");

    println!("\n=== Header ===");
    println!("Version epoch: {}", db.version);
    println!("Song folders: {}", db.folder_count);
    println!("Player: {}", db.player_name.as_deref().unwrap_or("<unset>"));
    println!("Account verified: {}", db.account_verified);
    println!("Account permissions: {:#x}", db.account_permissions);

    println!("\n=== Beatmaps ({}) ===", db.beatmaps.len());
    println!(
        "Rating cache style: {}",
        match db.rating_style() {
            RatingStyle::Legacy => "legacy",
            RatingStyle::Flagged => "flagged",
        }
    );
    for mode in Mode::ALL {
        if db.ratings_stale(mode) {
            println!("  {:?} ratings are stale for this epoch", mode);
        }
    }

    // Show the first few entries in detail
    println!("\n=== First 10 Beatmaps (detail) ===");
    for (i, map) in db.beatmaps.iter().take(10).enumerate() {
        println!(
            "[{}] {} - {} [{}]",
            i,
            field_str(map, "Artist"),
            field_str(map, "Title"),
            field_str(map, "Difficulty"),
        );
        println!("      hash: {}", field_str(map, "MapHash"));
        println!("      file: {}", field_str(map, "MapFile"));
        if let Ok(points) = map.records_field("TimingPoints") {
            println!("      timing points: {}", points.len());
        }
    }
    if db.beatmaps.len() > 10 {
        println!("... and {} more", db.beatmaps.len() - 10);
    }

    if report.trailing != 0 {
        println!("\nWARNING: {} trailing bytes after decode", report.trailing);
    }
}
