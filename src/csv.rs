// src/csv.rs
use std::io::{self, Write};

use crate::specs::ActivityRecord;

pub const HEADER: [&str; 4] = ["report_id", "action_type", "actor_username", "created_at"];

/* ---------------- Writing ---------------- */

/// Always-quoted field with embedded quotes doubled.
pub fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn record_fields(r: &ActivityRecord) -> [&str; 4] {
    [
        r.item_id.as_str(),
        r.action_type.as_str(),
        r.actor.as_str(),
        r.created_at.as_str(),
    ]
}

/// Write the export to any writer: bare header, then one fully quoted row per
/// record, `\n` between lines and none after the last.
pub fn write_records<W: Write>(mut w: W, records: &[ActivityRecord]) -> io::Result<()> {
    write!(w, "{}", HEADER.join(","))?;
    for r in records {
        let row: Vec<String> = record_fields(r).iter().map(|f| quote(f)).collect();
        write!(w, "\n{}", row.join(","))?;
    }
    w.flush()
}

/// The export as one string.
pub fn to_csv(records: &[ActivityRecord]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_records(&mut buf, records);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
