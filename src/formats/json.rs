//! JSON output for validated event batches.
//!
//! Events serialize as one JSON array with the stable key order defined on
//! the event schema; absent optional groups are omitted entirely.

use std::io::{self, Write};

use crate::core::event::AuditEvent;

/// Serializes a validated batch as a compact JSON array.
pub fn to_json_array(events: &[AuditEvent]) -> serde_json::Result<String> {
    serde_json::to_string(events)
}

/// Writes the JSON array followed by a trailing newline.
pub fn write_json_array<W: Write>(writer: &mut W, events: &[AuditEvent]) -> io::Result<()> {
    let json = to_json_array(events)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")
}
