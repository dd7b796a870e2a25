//! Diagnostic side channel for unknown wire fields.
//!
//! Unknown fields are not errors: they are stripped from the typed event and
//! surfaced here, one diagnostic line per decode. Rendering is pure so tests
//! can assert on the exact output without capturing the log stream.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::core::event::AuditEvent;
use crate::proto::UnknownField;
use crate::sources::ChannelKind;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UnknownFieldsRecord<'a> {
    source_name: &'a str,
    source_type: u8,
    event_id: &'a str,
    event_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_stamp: Option<String>,
    unknown_fields: &'a [UnknownField],
}

/// Renders the diagnostic line for a decode that produced unknown fields.
///
/// Output shape is stable and deterministic for a given input:
/// `[WARN] UNKNOWN FIELDS\n{json}` with the unknown fields in wire order.
pub fn render_unknown_fields(
    source_name: &str,
    kind: ChannelKind,
    event: &AuditEvent,
    unknown_fields: &[UnknownField],
) -> serde_json::Result<String> {
    let record = UnknownFieldsRecord {
        source_name,
        source_type: kind.source_type(),
        event_id: &event.event_id,
        event_name: &event.event_name,
        time_stamp: event
            .timestamp
            .map(|timestamp| timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        unknown_fields,
    };

    Ok(format!(
        "[WARN] UNKNOWN FIELDS\n{}",
        serde_json::to_string(&record)?
    ))
}

/// Emits the diagnostic line to stderr; no-op when there is nothing to report.
///
/// Side channel only: never affects the validity verdict or the returned
/// event payload.
pub fn report_unknown_fields(
    source_name: &str,
    kind: ChannelKind,
    event: &AuditEvent,
    unknown_fields: &[UnknownField],
) {
    if unknown_fields.is_empty() {
        return;
    }
    match render_unknown_fields(source_name, kind, event, unknown_fields) {
        Ok(line) => eprintln!("{line}"),
        Err(err) => eprintln!("failed to render unknown field diagnostic: {err}"),
    }
}
