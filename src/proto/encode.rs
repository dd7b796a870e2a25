//! Minimal wire encoder for building test payloads.
//!
//! Follows proto3 field-presence semantics: empty strings and absent
//! options are not written, so a fully empty event encodes to zero bytes.

use prost::encoding::{encode_key, encode_varint, WireType};

use crate::core::event::{AuditEvent, AuditUser, KeyValuePair, KeyValuePairs};
use crate::proto::tags;

pub(crate) fn encode_audit_event(event: &AuditEvent) -> Vec<u8> {
    let mut out = Vec::new();
    string_field(tags::EVENT_ID, &event.event_id, &mut out);
    string_field(tags::REQUEST_ID, &event.request_id, &mut out);
    string_field(tags::SESSION_ID, &event.session_id, &mut out);
    string_field(tags::CLIENT_ID, &event.client_id, &mut out);
    if let Some(timestamp) = event.timestamp {
        let mut body = Vec::new();
        let seconds = timestamp.timestamp();
        if seconds != 0 {
            varint_field(tags::TIMESTAMP_SECONDS, seconds as u64, &mut body);
        }
        let nanos = timestamp.timestamp_subsec_nanos();
        if nanos != 0 {
            varint_field(tags::TIMESTAMP_NANOS, u64::from(nanos), &mut body);
        }
        bytes_field(tags::TIMESTAMP, &body, &mut out);
    }
    if let Some(formatted) = &event.timestamp_formatted {
        string_field(tags::TIMESTAMP_FORMATTED, formatted, &mut out);
    }
    string_field(tags::EVENT_NAME, &event.event_name, &mut out);
    if let Some(user) = &event.user {
        bytes_field(tags::USER, &encode_user(user), &mut out);
    }
    if let Some(pairs) = &event.platform {
        bytes_field(tags::PLATFORM, &encode_pairs(pairs), &mut out);
    }
    if let Some(pairs) = &event.restricted {
        bytes_field(tags::RESTRICTED, &encode_pairs(pairs), &mut out);
    }
    if let Some(pairs) = &event.extensions {
        bytes_field(tags::EXTENSIONS, &encode_pairs(pairs), &mut out);
    }
    if let Some(session_id) = &event.persistent_session_id {
        string_field(tags::PERSISTENT_SESSION_ID, session_id, &mut out);
    }
    out
}

fn encode_user(user: &AuditUser) -> Vec<u8> {
    let mut out = Vec::new();
    string_field(tags::USER_ID, &user.id, &mut out);
    string_field(tags::USER_EMAIL, &user.email, &mut out);
    string_field(tags::USER_PHONE, &user.phone, &mut out);
    string_field(tags::USER_IP_ADDRESS, &user.ip_address, &mut out);
    out
}

fn encode_pairs(pairs: &KeyValuePairs) -> Vec<u8> {
    let mut out = Vec::new();
    for pair in &pairs.key_value_pair {
        let mut entry = Vec::new();
        string_field(tags::PAIR_KEY, &pair.key, &mut entry);
        string_field(tags::PAIR_VALUE, &pair.value, &mut entry);
        bytes_field(tags::PAIRS_ENTRY, &entry, &mut out);
    }
    out
}

pub(crate) fn string_field(tag: u32, value: &str, out: &mut Vec<u8>) {
    if value.is_empty() {
        return;
    }
    bytes_field(tag, value.as_bytes(), out);
}

pub(crate) fn varint_field(tag: u32, value: u64, out: &mut Vec<u8>) {
    encode_key(tag, WireType::Varint, out);
    encode_varint(value, out);
}

pub(crate) fn bytes_field(tag: u32, value: &[u8], out: &mut Vec<u8>) {
    encode_key(tag, WireType::LengthDelimited, out);
    encode_varint(value.len() as u64, out);
    out.extend_from_slice(value);
}

/// Canonical fully populated event used across the test suite.
pub(crate) fn sample_event() -> AuditEvent {
    use chrono::TimeZone;

    fn pairs(key: &str, value: &str) -> Option<KeyValuePairs> {
        Some(KeyValuePairs {
            key_value_pair: vec![KeyValuePair {
                key: key.to_string(),
                value: value.to_string(),
            }],
        })
    }

    AuditEvent {
        event_id: "66258f3e-82fc-4f61-9ba0-62424e1f06b4".to_string(),
        request_id: "43143-233Ds-2823-283-dj299j1".to_string(),
        session_id: "c222c1ec".to_string(),
        client_id: "some-client".to_string(),
        timestamp: Some(
            chrono::Utc
                .with_ymd_and_hms(2021, 1, 1, 1, 1, 1)
                .unwrap(),
        ),
        timestamp_formatted: Some("2021-01-23T15:43:21.842".to_string()),
        event_name: "AUTHENTICATION_ATTEMPT".to_string(),
        user: Some(AuditUser {
            id: "a52f6f87".to_string(),
            email: "foo@bar.com".to_string(),
            phone: "07711223344".to_string(),
            ip_address: "100.100.100.100".to_string(),
        }),
        platform: pairs("xray_trace_id", "24727sda4192"),
        restricted: pairs("experian_ref", "DSJJSEE29392"),
        extensions: pairs("response", "Authentication successful"),
        persistent_session_id: Some("some session id".to_string()),
    }
}
