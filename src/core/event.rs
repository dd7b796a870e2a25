//! Audit event schema.
//!
//! Field declaration order is the stable key order of the serialized JSON,
//! so reordering fields here changes the output contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One decoded audit event.
///
/// Scalar identifier fields default to empty strings when absent from the
/// wire payload; the validator treats empty as missing. Optional nested
/// groups are omitted from JSON entirely when absent, never emitted as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: String,
    pub request_id: String,
    pub session_id: String,
    pub client_id: String,
    /// Event time, serialized as ISO-8601 UTC with millisecond precision.
    #[serde(
        with = "timestamp_millis",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp_formatted: Option<String>,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user: Option<AuditUser>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub platform: Option<KeyValuePairs>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub restricted: Option<KeyValuePairs>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extensions: Option<KeyValuePairs>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub persistent_session_id: Option<String>,
}

/// User identity attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditUser {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub ip_address: String,
}

/// Ordered string-to-string mapping carried as an explicit pair list.
///
/// Pair order is preserved from the wire payload because it affects
/// serialized output equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValuePairs {
    #[serde(rename = "keyValuePair")]
    pub key_value_pair: Vec<KeyValuePair>,
}

/// A single key/value entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

/// Serde adapter for the millisecond-precision UTC timestamp format.
pub(crate) mod timestamp_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => {
                serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|parsed| Some(parsed.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
