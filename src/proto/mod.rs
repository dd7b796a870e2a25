//! Wire codec for audit events.
//!
//! Decoding runs against one fixed schema version. Top-level field tags
//! outside the schema are collected rather than rejected, so payloads from
//! newer producers decode cleanly and the extra fields surface as data.

pub mod decode;
#[cfg(test)]
pub(crate) mod encode;

pub use decode::{decode_audit_event, UnknownField};

/// Field numbers for the audit event schema.
pub(crate) mod tags {
    pub const EVENT_ID: u32 = 1;
    pub const REQUEST_ID: u32 = 2;
    pub const SESSION_ID: u32 = 3;
    pub const CLIENT_ID: u32 = 4;
    pub const TIMESTAMP: u32 = 5;
    pub const TIMESTAMP_FORMATTED: u32 = 6;
    pub const EVENT_NAME: u32 = 7;
    pub const USER: u32 = 8;
    pub const PLATFORM: u32 = 9;
    pub const RESTRICTED: u32 = 10;
    pub const EXTENSIONS: u32 = 11;
    pub const PERSISTENT_SESSION_ID: u32 = 12;

    pub const TIMESTAMP_SECONDS: u32 = 1;
    pub const TIMESTAMP_NANOS: u32 = 2;

    pub const USER_ID: u32 = 1;
    pub const USER_EMAIL: u32 = 2;
    pub const USER_PHONE: u32 = 3;
    pub const USER_IP_ADDRESS: u32 = 4;

    pub const PAIRS_ENTRY: u32 = 1;
    pub const PAIR_KEY: u32 = 1;
    pub const PAIR_VALUE: u32 = 2;
}
