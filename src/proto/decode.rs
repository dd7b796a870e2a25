//! Tolerant audit event decoder.
//!
//! Built on the `prost::encoding` primitives so wire-level semantics match
//! standard protobuf. Decoding fails only on structural malformation
//! (truncation, invalid tag/wire-type combinations); unknown top-level tags
//! always decode successfully and come back as [`UnknownField`] values.

use chrono::{DateTime, Utc};
use prost::bytes::Buf;
use prost::encoding::{decode_key, decode_varint, skip_field, DecodeContext, WireType};
use prost::DecodeError;
use serde::Serialize;

use crate::core::event::{AuditEvent, AuditUser, KeyValuePair, KeyValuePairs};
use crate::proto::tags;

/// A field tag present on the wire but absent from the schema.
///
/// `key` is the decimal field number, `value` the raw rendering of the wire
/// value. Created transiently during decode and consumed by the reporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownField {
    pub key: String,
    pub value: String,
}

/// Decodes one audit event payload.
///
/// Returns the schema-conformant event plus every unknown top-level field in
/// wire order. Pure transform; emitting diagnostics for the unknown fields
/// is the reporter's job.
pub fn decode_audit_event(payload: &[u8]) -> Result<(AuditEvent, Vec<UnknownField>), DecodeError> {
    let mut buf = payload;
    let mut event = AuditEvent::default();
    let mut unknown_fields = Vec::new();

    while buf.has_remaining() {
        let (tag, wire_type) = decode_key(&mut buf)?;
        match tag {
            tags::EVENT_ID => event.event_id = decode_string(wire_type, &mut buf)?,
            tags::REQUEST_ID => event.request_id = decode_string(wire_type, &mut buf)?,
            tags::SESSION_ID => event.session_id = decode_string(wire_type, &mut buf)?,
            tags::CLIENT_ID => event.client_id = decode_string(wire_type, &mut buf)?,
            tags::TIMESTAMP => {
                let field = take_length_delimited(wire_type, &mut buf)?;
                event.timestamp = Some(decode_timestamp(field)?);
            }
            tags::TIMESTAMP_FORMATTED => {
                event.timestamp_formatted = Some(decode_string(wire_type, &mut buf)?)
            }
            tags::EVENT_NAME => event.event_name = decode_string(wire_type, &mut buf)?,
            tags::USER => {
                let field = take_length_delimited(wire_type, &mut buf)?;
                event.user = Some(decode_user(field)?);
            }
            tags::PLATFORM => {
                let field = take_length_delimited(wire_type, &mut buf)?;
                event.platform = Some(decode_pairs(field)?);
            }
            tags::RESTRICTED => {
                let field = take_length_delimited(wire_type, &mut buf)?;
                event.restricted = Some(decode_pairs(field)?);
            }
            tags::EXTENSIONS => {
                let field = take_length_delimited(wire_type, &mut buf)?;
                event.extensions = Some(decode_pairs(field)?);
            }
            tags::PERSISTENT_SESSION_ID => {
                event.persistent_session_id = Some(decode_string(wire_type, &mut buf)?)
            }
            _ => unknown_fields.push(decode_unknown(tag, wire_type, &mut buf)?),
        }
    }

    Ok((event, unknown_fields))
}

fn decode_string(wire_type: WireType, buf: &mut &[u8]) -> Result<String, DecodeError> {
    let field = take_length_delimited(wire_type, buf)?;
    String::from_utf8(field.to_vec())
        .map_err(|_| DecodeError::new("string field is not valid UTF-8"))
}

fn take_length_delimited<'a>(
    wire_type: WireType,
    buf: &mut &'a [u8],
) -> Result<&'a [u8], DecodeError> {
    if wire_type != WireType::LengthDelimited {
        return Err(DecodeError::new("expected length-delimited field"));
    }
    let len = decode_varint(buf)? as usize;
    if buf.len() < len {
        return Err(DecodeError::new("buffer underflow"));
    }
    let (field, rest) = buf.split_at(len);
    *buf = rest;
    Ok(field)
}

fn decode_timestamp(field: &[u8]) -> Result<DateTime<Utc>, DecodeError> {
    let mut buf = field;
    let mut seconds = 0_i64;
    let mut nanos = 0_i64;

    while buf.has_remaining() {
        let (tag, wire_type) = decode_key(&mut buf)?;
        match tag {
            tags::TIMESTAMP_SECONDS => {
                expect_varint(wire_type)?;
                seconds = decode_varint(&mut buf)? as i64;
            }
            tags::TIMESTAMP_NANOS => {
                expect_varint(wire_type)?;
                nanos = decode_varint(&mut buf)? as i64;
            }
            _ => skip_field(wire_type, tag, &mut buf, DecodeContext::default())?,
        }
    }

    if !(0..1_000_000_000).contains(&nanos) {
        return Err(DecodeError::new("timestamp nanos out of range"));
    }
    DateTime::from_timestamp(seconds, nanos as u32)
        .ok_or_else(|| DecodeError::new("timestamp out of range"))
}

fn decode_user(field: &[u8]) -> Result<AuditUser, DecodeError> {
    let mut buf = field;
    let mut user = AuditUser::default();

    while buf.has_remaining() {
        let (tag, wire_type) = decode_key(&mut buf)?;
        match tag {
            tags::USER_ID => user.id = decode_string(wire_type, &mut buf)?,
            tags::USER_EMAIL => user.email = decode_string(wire_type, &mut buf)?,
            tags::USER_PHONE => user.phone = decode_string(wire_type, &mut buf)?,
            tags::USER_IP_ADDRESS => user.ip_address = decode_string(wire_type, &mut buf)?,
            _ => skip_field(wire_type, tag, &mut buf, DecodeContext::default())?,
        }
    }

    Ok(user)
}

fn decode_pairs(field: &[u8]) -> Result<KeyValuePairs, DecodeError> {
    let mut buf = field;
    let mut pairs = KeyValuePairs::default();

    while buf.has_remaining() {
        let (tag, wire_type) = decode_key(&mut buf)?;
        match tag {
            tags::PAIRS_ENTRY => {
                let entry = take_length_delimited(wire_type, &mut buf)?;
                pairs.key_value_pair.push(decode_pair(entry)?);
            }
            _ => skip_field(wire_type, tag, &mut buf, DecodeContext::default())?,
        }
    }

    Ok(pairs)
}

fn decode_pair(field: &[u8]) -> Result<KeyValuePair, DecodeError> {
    let mut buf = field;
    let mut pair = KeyValuePair::default();

    while buf.has_remaining() {
        let (tag, wire_type) = decode_key(&mut buf)?;
        match tag {
            tags::PAIR_KEY => pair.key = decode_string(wire_type, &mut buf)?,
            tags::PAIR_VALUE => pair.value = decode_string(wire_type, &mut buf)?,
            _ => skip_field(wire_type, tag, &mut buf, DecodeContext::default())?,
        }
    }

    Ok(pair)
}

/// Reads the value of an unrecognized tag and renders it as text.
///
/// Length-delimited values render lossily as UTF-8, numeric wire types as
/// decimal. Group wire types are legacy protobuf and structurally rejected.
fn decode_unknown(
    tag: u32,
    wire_type: WireType,
    buf: &mut &[u8],
) -> Result<UnknownField, DecodeError> {
    let value = match wire_type {
        WireType::Varint => decode_varint(buf)?.to_string(),
        WireType::ThirtyTwoBit => {
            if buf.len() < 4 {
                return Err(DecodeError::new("buffer underflow"));
            }
            buf.get_u32_le().to_string()
        }
        WireType::SixtyFourBit => {
            if buf.len() < 8 {
                return Err(DecodeError::new("buffer underflow"));
            }
            buf.get_u64_le().to_string()
        }
        WireType::LengthDelimited => {
            let field = take_length_delimited(wire_type, buf)?;
            String::from_utf8_lossy(field).into_owned()
        }
        WireType::StartGroup | WireType::EndGroup => {
            return Err(DecodeError::new("group wire types are not supported"));
        }
    };

    Ok(UnknownField {
        key: tag.to_string(),
        value,
    })
}

fn expect_varint(wire_type: WireType) -> Result<(), DecodeError> {
    if wire_type != WireType::Varint {
        return Err(DecodeError::new("expected varint field"));
    }
    Ok(())
}
