//! Batch pipeline: decode, validate, aggregate.
//!
//! The batch contract is all-or-nothing: one invalid record rejects the
//! whole batch with the complete ordered result sequence as evidence.

use crate::core::event::AuditEvent;
use crate::core::validate::{validate, ValidationException, ValidationResult};
use crate::report::report_unknown_fields;
use crate::sources::Record;

/// Failure modes for one batch invocation.
///
/// Payload and decode errors are structural and abort the batch at the
/// failing record; a validation failure carries every record's verdict.
#[derive(Debug)]
pub enum IntakeError {
    Payload(base64::DecodeError),
    Decode(prost::DecodeError),
    Validation(ValidationException),
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::Payload(err) => write!(f, "payload decode error: {err}"),
            IntakeError::Decode(err) => write!(f, "event decode error: {err}"),
            IntakeError::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IntakeError {}

impl From<base64::DecodeError> for IntakeError {
    fn from(err: base64::DecodeError) -> Self {
        IntakeError::Payload(err)
    }
}

impl From<prost::DecodeError> for IntakeError {
    fn from(err: prost::DecodeError) -> Self {
        IntakeError::Decode(err)
    }
}

impl From<ValidationException> for IntakeError {
    fn from(err: ValidationException) -> Self {
        IntakeError::Validation(err)
    }
}

/// Processes one batch of records into validated events.
///
/// First pass decodes and validates every record in input order, emitting
/// unknown-field diagnostics as a side channel. Second pass applies the
/// all-or-nothing policy: any invalid record raises a
/// [`ValidationException`] owning the full result sequence, otherwise the
/// validated events come back in original batch order.
pub fn process_batch(records: &[Record]) -> Result<Vec<AuditEvent>, IntakeError> {
    let mut results: Vec<ValidationResult> = Vec::with_capacity(records.len());

    for record in records {
        let payload = record.payload()?;
        let (event, unknown_fields) = crate::proto::decode_audit_event(&payload)?;
        report_unknown_fields(
            record.source_name(),
            record.channel_kind(),
            &event,
            &unknown_fields,
        );
        results.push(validate(event));
    }

    if results.iter().any(|result| !result.is_valid) {
        return Err(ValidationException::new(results).into());
    }

    Ok(results
        .into_iter()
        .filter_map(|result| result.message)
        .collect())
}
