//! Per-record validation and the batch-level aggregate failure.

use crate::core::event::AuditEvent;

/// Verdict for one decoded record.
///
/// `is_valid` is authoritative; `message` carries the decoded event for
/// diagnostic completeness whether or not the record passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<AuditEvent>,
}

/// Checks the required-field rule for one event.
///
/// An event is valid iff `event_id`, `request_id`, `session_id`,
/// `client_id`, and `event_name` are non-empty and `timestamp` is present.
/// Optional nested groups never affect the verdict. Invalid content is a
/// normal return value here; it only escalates at batch granularity.
pub fn validate(event: AuditEvent) -> ValidationResult {
    let is_valid = !event.event_id.is_empty()
        && !event.request_id.is_empty()
        && !event.session_id.is_empty()
        && !event.client_id.is_empty()
        && !event.event_name.is_empty()
        && event.timestamp.is_some();

    ValidationResult {
        is_valid,
        message: Some(event),
    }
}

/// Aggregate failure for a whole batch.
///
/// Owns the full ordered result sequence, valid and invalid alike, so
/// callers get complete context rather than just the first failure.
#[derive(Debug)]
pub struct ValidationException {
    results: Vec<ValidationResult>,
}

impl ValidationException {
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self { results }
    }

    /// Per-record verdicts in original batch order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }
}

impl std::fmt::Display for ValidationException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "One or more event messages failed validation.")
    }
}

impl std::error::Error for ValidationException {}
