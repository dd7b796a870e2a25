//! Audit intake library crate.
//!
//! Decodes binary audit event payloads from queue and notification-topic
//! records, validates them, and applies an all-or-nothing batch policy.

pub mod batch;
pub mod core;
pub mod formats;
pub mod proto;
pub mod report;
pub mod sources;

pub use crate::batch::{process_batch, IntakeError};
pub use crate::core::event::AuditEvent;
pub use crate::core::validate::{validate, ValidationException, ValidationResult};
pub use crate::sources::{ChannelKind, Record};
