//! Core event schema and validation.

pub mod event;
pub mod validate;
