//! Output formats for processed batches.

pub mod json;
