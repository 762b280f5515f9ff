//! Response decoder module
//!
//! Supports: CSV (header row), JSON (object with a named record array)
//!
//! # Overview
//!
//! The forum API answers listing calls in the format requested through the
//! `output` query parameter. Each decoder turns one response body into a
//! [`Page`] of string [`Record`](crate::types::Record)s.

mod decoders;
mod types;

pub use decoders::{decoder_for, CsvDecoder, JsonDecoder};
pub use types::{DecoderFormat, Page, RecordDecoder};

#[cfg(test)]
mod tests;
