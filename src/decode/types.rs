//! Decoder types and traits

use crate::error::{Error, Result};
use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format of the response body, sent to the server as `output=<format>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// Delimited text with a header row (default)
    #[default]
    Csv,
    /// JSON object holding a named array of records
    Json,
}

impl DecoderFormat {
    /// Value of the `output` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            DecoderFormat::Csv => "csv",
            DecoderFormat::Json => "json",
        }
    }
}

impl fmt::Display for DecoderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecoderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(DecoderFormat::Csv),
            "json" => Ok(DecoderFormat::Json),
            other => Err(Error::InvalidConfigValue {
                field: "output".to_string(),
                message: format!("unsupported format '{other}' (expected csv or json)"),
            }),
        }
    }
}

/// Records decoded from one response body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Records in server order
    pub records: Vec<Record>,
}

impl Page {
    /// Create a page from records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take the records out of the page
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Format this decoder expects; used for the `output` query parameter
    fn format(&self) -> DecoderFormat;

    /// Decode the response body into a page of records
    fn decode(&self, body: &str) -> Result<Page>;
}
