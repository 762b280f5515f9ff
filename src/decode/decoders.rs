//! Decoder implementations
//!
//! Each decoder handles a specific response format.

use super::types::{DecoderFormat, Page, RecordDecoder};
use crate::error::{Error, Result};
use crate::types::Record;
use serde_json::{Map, Value};
use tracing::warn;

/// Build the decoder for a format. `record_field` names the JSON array that
/// holds the records (ignored for CSV).
pub fn decoder_for(format: DecoderFormat, record_field: Option<&str>) -> Box<dyn RecordDecoder> {
    match format {
        DecoderFormat::Csv => Box::new(CsvDecoder::new()),
        DecoderFormat::Json => match record_field {
            Some(field) => Box::new(JsonDecoder::with_field(field)),
            None => Box::new(JsonDecoder::new()),
        },
    }
}

// ============================================================================
// CSV Decoder
// ============================================================================

/// CSV decoder: the first row names the fields of every following row
#[derive(Debug, Clone)]
pub struct CsvDecoder {
    /// Field delimiter
    delimiter: char,
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvDecoder {
    /// Create a new CSV decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a CSV decoder with a custom delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl RecordDecoder for CsvDecoder {
    fn format(&self) -> DecoderFormat {
        DecoderFormat::Csv
    }

    fn decode(&self, body: &str) -> Result<Page> {
        let body = body.strip_prefix('\u{feff}').unwrap_or(body);
        let mut rows = parse_csv(body, self.delimiter)?.into_iter();

        let Some(headers) = rows.next() else {
            return Ok(Page::default());
        };

        let mut records = Vec::new();
        for (index, fields) in rows.enumerate() {
            if fields.len() > headers.len() {
                return Err(Error::csv(format!(
                    "row {} has {} fields but the header has {}",
                    index + 2,
                    fields.len(),
                    headers.len()
                )));
            }

            let mut fields = fields.into_iter();
            let mut record = Record::with_capacity(headers.len());
            for header in &headers {
                record.insert(header.as_str(), fields.next().unwrap_or_default());
            }
            records.push(record);
        }

        Ok(Page::new(records))
    }
}

/// Split a CSV body into rows of fields.
///
/// A quote opens a quoted field only as the first character of the field;
/// elsewhere it is literal text. Quoted fields may contain the delimiter,
/// `""` escapes and line breaks. Rows end at LF, CRLF or a lone CR outside
/// quotes. Lines with no characters at all are skipped, while a line
/// holding only `""` is a row with one empty field.
fn parse_csv(body: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    // Set once the current field has consumed any character, quotes included
    let mut field_started = false;
    let mut in_quotes = false;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut rows, &mut row, &mut field, field_started);
                field_started = false;
            }
            c if c == delimiter => {
                row.push(std::mem::take(&mut field));
                field_started = false;
            }
            c => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::csv("unterminated quoted field"));
    }

    if field_started || !row.is_empty() {
        end_row(&mut rows, &mut row, &mut field, field_started);
    }

    Ok(rows)
}

fn end_row(
    rows: &mut Vec<Vec<String>>,
    row: &mut Vec<String>,
    field: &mut String,
    field_started: bool,
) {
    if row.is_empty() && !field_started {
        return;
    }
    row.push(std::mem::take(field));
    rows.push(std::mem::take(row));
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder for an object carrying the records under a named array
/// field, e.g. `{"categories": [...]}`. Without a field name the body must
/// be a top-level array.
///
/// Nested objects are flattened into dotted keys (`author.name`) so JSON
/// records line up with the CSV projection of the same fields.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Name of the array holding the records
    record_field: Option<String>,
}

impl JsonDecoder {
    /// Create a decoder for a top-level array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder for records under `field`
    pub fn with_field(field: impl Into<String>) -> Self {
        Self {
            record_field: Some(field.into()),
        }
    }

    fn extract_records(&self, value: Value) -> Result<Vec<Value>> {
        match (&self.record_field, value) {
            (None, Value::Array(items)) => Ok(items),
            (None, other) => Err(Error::decode(format!(
                "expected a JSON array of records, got {}",
                json_type(&other)
            ))),
            (Some(field), Value::Object(mut map)) => match map.remove(field) {
                Some(Value::Array(items)) => Ok(items),
                Some(Value::Null) | None => {
                    let keys: Vec<&String> = map.keys().collect();
                    warn!("No '{field}' array in response; available keys: {keys:?}");
                    Ok(Vec::new())
                }
                Some(other) => Err(Error::decode(format!(
                    "field '{field}' is {}, expected an array",
                    json_type(&other)
                ))),
            },
            (Some(field), other) => Err(Error::decode(format!(
                "expected a JSON object with a '{field}' array, got {}",
                json_type(&other)
            ))),
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn format(&self) -> DecoderFormat {
        DecoderFormat::Json
    }

    fn decode(&self, body: &str) -> Result<Page> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        let records = self
            .extract_records(value)?
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => {
                    let mut record = Record::with_capacity(map.len());
                    flatten_into(&mut record, "", map);
                    Ok(record)
                }
                other => Err(Error::decode(format!(
                    "expected record objects, got {}",
                    json_type(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(records))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Flatten a JSON object into `record`, joining nested keys with `.`
fn flatten_into(record: &mut Record, prefix: &str, map: Map<String, Value>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Object(inner) => flatten_into(record, &name, inner),
            Value::Null => record.insert(name, ""),
            Value::String(s) => record.insert(name, s),
            Value::Bool(b) => record.insert(name, b.to_string()),
            Value::Number(n) => record.insert(name, n.to_string()),
            array @ Value::Array(_) => record.insert(name, array.to_string()),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
