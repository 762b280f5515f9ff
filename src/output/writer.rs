//! CSV export writer
//!
//! Writes one file per category, named `<timestamp>_<category>_posts.csv`.

use crate::error::{Error, Result};
use crate::types::Record;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp prefix of export file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Used when nothing of the category name survives sanitization
const FALLBACK_NAME: &str = "category";

/// Reduce a category name to a file name fragment
///
/// Keeps alphanumerics, spaces, `-` and `_`, trims the result, and turns
/// each run of spaces into a single `_`.
pub fn sanitize_category_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    kept.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// File name for a category export taken at `timestamp`
pub fn export_filename<Tz>(category_name: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut name = sanitize_category_name(category_name);
    if name.is_empty() {
        name = FALLBACK_NAME.to_string();
    }
    format!("{}_{name}_posts.csv", timestamp.format(TIMESTAMP_FORMAT))
}

/// Quote a field when it holds a delimiter, a quote or a line break
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<'a, W: Write>(out: &mut W, fields: impl Iterator<Item = &'a str>) -> std::io::Result<()> {
    let line = fields.map(csv_escape).collect::<Vec<_>>().join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")
}

/// Write `records` as CSV to `out`
///
/// The header is the first record's field set. Later records are written
/// in that column order; fields they lack are left empty and fields the
/// header lacks are dropped.
pub fn write_csv<W: Write>(out: &mut W, records: &[Record]) -> Result<usize> {
    let Some(first) = records.first() else {
        return Ok(0);
    };
    let header: Vec<&str> = first.keys().collect();

    write_row(out, header.iter().copied())?;
    for record in records {
        write_row(out, header.iter().map(|column| record.get(column).unwrap_or("")))?;
    }
    out.flush()?;

    Ok(records.len())
}

/// Writes category exports into one directory
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    /// Create an exporter writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Target directory
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory (and parents) if missing
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                Error::output(format!(
                    "Failed to create directory {}: {e}",
                    self.output_dir.display()
                ))
            })?;
            info!("Created output directory: {}", self.output_dir.display());
        }
        Ok(())
    }

    /// Export the records of one category
    ///
    /// Returns the written path, or `None` when there is nothing to write.
    pub fn write_records<Tz>(
        &self,
        records: &[Record],
        category_name: &str,
        now: &DateTime<Tz>,
    ) -> Result<Option<PathBuf>>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if records.is_empty() {
            debug!("No records for {category_name}, skipping export");
            return Ok(None);
        }

        self.ensure_dir()?;
        let path = self.output_dir.join(export_filename(category_name, now));

        let file = fs::File::create(&path).map_err(|e| {
            Error::output(format!("Failed to create file {}: {e}", path.display()))
        })?;
        let mut out = BufWriter::new(file);
        let written = write_csv(&mut out, records)?;

        info!(
            "Saved {written} posts to {}",
            path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned()
            )
        );
        Ok(Some(path))
    }
}
