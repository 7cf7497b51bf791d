//! Reading benchmark report rows.
//!
//! The harness appends one row per measured run:
//! `vertexCount,probability,time,"dd:MM HH:mm:ss"`. Only fields 0 and 2 are
//! required; everything after them is kept as raw text for diagnostics.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace};

use crate::error::{PlotError, PlotResult};

const REQUIRED_FIELDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Field 0, the grouping key
    pub vertex_count: i64,
    /// Field 1, free-form, unused by the plots
    pub probability: Option<String>,
    /// Field 2, elapsed time in ms
    pub time: i64,
    /// Field 3 if present
    pub timestamp: Option<String>,
}

impl Record {
    fn from_row(row: &StringRecord, line: u64) -> PlotResult<Self> {
        if row.len() < REQUIRED_FIELDS {
            return Err(PlotError::Parse {
                line,
                reason: format!(
                    "expected at least {REQUIRED_FIELDS} fields, got {}",
                    row.len()
                ),
            });
        }
        let optional = |idx: usize| {
            row.get(idx)
                .filter(|field| !field.is_empty())
                .map(str::to_owned)
        };
        Ok(Self {
            vertex_count: parse_int(row, 0, line)?,
            probability: optional(1),
            time: parse_int(row, 2, line)?,
            timestamp: optional(3),
        })
    }
}

fn parse_int(row: &StringRecord, idx: usize, line: u64) -> PlotResult<i64> {
    let field = row.get(idx).unwrap_or_default();
    field.parse::<i64>().map_err(|err| PlotError::Parse {
        line,
        reason: format!("field {idx} {field:?} is not an integer: {err}"),
    })
}

/// Reads every record of the CSV file at `path`.
///
/// The file is closed before returning, whether or not parsing succeeded.
pub fn read_records(path: &Path) -> PlotResult<Vec<Record>> {
    let file = File::open(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(file, path)?;
    match (records.first(), records.last()) {
        (Some(first), Some(last)) => debug!(
            "Read {} records from {path:?}, recorded {} to {}",
            records.len(),
            first.timestamp.as_deref().unwrap_or("?"),
            last.timestamp.as_deref().unwrap_or("?")
        ),
        _ => debug!("Read no records from {path:?}"),
    }
    Ok(records)
}

/// Parses headerless CSV from any reader. `source` only names the input in
/// errors.
///
/// Blank lines are rejected like any other short row; the csv reader alone
/// would skip them.
pub fn parse_records<R: Read>(mut reader: R, source: &Path) -> PlotResult<Vec<Record>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source_err| PlotError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;
    let text = String::from_utf8(bytes).map_err(|err| PlotError::Parse {
        line: line_of_offset(err.as_bytes(), err.utf8_error().valid_up_to()),
        reason: "input is not valid UTF-8".to_owned(),
    })?;
    check_blank_lines(&text)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 1;
        let row = row.map_err(|err| csv_error(err, source, fallback_line))?;
        let line = row.position().map_or(fallback_line, |pos| pos.line());
        let record = Record::from_row(&row, line)?;
        trace!(
            "Line {line}: {} vertices, probability {:?}, recorded {:?}",
            record.vertex_count, record.probability, record.timestamp
        );
        records.push(record);
    }
    Ok(records)
}

/// Fails on the first empty or whitespace-only line outside a quoted field.
fn check_blank_lines(text: &str) -> PlotResult<()> {
    let mut in_quotes = false;
    for (idx, line) in text.lines().enumerate() {
        if !in_quotes && line.trim().is_empty() {
            return Err(PlotError::Parse {
                line: idx as u64 + 1,
                reason: format!("expected at least {REQUIRED_FIELDS} fields, got an empty line"),
            });
        }
        // "" escapes toggle twice and cancel out
        if line.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }
    Ok(())
}

fn line_of_offset(bytes: &[u8], offset: usize) -> u64 {
    bytes[..offset].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}

fn csv_error(err: csv::Error, source: &Path, line: u64) -> PlotError {
    let line = err.position().map_or(line, |pos| pos.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source_err) => PlotError::Io {
            path: PathBuf::from(source),
            source: source_err,
        },
        _ => PlotError::Parse { line, reason },
    }
}
