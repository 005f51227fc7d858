//! Raw metadata sheet reading.
//!
//! The metadata sheets arrive as CSV exports of spreadsheets: a preamble row
//! or two above the real header, a blank leading index column, and stray
//! whitespace or BOM markers in cells. This module locates the header row by
//! the column names the caller requires and hands back a rectangular table of
//! trimmed cells.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_uppercase();
        self.headers
            .iter()
            .position(|header| header.trim().to_uppercase() == wanted)
    }

    /// Cell accessor; out-of-range reads behave like empty cells.
    pub fn cell<'a>(&'a self, row: usize, col: usize) -> &'a str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// True when the row contains every required header name, case-insensitively.
fn is_header_row(row: &[String], required: &[&str]) -> bool {
    required.iter().all(|name| {
        let wanted = name.trim().to_uppercase();
        row.iter()
            .any(|cell| normalize_header(cell).to_uppercase() == wanted)
    })
}

const HEADER_PROBE_ROWS: usize = 10;

/// Read a sheet CSV, locating the header row by the required column names.
///
/// Rows above the header (sheet titles, export preambles) are discarded.
/// Columns with an empty header that are also empty in every data row (the
/// spreadsheet index column) are dropped. Data rows are padded or truncated
/// to the header width; fully empty rows are skipped.
pub fn read_table_with_header(path: &Path, required: &[&str]) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read sheet csv: {}", path.display()))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Ok(RawTable::default());
    }

    let header_index = raw_rows
        .iter()
        .take(HEADER_PROBE_ROWS)
        .position(|row| is_header_row(row, required))
        .ok_or_else(|| {
            anyhow!(
                "no header row with columns {:?} in the first {HEADER_PROBE_ROWS} rows of {}",
                required,
                path.display()
            )
        })?;
    if header_index > 0 {
        debug!(
            path = %path.display(),
            skipped = header_index,
            "skipped preamble rows before header"
        );
    }

    let headers: Vec<String> = raw_rows[header_index]
        .iter()
        .map(|value| normalize_header(value))
        .collect();
    let mut rows = Vec::new();
    for record in raw_rows.iter().skip(header_index + 1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }

    Ok(drop_unnamed_empty_columns(RawTable { headers, rows }))
}

/// Drop columns whose header is empty and whose cells are empty throughout.
fn drop_unnamed_empty_columns(table: RawTable) -> RawTable {
    let keep: Vec<usize> = (0..table.headers.len())
        .filter(|&idx| {
            !table.headers[idx].is_empty()
                || table.rows.iter().any(|row| {
                    row.get(idx)
                        .map(|cell| !cell.is_empty())
                        .unwrap_or(false)
                })
        })
        .collect();
    if keep.len() == table.headers.len() {
        return table;
    }
    let headers = keep.iter().map(|&idx| table.headers[idx].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            keep.iter()
                .map(|&idx| row.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    RawTable { headers, rows }
}
