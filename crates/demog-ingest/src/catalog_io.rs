//! Attribute catalog CSV round-trip.
//!
//! The catalog is written once by the metadata repair step and re-read by the
//! cleaning step, so the reader must accept the writer's output exactly.
//! Value lists use the bracketed rendering (`[-1, 0]`).

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use demog_model::{CATALOG_HEADERS, CatalogRow, ValueList};

pub fn write_catalog(path: &Path, rows: &[CatalogRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create catalog csv: {}", path.display()))?;
    writer
        .write_record(CATALOG_HEADERS)
        .context("write catalog header")?;
    for row in rows {
        writer
            .write_record([
                row.info_level.as_deref().unwrap_or(""),
                row.attribute.as_str(),
                row.values
                    .as_ref()
                    .map(ValueList::to_bracketed)
                    .unwrap_or_default()
                    .as_str(),
                row.meaning.as_deref().unwrap_or(""),
                row.description.as_deref().unwrap_or(""),
                row.additional_notes.as_deref().unwrap_or(""),
            ])
            .context("write catalog row")?;
    }
    writer.flush().context("flush catalog csv")?;
    debug!(path = %path.display(), rows = rows.len(), "catalog written");
    Ok(())
}

pub fn read_catalog(path: &Path) -> Result<Vec<CatalogRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("read catalog csv: {}", path.display()))?;
    let headers = reader.headers().context("read catalog header")?.clone();
    let index_of = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("catalog missing column {name:?}: {}", path.display()))
    };
    let info_idx = index_of("Information level")?;
    let attr_idx = index_of("Attribute")?;
    let value_idx = index_of("Value")?;
    let meaning_idx = index_of("Meaning")?;
    let desc_idx = index_of("Description")?;
    let notes_idx = index_of("Additional notes")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read catalog row: {}", path.display()))?;
        let field = |idx: usize| -> Option<String> {
            let value = record.get(idx).unwrap_or("").trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };
        let Some(attribute) = field(attr_idx) else {
            continue;
        };
        rows.push(CatalogRow {
            info_level: field(info_idx),
            attribute,
            values: field(value_idx)
                .as_deref()
                .and_then(ValueList::from_bracketed),
            meaning: field(meaning_idx),
            description: field(desc_idx),
            additional_notes: field(notes_idx),
        });
    }
    debug!(path = %path.display(), rows = rows.len(), "catalog loaded");
    Ok(rows)
}
