//! Metadata sheet repair.
//!
//! Both sheets carry known irregularities: continuation rows with blank
//! carry-over cells, a literal ellipsis standing in for "no codes", and
//! attribute-name cells holding two names jammed together with stray internal
//! spaces. This module repairs each sheet into typed rows and merges them
//! into the attribute catalog.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use tracing::{debug, warn};

use demog_ingest::RawTable;
use demog_model::{AttributeValueRow, CatalogRow, InfoLevelRow, ValueList};

/// Placeholder used in the values sheet where a code list is elided.
const VALUE_PLACEHOLDER: &str = "…";

/// Two attribute names in one cell, each possibly broken by one internal
/// space. Mirrors the known corruption pattern of the source sheet.
const SPLIT_PATTERN: &str = r"(\w+ \w+|\w+)\s+(\w+ \w+|\w+)";

fn require_column(table: &RawTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| anyhow!("sheet is missing the {name:?} column"))
}

fn non_empty(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Repair the attribute/values sheet.
///
/// `Attribute`, `Description`, and `Meaning` forward-fill from the previous
/// populated row; the ellipsis placeholder in `Value` becomes "no codes";
/// remaining value cells parse into code lists.
pub fn repair_attribute_values(table: &RawTable) -> Result<Vec<AttributeValueRow>> {
    let attr_idx = require_column(table, "Attribute")?;
    let desc_idx = require_column(table, "Description")?;
    let value_idx = require_column(table, "Value")?;
    let meaning_idx = require_column(table, "Meaning")?;

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut last_attribute: Option<String> = None;
    let mut last_description: Option<String> = None;
    let mut last_meaning: Option<String> = None;
    let mut orphaned = 0usize;

    for row_idx in 0..table.rows.len() {
        if let Some(attribute) = non_empty(table.cell(row_idx, attr_idx)) {
            last_attribute = Some(attribute);
        }
        if let Some(description) = non_empty(table.cell(row_idx, desc_idx)) {
            last_description = Some(description);
        }
        if let Some(meaning) = non_empty(table.cell(row_idx, meaning_idx)) {
            last_meaning = Some(meaning);
        }
        let Some(attribute) = last_attribute.clone() else {
            // Rows above the first named attribute have nothing to attach to.
            orphaned += 1;
            continue;
        };
        let raw_value = table.cell(row_idx, value_idx).trim();
        let values = if raw_value == VALUE_PLACEHOLDER {
            None
        } else {
            ValueList::from_cell(raw_value)
        };
        rows.push(AttributeValueRow {
            attribute,
            description: last_description.clone(),
            values,
            meaning: last_meaning.clone(),
        });
    }
    if orphaned > 0 {
        warn!(orphaned, "values sheet rows before the first attribute were skipped");
    }
    debug!(rows = rows.len(), "attribute/values sheet repaired");
    Ok(rows)
}

/// Result of repairing the information-levels sheet.
#[derive(Debug, Clone)]
pub struct InfoLevelRepair {
    pub rows: Vec<InfoLevelRow>,
    /// Malformed attribute cells that were split or de-spaced.
    pub repaired_names: usize,
}

/// Repair the information-levels sheet.
///
/// `Information level` forward-fills from section-start rows. Attribute cells
/// containing whitespace are malformed: when the split pattern matches, the
/// cell yields one record per extracted name; otherwise the whitespace is
/// stripped and the cell treated as a single name. Extracted records inherit
/// the row's level, description, and notes.
pub fn repair_info_levels(table: &RawTable) -> Result<InfoLevelRepair> {
    let level_idx = require_column(table, "Information level")?;
    let attr_idx = require_column(table, "Attribute")?;
    let desc_idx = require_column(table, "Description")?;
    let notes_idx = table.column_index("Additional notes");

    let splitter = Regex::new(SPLIT_PATTERN).context("compile attribute split pattern")?;

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut last_level: Option<String> = None;
    let mut repaired_names = 0usize;

    for row_idx in 0..table.rows.len() {
        if let Some(level) = non_empty(table.cell(row_idx, level_idx)) {
            last_level = Some(level);
        }
        let raw_attr = table.cell(row_idx, attr_idx).trim();
        if raw_attr.is_empty() {
            continue;
        }
        let description = non_empty(table.cell(row_idx, desc_idx));
        let additional_notes =
            notes_idx.and_then(|idx| non_empty(table.cell(row_idx, idx)));

        let mut push = |attribute: String| {
            rows.push(InfoLevelRow {
                info_level: last_level.clone(),
                attribute,
                description: description.clone(),
                additional_notes: additional_notes.clone(),
            });
        };

        if !raw_attr.contains(char::is_whitespace) {
            push(raw_attr.to_string());
            continue;
        }
        repaired_names += 1;
        if let Some(captures) = splitter.captures(raw_attr) {
            let first = strip_whitespace(&captures[1]);
            let second = strip_whitespace(&captures[2]);
            debug!(cell = raw_attr, %first, %second, "split malformed attribute cell");
            push(first);
            push(second);
        } else {
            let collapsed = strip_whitespace(raw_attr);
            warn!(cell = raw_attr, repaired = %collapsed, "de-spaced unsplittable attribute cell");
            push(collapsed);
        }
    }
    debug!(
        rows = rows.len(),
        repaired_names, "information-levels sheet repaired"
    );
    Ok(InfoLevelRepair {
        rows,
        repaired_names,
    })
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Outer-merge the repaired sheets on attribute name.
///
/// Attribute/value rows keep their order and gain the attribute's level and
/// notes; the values-sheet description wins when both sheets carry one.
/// Attributes known only to the information-levels sheet are appended after,
/// ordered by (information level, attribute).
pub fn merge_catalog(
    att_vals: &[AttributeValueRow],
    info_levels: &[InfoLevelRow],
) -> Vec<CatalogRow> {
    let mut info_by_attr: BTreeMap<&str, &InfoLevelRow> = BTreeMap::new();
    for row in info_levels {
        info_by_attr.entry(row.attribute.as_str()).or_insert(row);
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut rows = Vec::with_capacity(att_vals.len());
    for value_row in att_vals {
        seen.insert(value_row.attribute.as_str());
        let info = info_by_attr.get(value_row.attribute.as_str());
        rows.push(CatalogRow {
            info_level: info.and_then(|row| row.info_level.clone()),
            attribute: value_row.attribute.clone(),
            values: value_row.values.clone(),
            meaning: value_row.meaning.clone(),
            description: value_row
                .description
                .clone()
                .or_else(|| info.and_then(|row| row.description.clone())),
            additional_notes: info.and_then(|row| row.additional_notes.clone()),
        });
    }

    let mut info_only: Vec<&&InfoLevelRow> = info_by_attr
        .values()
        .filter(|row| !seen.contains(row.attribute.as_str()))
        .collect();
    info_only.sort_by(|left, right| {
        (left.info_level.as_deref(), left.attribute.as_str())
            .cmp(&(right.info_level.as_deref(), right.attribute.as_str()))
    });
    for info in info_only {
        rows.push(CatalogRow {
            info_level: info.info_level.clone(),
            attribute: info.attribute.clone(),
            values: None,
            meaning: None,
            description: info.description.clone(),
            additional_notes: info.additional_notes.clone(),
        });
    }
    rows
}
