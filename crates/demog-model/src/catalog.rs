//! Attribute catalog records.
//!
//! The catalog is the harmonized view of the two metadata sheets: one row per
//! (attribute, value list, meaning) combination, annotated with the attribute's
//! information level and free-text notes. Value cells hold comma-separated
//! code lists; individual elements that do not parse as integers are kept as
//! raw text rather than discarding the whole list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single entry of a value list: an integer code or unparseable raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueCode {
    Code(i64),
    Text(String),
}

impl ValueCode {
    /// Parse one list element. Integer codes win; anything else stays text.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i64>() {
            Ok(code) => Some(Self::Code(code)),
            Err(_) => Some(Self::Text(trimmed.to_string())),
        }
    }

    /// The integer code, if this entry is one.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ValueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// An ordered list of value codes for one catalog row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueList(pub Vec<ValueCode>);

impl ValueList {
    /// Parse a raw sheet cell such as `"-1, 0"`.
    ///
    /// Returns `None` when no element survives (empty cell, placeholder).
    pub fn from_cell(cell: &str) -> Option<Self> {
        let entries: Vec<ValueCode> = cell
            .split(',')
            .filter_map(ValueCode::parse)
            .collect();
        if entries.is_empty() {
            None
        } else {
            Some(Self(entries))
        }
    }

    /// Parse the bracketed serialized form (`"[-1, 0]"`) written to the
    /// catalog CSV. Also accepts the bare form for hand-edited files.
    pub fn from_bracketed(cell: &str) -> Option<Self> {
        let inner = cell
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']');
        Self::from_cell(inner)
    }

    /// Serialized form used in the catalog CSV, e.g. `[-1, 0]`.
    pub fn to_bracketed(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(ValueCode::to_string).collect();
        format!("[{}]", parts.join(", "))
    }

    /// Iterator over the integer codes, skipping text entries.
    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().filter_map(ValueCode::as_code)
    }

    /// Number of entries that are not integer codes.
    pub fn text_entry_count(&self) -> usize {
        self.0
            .iter()
            .filter(|entry| entry.as_code().is_none())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// One repaired row of the attribute/values sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValueRow {
    pub attribute: String,
    pub description: Option<String>,
    pub values: Option<ValueList>,
    pub meaning: Option<String>,
}

/// One repaired row of the information-levels sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoLevelRow {
    pub info_level: Option<String>,
    pub attribute: String,
    pub description: Option<String>,
    pub additional_notes: Option<String>,
}

/// One row of the merged attribute catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub info_level: Option<String>,
    pub attribute: String,
    pub values: Option<ValueList>,
    pub meaning: Option<String>,
    pub description: Option<String>,
    pub additional_notes: Option<String>,
}

/// Catalog CSV header, in output order.
pub const CATALOG_HEADERS: [&str; 6] = [
    "Information level",
    "Attribute",
    "Value",
    "Meaning",
    "Description",
    "Additional notes",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_code_parses_integers_and_text() {
        assert_eq!(ValueCode::parse("-1"), Some(ValueCode::Code(-1)));
        assert_eq!(ValueCode::parse(" 9 "), Some(ValueCode::Code(9)));
        assert_eq!(
            ValueCode::parse("W"),
            Some(ValueCode::Text("W".to_string()))
        );
        assert_eq!(ValueCode::parse("  "), None);
    }

    #[test]
    fn value_list_from_cell_splits_on_commas() {
        let list = ValueList::from_cell("-1, 0").expect("list");
        assert_eq!(list.codes().collect::<Vec<_>>(), vec![-1, 0]);
        // Tight separators are accepted too.
        let tight = ValueList::from_cell("-1,0,9").expect("list");
        assert_eq!(tight.codes().collect::<Vec<_>>(), vec![-1, 0, 9]);
    }

    #[test]
    fn value_list_keeps_unparseable_elements_as_text() {
        let list = ValueList::from_cell("1, 2, X").expect("list");
        assert_eq!(list.len(), 3);
        assert_eq!(list.codes().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(list.text_entry_count(), 1);
    }

    #[test]
    fn value_list_round_trips_through_bracketed_form() {
        let list = ValueList::from_cell("-1, 0").expect("list");
        let rendered = list.to_bracketed();
        assert_eq!(rendered, "[-1, 0]");
        assert_eq!(ValueList::from_bracketed(&rendered), Some(list));
    }

    #[test]
    fn empty_cell_yields_no_list() {
        assert_eq!(ValueList::from_cell(""), None);
        assert_eq!(ValueList::from_cell(" , "), None);
        assert_eq!(ValueList::from_bracketed("[]"), None);
    }
}
