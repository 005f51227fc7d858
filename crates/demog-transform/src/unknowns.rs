//! Unknown-code detection.
//!
//! Catalog rows whose meaning mentions the unknown keyword contribute their
//! codes to a per-attribute replacement map; the cleaning step nulls those
//! codes out of the dataset.

use std::collections::BTreeMap;

use tracing::debug;

use demog_model::CatalogRow;

/// Build the attribute -> unknown codes map.
///
/// Matching is a case-insensitive substring test on the meaning; rows without
/// a meaning never match. Codes are deduplicated per attribute, keeping first
/// appearance order. Text entries in a matching value list carry no code and
/// are skipped.
pub fn unknown_code_map(catalog: &[CatalogRow], keyword: &str) -> BTreeMap<String, Vec<i64>> {
    let needle = keyword.to_lowercase();
    let mut map: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for row in catalog {
        let Some(meaning) = row.meaning.as_deref() else {
            continue;
        };
        if !meaning.to_lowercase().contains(&needle) {
            continue;
        }
        let Some(values) = row.values.as_ref() else {
            continue;
        };
        if values.text_entry_count() > 0 {
            debug!(
                attribute = %row.attribute,
                skipped = values.text_entry_count(),
                "non-integer entries in an unknown value list were skipped"
            );
        }
        let entry = map.entry(row.attribute.clone()).or_default();
        for code in values.codes() {
            if !entry.contains(&code) {
                entry.push(code);
            }
        }
    }
    map.retain(|_, codes| !codes.is_empty());
    map
}
