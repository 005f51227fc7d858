use std::path::PathBuf;

use demog_transform::CleanReport;

#[derive(Debug)]
pub struct MetadataResult {
    pub output: PathBuf,
    /// Rows in the repaired attribute/values sheet.
    pub value_rows: usize,
    /// Rows in the repaired information-levels sheet.
    pub level_rows: usize,
    /// Malformed attribute cells that were split or de-spaced.
    pub repaired_names: usize,
    /// Rows in the merged catalog.
    pub catalog_rows: usize,
    /// Distinct attributes in the merged catalog.
    pub attributes: usize,
}

#[derive(Debug)]
pub struct CleanResult {
    pub output: PathBuf,
    pub report: CleanReport,
}
