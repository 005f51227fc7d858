//! Demographic dataset loading and writing.
//!
//! The dataset is a plain headered CSV. Schema inference runs over the whole
//! file: several coded columns mix integers with placeholder text (`X`, `XX`)
//! and must come in as strings rather than fail a numeric parse midway.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use tracing::info;

pub fn read_dataset(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open dataset csv: {}", path.display()))?
        .finish()
        .with_context(|| format!("read dataset csv: {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "dataset loaded"
    );
    Ok(df)
}

pub fn write_dataset(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("create output csv: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write output csv: {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "dataset written"
    );
    Ok(())
}
