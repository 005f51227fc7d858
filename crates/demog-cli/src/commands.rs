use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use demog_ingest::{read_catalog, read_dataset, read_table_with_header, write_catalog, write_dataset};
use demog_model::{CleanOptions, CleaningConfig};
use demog_transform::{
    clean_demographics, merge_catalog, repair_attribute_values, repair_info_levels,
    unknown_code_map,
};

use crate::cli::{CleanArgs, MetadataArgs, UnknownsArgs};
use crate::summary::apply_table_style;
use crate::types::{CleanResult, MetadataResult};

const ATT_VALS_COLUMNS: [&str; 4] = ["Attribute", "Description", "Value", "Meaning"];
const INFO_LEVEL_COLUMNS: [&str; 3] = ["Information level", "Attribute", "Description"];

pub fn run_metadata(args: &MetadataArgs) -> Result<MetadataResult> {
    let span = info_span!("metadata", output = %args.output.display());
    let _guard = span.enter();
    let start = Instant::now();

    let att_vals_table = read_table_with_header(&args.att_vals, &ATT_VALS_COLUMNS)
        .context("read attribute/values sheet")?;
    let info_table = read_table_with_header(&args.info_levels, &INFO_LEVEL_COLUMNS)
        .context("read information-levels sheet")?;

    let value_rows = repair_attribute_values(&att_vals_table)?;
    let level_repair = repair_info_levels(&info_table)?;
    let catalog = merge_catalog(&value_rows, &level_repair.rows);

    let attributes: BTreeSet<&str> = catalog.iter().map(|row| row.attribute.as_str()).collect();
    write_catalog(&args.output, &catalog)?;
    info!(
        value_rows = value_rows.len(),
        level_rows = level_repair.rows.len(),
        repaired_names = level_repair.repaired_names,
        catalog_rows = catalog.len(),
        attributes = attributes.len(),
        duration_ms = start.elapsed().as_millis(),
        "metadata catalog written"
    );

    Ok(MetadataResult {
        output: args.output.clone(),
        value_rows: value_rows.len(),
        level_rows: level_repair.rows.len(),
        repaired_names: level_repair.repaired_names,
        catalog_rows: catalog.len(),
        attributes: attributes.len(),
    })
}

pub fn run_unknowns(args: &UnknownsArgs) -> Result<()> {
    let catalog = read_catalog(&args.catalog)?;
    let unknowns = unknown_code_map(&catalog, &args.keyword);
    let mut table = Table::new();
    table.set_header(vec!["Attribute", "Unknown codes"]);
    apply_table_style(&mut table);
    for (attribute, codes) in &unknowns {
        let rendered: Vec<String> = codes.iter().map(ToString::to_string).collect();
        table.add_row(vec![attribute.clone(), rendered.join(", ")]);
    }
    println!("{table}");
    println!(
        "{} attributes carry unknown codes (keyword {:?})",
        unknowns.len(),
        args.keyword
    );
    Ok(())
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", data = %args.data.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => CleaningConfig::from_json_file(path)
            .with_context(|| format!("load cleaning config: {}", path.display()))?,
        None => CleaningConfig::default(),
    };
    let options = CleanOptions {
        drop_sparse_rows: !args.keep_sparse_rows,
        customer_columns: args.customers,
    };

    let catalog = read_catalog(&args.catalog)?;
    let df = read_dataset(&args.data)?;
    let (mut cleaned, report) = clean_demographics(df, &catalog, &config, &options)?;
    write_dataset(&args.output, &mut cleaned)?;
    info!(
        rows_out = report.rows_out,
        columns_out = report.columns_out,
        duration_ms = start.elapsed().as_millis(),
        "cleaned dataset written"
    );

    Ok(CleanResult {
        output: args.output.clone(),
        report,
    })
}
