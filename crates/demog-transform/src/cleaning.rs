//! The demographic cleaning pipeline.
//!
//! Applies the attribute catalog and the column-list configuration to the
//! dataset: unknown-code replacement, column and row drops, sentinel fixes,
//! recodes, registration-year derivation, indicator encoding, and imputation.
//! Stages that reference a column the input does not carry are skipped with a
//! warning rather than failing the run.

use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, DataType, NamedFrom, NewChunkedArray, Series,
};
use tracing::{debug, info, warn};

use demog_model::{BinaryRecode, CatalogRow, CleanOptions, CleaningConfig, RegistrationColumn};

use crate::datetime::parse_year;
use crate::encode::one_hot_encode;
use crate::impute::impute_most_frequent;
use crate::unknowns::unknown_code_map;
use crate::values::{any_to_f64, any_to_string};

/// Why a column left the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Identifier,
    CustomerOnly,
    HighNull,
    Registration,
    OneHotSource,
    Correlated,
}

impl DropReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::CustomerOnly => "customer-only",
            Self::HighNull => "high-null",
            Self::Registration => "registration source",
            Self::OneHotSource => "one-hot source",
            Self::Correlated => "correlated",
        }
    }
}

/// What the cleaning run did, for the CLI summary.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub rows_in: usize,
    pub columns_in: usize,
    pub rows_out: usize,
    pub columns_out: usize,
    pub dropped_columns: Vec<(String, DropReason)>,
    /// Configured columns the input did not carry.
    pub missing_columns: Vec<String>,
    /// Attributes from the unknown map that matched a dataset column.
    pub unknown_columns_matched: usize,
    pub unknown_cells_nulled: usize,
    pub rows_dropped_sparse: usize,
    pub sentinel_cells_nulled: usize,
    pub indicator_columns: Vec<String>,
    pub imputed_columns: Vec<String>,
}

impl CleanReport {
    fn start(df: &DataFrame) -> Self {
        Self {
            rows_in: df.height(),
            columns_in: df.width(),
            ..Self::default()
        }
    }

    fn finish(&mut self, df: &DataFrame) {
        self.rows_out = df.height();
        self.columns_out = df.width();
    }

    pub fn dropped_count(&self, reason: DropReason) -> usize {
        self.dropped_columns
            .iter()
            .filter(|(_, r)| *r == reason)
            .count()
    }
}

/// Run the full cleaning pipeline over a loaded dataset.
pub fn clean_demographics(
    df: DataFrame,
    catalog: &[CatalogRow],
    config: &CleaningConfig,
    options: &CleanOptions,
) -> Result<(DataFrame, CleanReport)> {
    let mut df = df;
    let mut report = CleanReport::start(&df);

    drop_columns(
        &mut df,
        std::slice::from_ref(&config.id_column),
        DropReason::Identifier,
        &mut report,
    )?;
    if options.customer_columns {
        drop_columns(
            &mut df,
            &config.customer_only_columns,
            DropReason::CustomerOnly,
            &mut report,
        )?;
    }

    let unknowns = unknown_code_map(catalog, &config.unknown_keyword);
    let (matched, nulled) = replace_unknown_codes(&mut df, &unknowns)?;
    report.unknown_columns_matched = matched;
    report.unknown_cells_nulled = nulled;
    info!(
        attributes = unknowns.len(),
        columns = matched,
        cells = nulled,
        "unknown codes replaced with missing"
    );

    drop_columns(&mut df, &config.high_null_columns, DropReason::HighNull, &mut report)?;

    if options.drop_sparse_rows {
        let before = df.height();
        df = drop_sparse_rows(df, config.max_row_null_fraction)?;
        report.rows_dropped_sparse = before - df.height();
        info!(
            dropped = report.rows_dropped_sparse,
            threshold = config.max_row_null_fraction,
            "sparse rows dropped"
        );
    }

    for sentinel in &config.sentinel_codes {
        if df.column(&sentinel.column).is_err() {
            skip_missing(&sentinel.column, "sentinel", &mut report);
            continue;
        }
        report.sentinel_cells_nulled += apply_sentinel(&mut df, &sentinel.column, &sentinel.sentinel)?;
    }

    if let Some(recode) = &config.binary_recode {
        if df.column(&recode.column).is_ok() {
            apply_binary_recode(&mut df, recode)?;
        } else {
            skip_missing(&recode.column, "binary recode", &mut report);
        }
    }

    if let Some(registration) = &config.registration {
        if df.column(&registration.column).is_ok() {
            derive_registration_year(&mut df, registration)?;
            report
                .dropped_columns
                .push((registration.column.clone(), DropReason::Registration));
        } else {
            skip_missing(&registration.column, "registration year", &mut report);
        }
    }

    for column in &config.one_hot_columns {
        if df.column(column).is_err() {
            skip_missing(column, "one-hot", &mut report);
            continue;
        }
        let (encoded, names) = one_hot_encode(df, column)?;
        df = encoded;
        debug!(column = %column, indicators = names.len(), "categorical column encoded");
        report
            .dropped_columns
            .push((column.clone(), DropReason::OneHotSource));
        report.indicator_columns.extend(names);
    }

    report.imputed_columns = impute_most_frequent(&mut df)?;
    info!(columns = report.imputed_columns.len(), "missing values imputed");

    drop_columns(&mut df, &config.correlated_columns, DropReason::Correlated, &mut report)?;

    report.finish(&df);
    info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        columns_in = report.columns_in,
        columns_out = report.columns_out,
        "cleaning complete"
    );
    Ok((df, report))
}

fn skip_missing(column: &str, stage: &str, report: &mut CleanReport) {
    warn!(column, stage, "configured column not present; stage skipped");
    report.missing_columns.push(column.to_string());
}

fn drop_columns(
    df: &mut DataFrame,
    columns: &[String],
    reason: DropReason,
    report: &mut CleanReport,
) -> Result<()> {
    for name in columns {
        if df.column(name).is_ok() {
            *df = df.drop(name)?;
            report.dropped_columns.push((name.clone(), reason));
        } else {
            skip_missing(name, reason.label(), report);
        }
    }
    Ok(())
}

/// Null out each attribute's unknown codes in the same-named column.
///
/// Numeric columns compare numerically and upcast to Float64 only when a
/// replacement actually lands; string columns compare against the code's
/// decimal rendering. Attributes without a dataset column are ignored: the
/// catalog describes more attributes than any one extract carries.
fn replace_unknown_codes(
    df: &mut DataFrame,
    unknowns: &BTreeMap<String, Vec<i64>>,
) -> Result<(usize, usize)> {
    let mut matched_columns = 0usize;
    let mut total_nulled = 0usize;
    for (attribute, codes) in unknowns {
        if df.column(attribute).is_err() {
            continue;
        }
        matched_columns += 1;
        let series = df.column(attribute)?.as_materialized_series().clone();
        let mut nulled = 0usize;
        match series.dtype() {
            DataType::String => {
                let needles: Vec<String> = codes.iter().map(ToString::to_string).collect();
                let ca = series.str()?;
                let out: Vec<Option<String>> = ca
                    .into_iter()
                    .map(|value| match value {
                        Some(text) if needles.iter().any(|n| n == text.trim()) => {
                            nulled += 1;
                            None
                        }
                        Some(text) => Some(text.to_string()),
                        None => None,
                    })
                    .collect();
                if nulled > 0 {
                    df.with_column(Series::new(series.name().clone(), out))?;
                }
            }
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => {
                let targets: Vec<f64> = codes.iter().map(|&code| code as f64).collect();
                let out: Vec<Option<f64>> = series
                    .rechunk()
                    .iter()
                    .map(|value| match any_to_f64(&value) {
                        Some(v) if targets.contains(&v) => {
                            nulled += 1;
                            None
                        }
                        other => other,
                    })
                    .collect();
                if nulled > 0 {
                    df.with_column(Series::new(series.name().clone(), out))?;
                }
            }
            other => {
                warn!(column = %attribute, dtype = %other, "unsupported dtype for unknown replacement");
            }
        }
        if nulled > 0 {
            debug!(column = %attribute, nulled, "unknown codes nulled");
        }
        total_nulled += nulled;
    }
    Ok((matched_columns, total_nulled))
}

/// Drop rows whose null fraction exceeds the threshold.
fn drop_sparse_rows(df: DataFrame, max_fraction: f64) -> Result<DataFrame> {
    if df.height() == 0 || df.width() == 0 {
        return Ok(df);
    }
    let mut null_counts = vec![0usize; df.height()];
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if series.null_count() == 0 {
            continue;
        }
        for (idx, value) in series.rechunk().iter().enumerate() {
            if matches!(value, AnyValue::Null) {
                null_counts[idx] += 1;
            }
        }
    }
    let width = df.width() as f64;
    let keep: Vec<bool> = null_counts
        .iter()
        .map(|&nulls| nulls as f64 / width <= max_fraction)
        .collect();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    Ok(df.filter(&mask)?)
}

/// Null the sentinel placeholder and cast the column to Float64.
fn apply_sentinel(df: &mut DataFrame, column: &str, sentinel: &str) -> Result<usize> {
    let series = df.column(column)?.as_materialized_series().clone();
    let mut nulled = 0usize;
    let mut unparsed = 0usize;
    let out: Vec<Option<f64>> = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|value| match value {
                None => None,
                Some(text) if text.trim() == sentinel => {
                    nulled += 1;
                    None
                }
                Some(text) => {
                    let parsed = text.trim().parse::<f64>().ok();
                    if parsed.is_none() {
                        unparsed += 1;
                    }
                    parsed
                }
            })
            .collect(),
        _ => series.rechunk().iter().map(|value| any_to_f64(&value)).collect(),
    };
    if unparsed > 0 {
        warn!(column, unparsed, "values failed the numeric cast and became missing");
    }
    df.with_column(Series::new(series.name().clone(), out))?;
    Ok(nulled)
}

/// Recode a two-valued text column to 0.0/1.0; anything else becomes missing.
fn apply_binary_recode(df: &mut DataFrame, recode: &BinaryRecode) -> Result<()> {
    let series = df.column(&recode.column)?.as_materialized_series().clone();
    let out: Vec<Option<f64>> = series
        .rechunk()
        .iter()
        .map(|value| {
            let text = any_to_string(&value);
            let trimmed = text.trim();
            if trimmed == recode.zero {
                Some(0.0)
            } else if trimmed == recode.one {
                Some(1.0)
            } else {
                None
            }
        })
        .collect();
    df.with_column(Series::new(series.name().clone(), out))?;
    Ok(())
}

/// Replace the registration timestamp with a derived year column.
fn derive_registration_year(df: &mut DataFrame, registration: &RegistrationColumn) -> Result<()> {
    let series = df.column(&registration.column)?.as_materialized_series().clone();
    let mut unparsed = 0usize;
    let years: Vec<Option<i32>> = series
        .rechunk()
        .iter()
        .map(|value| {
            let text = any_to_string(&value);
            if text.trim().is_empty() {
                return None;
            }
            let year = parse_year(&text);
            if year.is_none() {
                unparsed += 1;
            }
            year
        })
        .collect();
    if unparsed > 0 {
        warn!(
            column = %registration.column,
            unparsed,
            "registration timestamps failed to parse"
        );
    }
    df.with_column(Series::new(registration.derived.as_str().into(), years))?;
    *df = df.drop(&registration.column)?;
    Ok(())
}
