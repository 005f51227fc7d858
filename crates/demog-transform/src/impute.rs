//! Most-frequent-value imputation.

use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use tracing::warn;

use crate::values::{any_to_f64, format_numeric};

/// Fill nulls in every column with that column's most frequent value.
///
/// Numeric columns come back as Float64 (ints with gaps upcast on fill);
/// string columns stay strings. On a frequency tie the smaller value wins.
/// Entirely-null columns cannot be imputed and are left alone. Returns the
/// names of the columns that were filled.
pub fn impute_most_frequent(df: &mut DataFrame) -> Result<Vec<String>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut imputed = Vec::new();
    for name in names {
        let series = df.column(&name)?.as_materialized_series().clone();
        if series.null_count() == 0 {
            continue;
        }
        if series.null_count() == series.len() {
            warn!(column = %name, "column is entirely null and cannot be imputed");
            continue;
        }
        match series.dtype() {
            DataType::String => {
                let ca = series.str()?;
                let mut counts: BTreeMap<String, usize> = BTreeMap::new();
                for value in ca.into_iter().flatten() {
                    *counts.entry(value.to_string()).or_default() += 1;
                }
                // Ascending key order makes "keep only strictly greater"
                // resolve ties toward the smaller value.
                let mut mode: Option<(String, usize)> = None;
                for (value, &count) in &counts {
                    if mode.as_ref().map(|(_, best)| count > *best).unwrap_or(true) {
                        mode = Some((value.clone(), count));
                    }
                }
                let Some((mode, _)) = mode else {
                    continue;
                };
                let filled: Vec<String> = ca
                    .into_iter()
                    .map(|value| value.map_or_else(|| mode.clone(), str::to_string))
                    .collect();
                df.with_column(Series::new(series.name().clone(), filled))?;
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
                let values: Vec<Option<f64>> = series.rechunk().iter().map(|v| any_to_f64(&v)).collect();
                let mut counts: BTreeMap<String, (f64, usize)> = BTreeMap::new();
                for value in values.iter().flatten() {
                    let entry = counts
                        .entry(format_numeric(*value))
                        .or_insert((*value, 0));
                    entry.1 += 1;
                }
                let mut mode: Option<(f64, usize)> = None;
                for &(value, count) in counts.values() {
                    mode = match mode {
                        None => Some((value, count)),
                        Some((best_value, best_count)) => {
                            if count > best_count || (count == best_count && value < best_value) {
                                Some((value, count))
                            } else {
                                Some((best_value, best_count))
                            }
                        }
                    };
                }
                let Some((mode, _)) = mode else {
                    continue;
                };
                let filled: Vec<f64> = values.iter().map(|value| value.unwrap_or(mode)).collect();
                df.with_column(Series::new(series.name().clone(), filled))?;
            }
            other => {
                warn!(column = %name, dtype = %other, "unsupported dtype for imputation; skipped");
                continue;
            }
        }
        imputed.push(name);
    }
    Ok(imputed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn fills_numeric_nulls_with_the_most_frequent_value() {
        let mut df = DataFrame::new(vec![Column::new(
            "a".into(),
            [Some(2.0), Some(2.0), None, Some(5.0)],
        )])
        .expect("frame");

        let imputed = impute_most_frequent(&mut df).expect("impute");
        assert_eq!(imputed, vec!["a"]);
        let values: Vec<Option<f64>> = df.column("a").expect("a").f64().expect("f64").into_iter().collect();
        assert_eq!(values, vec![Some(2.0), Some(2.0), Some(2.0), Some(5.0)]);
    }

    #[test]
    fn numeric_ties_break_toward_the_smaller_value() {
        let mut df = DataFrame::new(vec![Column::new(
            "a".into(),
            [Some(10.0), Some(2.0), None],
        )])
        .expect("frame");

        impute_most_frequent(&mut df).expect("impute");
        let values: Vec<Option<f64>> = df.column("a").expect("a").f64().expect("f64").into_iter().collect();
        assert_eq!(values[2], Some(2.0));
    }

    #[test]
    fn fills_string_nulls_and_leaves_complete_columns_alone() {
        let mut df = DataFrame::new(vec![
            Column::new("cat".into(), [Some("W"), None, Some("W"), Some("O")]),
            Column::new("full".into(), [1_i64, 2, 3, 4]),
        ])
        .expect("frame");

        let imputed = impute_most_frequent(&mut df).expect("impute");
        assert_eq!(imputed, vec!["cat"]);
        let cat = df.column("cat").expect("cat").str().expect("str");
        assert_eq!(cat.get(1), Some("W"));
        // Untouched column keeps its integer dtype.
        assert_eq!(df.column("full").expect("full").dtype(), &DataType::Int64);
    }

    #[test]
    fn entirely_null_columns_are_left_alone() {
        let mut df = DataFrame::new(vec![Column::new(
            "empty".into(),
            [None::<f64>, None, None],
        )])
        .expect("frame");

        let imputed = impute_most_frequent(&mut df).expect("impute");
        assert!(imputed.is_empty());
        assert_eq!(df.column("empty").expect("empty").null_count(), 3);
    }
}
