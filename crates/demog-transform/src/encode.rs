//! Categorical indicator encoding.

use std::collections::BTreeSet;

use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

use crate::values::any_to_string;

/// Expand a categorical column into 0/1 indicator columns.
///
/// One indicator per distinct non-null value, named `{column}_{value}` and
/// added in value order; the source column is dropped. Rows where the source
/// is null get zeros in every indicator. Returns the indicator column names.
pub fn one_hot_encode(df: DataFrame, column: &str) -> Result<(DataFrame, Vec<String>)> {
    let series = df.column(column)?.as_materialized_series().clone();
    let mut categories: BTreeSet<String> = BTreeSet::new();
    let mut rendered: Vec<Option<String>> = Vec::with_capacity(series.len());
    for value in series.rechunk().iter() {
        if matches!(value, AnyValue::Null) {
            rendered.push(None);
            continue;
        }
        let repr = any_to_string(&value);
        if repr.trim().is_empty() {
            rendered.push(None);
            continue;
        }
        categories.insert(repr.clone());
        rendered.push(Some(repr));
    }

    let mut out = df.drop(column)?;
    let mut names = Vec::with_capacity(categories.len());
    for category in &categories {
        let name = format!("{column}_{category}");
        let flags: Vec<i32> = rendered
            .iter()
            .map(|repr| i32::from(repr.as_deref() == Some(category.as_str())))
            .collect();
        out.with_column(Series::new(name.as_str().into(), flags))?;
        names.push(name);
    }
    Ok((out, names))
}
