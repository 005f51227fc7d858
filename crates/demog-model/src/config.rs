//! Cleaning configuration.
//!
//! Everything that is dataset-specific but not logic — the record-id column,
//! the high-null and highly-correlated column lists, sentinel codes, the
//! one-hot targets — lives here as data. `Default` encodes the known
//! irregularities of this dataset; a JSON file may override any subset of
//! fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A column whose sentinel placeholder must become null before a numeric cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelColumn {
    pub column: String,
    pub sentinel: String,
}

/// A two-valued text column recoded to 0/1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryRecode {
    pub column: String,
    pub zero: String,
    pub one: String,
}

/// The registration timestamp column and the name of the derived year column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationColumn {
    pub column: String,
    pub derived: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Record identifier dropped before cleaning.
    pub id_column: String,
    /// Columns present only in the customer extract of the dataset.
    pub customer_only_columns: Vec<String>,
    /// Substring of a value meaning that marks its codes as "unknown".
    pub unknown_keyword: String,
    /// Columns dropped for excessive missingness.
    pub high_null_columns: Vec<String>,
    /// Rows with a higher null fraction than this are dropped.
    pub max_row_null_fraction: f64,
    /// Sentinel placeholders nulled before casting the column to float.
    pub sentinel_codes: Vec<SentinelColumn>,
    /// Two-valued text column recoded to 0/1.
    pub binary_recode: Option<BinaryRecode>,
    /// Registration timestamp column reduced to a year column.
    pub registration: Option<RegistrationColumn>,
    /// Categorical columns expanded to indicator columns.
    pub one_hot_columns: Vec<String>,
    /// Columns dropped for high correlation with retained columns.
    pub correlated_columns: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            id_column: "LNR".to_string(),
            customer_only_columns: string_vec(&[
                "CUSTOMER_GROUP",
                "ONLINE_PURCHASE",
                "PRODUCT_GROUP",
            ]),
            unknown_keyword: "unknown".to_string(),
            high_null_columns: string_vec(&[
                "ALTER_KIND4",
                "TITEL_KZ",
                "ALTER_KIND3",
                "ALTER_KIND2",
                "ALTER_KIND1",
                "AGER_TYP",
                "EXTSEL992",
                "KK_KUNDENTYP",
                "KBA05_BAUMAX",
            ]),
            max_row_null_fraction: 0.05,
            sentinel_codes: vec![
                SentinelColumn {
                    column: "CAMEO_DEUG_2015".to_string(),
                    sentinel: "X".to_string(),
                },
                SentinelColumn {
                    column: "CAMEO_INTL_2015".to_string(),
                    sentinel: "XX".to_string(),
                },
            ],
            binary_recode: Some(BinaryRecode {
                column: "OST_WEST_KZ".to_string(),
                zero: "W".to_string(),
                one: "O".to_string(),
            }),
            registration: Some(RegistrationColumn {
                column: "EINGEFUEGT_AM".to_string(),
                derived: "year".to_string(),
            }),
            one_hot_columns: string_vec(&["D19_LETZTER_KAUF_BRANCHE", "CAMEO_DEU_2015"]),
            correlated_columns: string_vec(&[
                "CAMEO_INTL_2015",
                "ANZ_STATISTISCHE_HAUSHALTE",
                "PLZ8_GBZ",
                "LP_LEBENSPHASE_GROB",
                "LP_FAMILIE_GROB",
                "PLZ8_HHZ",
                "KBA13_HERST_SONST",
                "LP_STATUS_GROB",
                "KBA13_KMH_250",
            ]),
        }
    }
}

impl CleaningConfig {
    /// Load overrides from a JSON file. Fields absent from the file keep
    /// their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

/// Runtime toggles, as opposed to dataset description.
#[derive(Debug, Clone, Copy)]
pub struct CleanOptions {
    /// Drop rows whose null fraction exceeds the configured threshold.
    pub drop_sparse_rows: bool,
    /// The input is the customer extract; drop its extra columns first.
    pub customer_columns: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            drop_sparse_rows: true,
            customer_columns: false,
        }
    }
}

fn string_vec(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_known_column_lists() {
        let config = CleaningConfig::default();
        assert_eq!(config.id_column, "LNR");
        assert_eq!(config.high_null_columns.len(), 9);
        assert_eq!(config.correlated_columns.len(), 9);
        assert_eq!(config.one_hot_columns.len(), 2);
        assert!((config.max_row_null_fraction - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_overrides_keep_defaults_elsewhere() {
        let config: CleaningConfig =
            serde_json::from_str(r#"{"id_column": "ID", "max_row_null_fraction": 0.1}"#)
                .expect("parse");
        assert_eq!(config.id_column, "ID");
        assert!((config.max_row_null_fraction - 0.1).abs() < f64::EPSILON);
        // Untouched fields keep their defaults.
        assert_eq!(config.unknown_keyword, "unknown");
        assert_eq!(config.high_null_columns.len(), 9);
    }
}
