//! Data model for demographic dataset preparation.
//!
//! This crate defines the typed records produced by metadata repair (the
//! attribute catalog), the coded value lists attached to catalog rows, and
//! the cleaning configuration that carries the dataset's known column lists.

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{
    AttributeValueRow, CATALOG_HEADERS, CatalogRow, InfoLevelRow, ValueCode, ValueList,
};
pub use config::{BinaryRecode, CleanOptions, CleaningConfig, RegistrationColumn, SentinelColumn};
pub use error::{ModelError, Result};
