//! Ingestion for demographic data preparation.
//!
//! Handles the three inputs this system reads: the two raw metadata sheet
//! exports (preamble rows, offset headers, blank index columns), the merged
//! attribute catalog CSV, and the demographic dataset itself.

pub mod catalog_io;
pub mod dataset;
pub mod raw_table;

pub use catalog_io::{read_catalog, write_catalog};
pub use dataset::{read_dataset, write_dataset};
pub use raw_table::{RawTable, read_table_with_header};
