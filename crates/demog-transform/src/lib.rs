//! Transforms for demographic data preparation.
//!
//! The repair module carries the non-trivial logic: reconciling the two
//! metadata sheets into one attribute catalog. The cleaning module applies
//! the catalog (and the column-list configuration) to the dataset itself.

pub mod cleaning;
pub mod datetime;
pub mod encode;
pub mod impute;
pub mod repair;
pub mod unknowns;
pub mod values;

pub use cleaning::{CleanReport, DropReason, clean_demographics};
pub use encode::one_hot_encode;
pub use impute::impute_most_frequent;
pub use repair::{InfoLevelRepair, merge_catalog, repair_attribute_values, repair_info_levels};
pub use unknowns::unknown_code_map;
