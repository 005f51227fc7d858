//! Library surface of the `demog-prep` CLI.
//!
//! The command functions are exposed so integration tests can drive the full
//! pipeline without spawning the binary.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
