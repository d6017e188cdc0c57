//! pnmlab - command-line PNM image processing.
//!
//! File handling, configuration and the jobs behind each subcommand.
//! The pixel work itself lives in `pnm-core`.

pub mod error;
pub mod files;
pub mod models;
pub mod services;
