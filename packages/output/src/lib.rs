#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Artifact writers for the parcel revenue pipeline.
//!
//! Serializes the aggregated rollups to the full and public `GeoJSON`
//! outputs and the tabular summaries. Output directories are created on
//! demand; existing files are overwritten unconditionally. Write
//! failures propagate as fatal errors with no retry.

pub mod features;
pub mod summary;

pub use features::{write_full_geojson, write_public_geojson};
pub use summary::{write_landuse_stats, write_summary};

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while writing pipeline artifacts.
#[derive(Debug, Error)]
pub enum WriteError {
    /// File or directory could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Creates the parent directory of an output path if it does not exist.
pub(crate) fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
