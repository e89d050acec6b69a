#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Input readers for the parcel revenue pipeline.
//!
//! Loads the parcel geometry layer (`GeoJSON` with a mandatory declared
//! CRS) and the assessor valuation table (CSV with a declared
//! required/optional column contract). Both readers normalize join keys
//! as they go, so downstream stages only ever see canonical identifiers.

pub mod assessor;
pub mod parcels;

pub use assessor::load_assessor_table;
pub use parcels::{ParcelLayer, load_parcel_layer};

use thiserror::Error;

/// Errors that can occur while loading pipeline inputs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input violates the pipeline's configuration contract
    /// (missing CRS, unsupported CRS, missing required columns).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the contract violation.
        message: String,
    },

    /// File could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}
