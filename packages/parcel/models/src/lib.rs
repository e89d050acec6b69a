#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core record types for the parcel revenue pipeline.
//!
//! Defines the shapes that flow between the pipeline stages: parcel
//! geometry features, assessor valuation rows, the enriched join product,
//! and the per-parcel rollup that gets serialized. Also hosts the pure
//! normalization and classification rules shared by the loaders and the
//! enrichment stage.

pub mod classify;
pub mod key;

use geo::MultiPolygon;

/// One polygon feature from the parcel geometry layer.
///
/// The identifier has already been through [`key::normalize_key`], so it
/// is directly comparable with normalized assessor keys. Geometry
/// coordinates are in whatever CRS the source layer declared; the caller
/// is responsible for reprojecting to the planar reference before area
/// computation.
#[derive(Debug, Clone)]
pub struct ParcelFeature {
    /// Normalized parcel identifier (join key).
    pub map_par_id: String,
    /// Secondary location identifier, if present.
    pub loc_id: Option<String>,
    /// Parcel polygon(s).
    pub geometry: MultiPolygon<f64>,
}

/// One row from the assessor valuation table.
///
/// Both identifier columns are normalized at load time; only
/// `gis_parcel_id` participates in the join. Valuation fields are kept
/// as raw strings here and coerced to numbers during enrichment, so that
/// unparseable source values degrade to null instead of failing the load.
#[derive(Debug, Clone, Default)]
pub struct AssessorRecord {
    /// Normalized `GIS Parcel ID` (join key).
    pub gis_parcel_id: String,
    /// Normalized `Assessor Parcel ID` (not used for joining).
    pub assessor_parcel_id: String,
    pub owners: Option<String>,
    pub landuse_code: Option<String>,
    pub landuse_description: Option<String>,
    pub zoning_code: Option<String>,
    pub zoning_description: Option<String>,
    /// Raw `Total Value` field, coerced to numeric during enrichment.
    pub total_value: Option<String>,
    pub building_value: Option<String>,
    pub land_value: Option<String>,
    pub assessed_acres: Option<String>,
    pub full_address: Option<String>,
    pub valuation_fiscal_year: Option<String>,
}

/// The join product: one row per parcel feature x matching assessor row
/// (or one row with null assessor fields when no row matched).
#[derive(Debug, Clone)]
pub struct EnrichedParcel {
    pub map_par_id: String,
    pub loc_id: Option<String>,
    /// Geometry in the planar reference (EPSG:26986).
    pub geometry: MultiPolygon<f64>,
    /// Planar polygon area divided by 4046.8564224 (square meters per acre).
    pub acres: f64,
    pub owners: Option<String>,
    pub landuse_code: Option<String>,
    pub landuse_description: Option<String>,
    pub zoning_code: Option<String>,
    pub zoning_description: Option<String>,
    pub full_address: Option<String>,
    pub valuation_fiscal_year: Option<String>,
    /// Coerced `Total Value`; unparseable source values become `None`.
    pub total_value: Option<f64>,
    pub building_value: Option<f64>,
    pub land_value: Option<f64>,
    pub assessed_acres: Option<f64>,
    pub tax_exempt: bool,
    pub is_water: bool,
    pub est_annual_tax: f64,
    /// Null when `acres` is zero.
    pub rev_per_acre: Option<f64>,
    /// Always 1 here; summed during aggregation as a matched-row count.
    pub unit_count: u64,
}

/// Final aggregated row: exactly one per distinct normalized parcel id.
#[derive(Debug, Clone)]
pub struct ParcelRollup {
    pub map_par_id: String,
    pub loc_id: Option<String>,
    pub geometry: MultiPolygon<f64>,
    pub acres: f64,
    pub assessed_acres: Option<f64>,
    /// Sum of matched rows' values; 0 when every constituent was null.
    pub total_value: f64,
    pub building_value: f64,
    pub land_value: f64,
    /// Recomputed from the aggregated `total_value`; forced to 0 for
    /// exempt parcels.
    pub est_annual_tax: f64,
    /// Recomputed from the finalized tax; null when `acres` is zero.
    pub rev_per_acre: Option<f64>,
    /// Deduplicated site addresses joined with `" | "`.
    pub full_address: Option<String>,
    pub owners: Option<String>,
    pub zoning_code: Option<String>,
    pub zoning_description: Option<String>,
    pub landuse_code: Option<String>,
    pub landuse_description: Option<String>,
    pub valuation_fiscal_year: Option<String>,
    pub unit_count: u64,
    pub tax_exempt: bool,
    pub is_water: bool,
}
