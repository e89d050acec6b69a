//! Assessor valuation table reader.
//!
//! The column contract is declared up front: identifier columns are
//! required and validated in one pass before any rows are read, attribute
//! columns are optional and default to null. Valuation fields stay as raw
//! strings here; numeric coercion happens during enrichment.

use std::path::Path;

use parcel_map_parcel_models::{AssessorRecord, key};
use serde::Deserialize;

use crate::LoadError;

/// Columns that must be present in the assessor export.
pub const REQUIRED_COLUMNS: &[&str] = &["GIS Parcel ID", "Assessor Parcel ID"];

/// Raw CSV row shape. Every field is optional at the serde level; the
/// required columns are enforced by the header check instead, so a single
/// configuration error can list everything that is missing.
#[derive(Debug, Deserialize)]
struct RawAssessorRow {
    #[serde(default, rename = "GIS Parcel ID")]
    gis_parcel_id: Option<String>,
    #[serde(default, rename = "Assessor Parcel ID")]
    assessor_parcel_id: Option<String>,
    #[serde(default, rename = "Owners")]
    owners: Option<String>,
    #[serde(default, rename = "Landuse Code")]
    landuse_code: Option<String>,
    #[serde(default, rename = "Landuse Description")]
    landuse_description: Option<String>,
    #[serde(default, rename = "Zoning Code")]
    zoning_code: Option<String>,
    #[serde(default, rename = "Zoning Description")]
    zoning_description: Option<String>,
    #[serde(default, rename = "Total Value")]
    total_value: Option<String>,
    #[serde(default, rename = "Building Value")]
    building_value: Option<String>,
    #[serde(default, rename = "Land Value")]
    land_value: Option<String>,
    #[serde(default, rename = "Assessed Acres")]
    assessed_acres: Option<String>,
    #[serde(default, rename = "Full Address")]
    full_address: Option<String>,
    #[serde(default, rename = "Valuation Fiscal Year")]
    valuation_fiscal_year: Option<String>,
}

impl RawAssessorRow {
    fn into_record(self) -> AssessorRecord {
        AssessorRecord {
            gis_parcel_id: key::normalize_key_text(self.gis_parcel_id.as_deref()),
            assessor_parcel_id: key::normalize_key_text(self.assessor_parcel_id.as_deref()),
            owners: self.owners,
            landuse_code: self.landuse_code,
            landuse_description: self.landuse_description,
            zoning_code: self.zoning_code,
            zoning_description: self.zoning_description,
            total_value: self.total_value,
            building_value: self.building_value,
            land_value: self.land_value,
            assessed_acres: self.assessed_acres,
            full_address: self.full_address,
            valuation_fiscal_year: self.valuation_fiscal_year,
        }
    }
}

/// Loads the assessor table from a CSV file.
///
/// # Errors
///
/// Returns [`LoadError::Config`] listing every missing required column,
/// or propagates I/O and CSV parse failures.
pub fn load_assessor_table(path: &Path) -> Result<Vec<AssessorRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Config {
            message: format!(
                "Assessor table {} is missing required column(s): {}",
                path.display(),
                missing.join(", ")
            ),
        });
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<RawAssessorRow>() {
        records.push(result?.into_record());
    }

    log::info!(
        "Loaded {} assessor records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
