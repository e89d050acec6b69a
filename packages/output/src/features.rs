//! `GeoJSON` feature writers.
//!
//! The full output carries every aggregated column; the public output is
//! the attribute-trimmed redistribution set, deliberately omitting owner
//! identity, zoning detail, fiscal year, and the raw assessor key.
//! Assessor-sourced properties keep their source column spellings
//! (`Full Address`, `Landuse Description`, ...) so downstream consumers
//! see the names they already know. Geometry is expected in geographic
//! coordinates (EPSG:4326).

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use geojson::{Feature, FeatureCollection, JsonObject};
use parcel_map_parcel_models::ParcelRollup;
use serde_json::Value;

use crate::WriteError;

fn opt_num(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::from)
}

fn opt_str(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_owned()))
}

fn full_properties(rollup: &ParcelRollup) -> JsonObject {
    let mut props = public_properties(rollup);
    props.insert("LOC_ID".to_owned(), opt_str(rollup.loc_id.as_deref()));
    props.insert("assessed_acres".to_owned(), opt_num(rollup.assessed_acres));
    props.insert(
        "Building Value".to_owned(),
        Value::from(rollup.building_value),
    );
    props.insert("Land Value".to_owned(), Value::from(rollup.land_value));
    props.insert("Owners".to_owned(), opt_str(rollup.owners.as_deref()));
    props.insert(
        "Zoning Code".to_owned(),
        opt_str(rollup.zoning_code.as_deref()),
    );
    props.insert(
        "Zoning Description".to_owned(),
        opt_str(rollup.zoning_description.as_deref()),
    );
    props.insert(
        "Landuse Code".to_owned(),
        opt_str(rollup.landuse_code.as_deref()),
    );
    props.insert(
        "Valuation Fiscal Year".to_owned(),
        opt_str(rollup.valuation_fiscal_year.as_deref()),
    );
    props
}

fn public_properties(rollup: &ParcelRollup) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert(
        "MAP_PAR_ID".to_owned(),
        Value::String(rollup.map_par_id.clone()),
    );
    props.insert(
        "Full Address".to_owned(),
        opt_str(rollup.full_address.as_deref()),
    );
    props.insert(
        "Landuse Description".to_owned(),
        opt_str(rollup.landuse_description.as_deref()),
    );
    props.insert("acres".to_owned(), Value::from(rollup.acres));
    props.insert("unit_count".to_owned(), Value::from(rollup.unit_count));
    props.insert("total_value".to_owned(), Value::from(rollup.total_value));
    props.insert(
        "est_annual_tax".to_owned(),
        Value::from(rollup.est_annual_tax),
    );
    props.insert("rev_per_acre".to_owned(), opt_num(rollup.rev_per_acre));
    props.insert("tax_exempt".to_owned(), Value::from(rollup.tax_exempt));
    props.insert("is_water".to_owned(), Value::from(rollup.is_water));
    props
}

fn write_collection(
    path: &Path,
    rollups: &[ParcelRollup],
    properties: fn(&ParcelRollup) -> JsonObject,
) -> Result<(), WriteError> {
    crate::ensure_parent(path)?;

    let features: Vec<Feature> = rollups
        .iter()
        .map(|rollup| Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(
                &rollup.geometry,
            ))),
            id: None,
            properties: Some(properties(rollup)),
            foreign_members: None,
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &collection)?;
    writer.flush()?;

    log::info!("Wrote {} features to {}", rollups.len(), path.display());
    Ok(())
}

/// Writes the full `GeoJSON` output with every aggregated column.
///
/// # Errors
///
/// Returns [`WriteError`] if the directory or file cannot be written.
pub fn write_full_geojson(path: &Path, rollups: &[ParcelRollup]) -> Result<(), WriteError> {
    write_collection(path, rollups, full_properties)
}

/// Writes the attribute-trimmed public `GeoJSON` output.
///
/// # Errors
///
/// Returns [`WriteError`] if the directory or file cannot be written.
pub fn write_public_geojson(path: &Path, rollups: &[ParcelRollup]) -> Result<(), WriteError> {
    write_collection(path, rollups, public_properties)
}
