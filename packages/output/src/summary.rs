//! Tabular summary writers.
//!
//! The summary CSV is the non-geometric projection of the aggregated
//! rollups; the land-use stats CSV carries the revenue-per-acre
//! distribution report. Nulls serialize as empty fields.

use std::path::Path;

use parcel_map_parcel_models::ParcelRollup;
use parcel_map_pipeline::LanduseStats;

use crate::WriteError;

fn fmt_opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes the per-parcel summary CSV.
///
/// # Errors
///
/// Returns [`WriteError`] if the directory or file cannot be written.
pub fn write_summary(path: &Path, rollups: &[ParcelRollup]) -> Result<(), WriteError> {
    crate::ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "MAP_PAR_ID",
        "Full Address",
        "total_value",
        "est_annual_tax",
        "rev_per_acre",
        "acres",
        "Landuse Description",
        "unit_count",
        "tax_exempt",
        "is_water",
    ])?;

    for rollup in rollups {
        writer.write_record([
            rollup.map_par_id.clone(),
            rollup.full_address.clone().unwrap_or_default(),
            rollup.total_value.to_string(),
            rollup.est_annual_tax.to_string(),
            fmt_opt_f64(rollup.rev_per_acre),
            rollup.acres.to_string(),
            rollup.landuse_description.clone().unwrap_or_default(),
            rollup.unit_count.to_string(),
            rollup.tax_exempt.to_string(),
            rollup.is_water.to_string(),
        ])?;
    }

    writer.flush()?;
    log::info!("Wrote {} summary rows to {}", rollups.len(), path.display());
    Ok(())
}

/// Writes the per-land-use revenue distribution CSV.
///
/// # Errors
///
/// Returns [`WriteError`] if the directory or file cannot be written.
pub fn write_landuse_stats(path: &Path, stats: &[LanduseStats]) -> Result<(), WriteError> {
    crate::ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;

    for row in stats {
        writer.serialize(row)?;
    }

    writer.flush()?;
    log::info!(
        "Wrote {} land-use stat rows to {}",
        stats.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPolygon, Polygon};

    fn rollup(id: &str, rev_per_acre: Option<f64>) -> ParcelRollup {
        ParcelRollup {
            map_par_id: id.to_owned(),
            loc_id: None,
            geometry: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
                vec![],
            )]),
            acres: 2.0,
            assessed_acres: None,
            total_value: 500_000.0,
            building_value: 0.0,
            land_value: 0.0,
            est_annual_tax: 5585.0,
            rev_per_acre,
            full_address: Some("10 Main St | 12 Main St".to_owned()),
            owners: None,
            zoning_code: None,
            zoning_description: None,
            landuse_code: None,
            landuse_description: Some("Single Family".to_owned()),
            valuation_fiscal_year: None,
            unit_count: 2,
            tax_exempt: false,
            is_water: false,
        }
    }

    #[test]
    fn summary_has_header_and_one_row_per_rollup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/summary.csv");
        write_summary(&path, &[rollup("001", Some(2792.5)), rollup("002", None)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("MAP_PAR_ID,Full Address"));
        assert!(lines[1].contains("2792.5"));
        // Null revenue per acre serializes as an empty field.
        assert!(lines[2].contains(",,2,Single Family,2,false,false"));
    }

    #[test]
    fn landuse_stats_round_trip() {
        let stats = vec![LanduseStats {
            landuse: "Commercial".to_owned(),
            count: 3,
            min: 100.0,
            p10: 120.0,
            p25: 150.0,
            median: 200.0,
            p75: 400.0,
            p90: 800.0,
            max: 1000.0,
        }];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        write_landuse_stats(&path, &stats).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("landuse,count,min"));
        assert!(lines[1].starts_with("Commercial,3,100"));
    }
}
