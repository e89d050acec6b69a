//! Left join and per-row enrichment.
//!
//! Every parcel feature survives the join: parcels with no assessor
//! match produce a single row with null assessor fields, parcels with
//! multiple matches produce one row per match in table order. Geometry
//! must already be in the planar reference when it reaches this stage.

use std::collections::HashMap;

use parcel_map_parcel_models::{
    AssessorRecord, EnrichedParcel, ParcelFeature, classify, key,
};

/// Left-joins parcels to assessor rows on the normalized identifier and
/// derives the per-row metrics (acres, coerced values, classifications,
/// estimated tax, revenue per acre).
#[must_use]
pub fn enrich(
    parcels: &[ParcelFeature],
    assessor: &[AssessorRecord],
    tax_rate: f64,
) -> Vec<EnrichedParcel> {
    let mut by_key: HashMap<&str, Vec<&AssessorRecord>> = HashMap::new();
    for record in assessor {
        by_key
            .entry(record.gis_parcel_id.as_str())
            .or_default()
            .push(record);
    }

    let mut rows = Vec::with_capacity(parcels.len());
    let mut unmatched = 0usize;

    for parcel in parcels {
        let acres = parcel_map_spatial::area_acres(&parcel.geometry);
        match by_key.get(parcel.map_par_id.as_str()) {
            Some(matches) => {
                for record in matches {
                    rows.push(enrich_row(parcel, Some(record), acres, tax_rate));
                }
            }
            None => {
                unmatched += 1;
                rows.push(enrich_row(parcel, None, acres, tax_rate));
            }
        }
    }

    log::info!(
        "Joined {} parcels to {} assessor records: {} enriched rows, {unmatched} unmatched parcels",
        parcels.len(),
        assessor.len(),
        rows.len()
    );
    rows
}

fn enrich_row(
    parcel: &ParcelFeature,
    record: Option<&AssessorRecord>,
    acres: f64,
    tax_rate: f64,
) -> EnrichedParcel {
    let owners = record.and_then(|r| r.owners.clone());
    let landuse_code = record.and_then(|r| r.landuse_code.clone());
    let landuse_description = record.and_then(|r| r.landuse_description.clone());

    let total_value = key::coerce_numeric(record.and_then(|r| r.total_value.as_deref()));
    let building_value = key::coerce_numeric(record.and_then(|r| r.building_value.as_deref()));
    let land_value = key::coerce_numeric(record.and_then(|r| r.land_value.as_deref()));
    let assessed_acres = key::coerce_numeric(record.and_then(|r| r.assessed_acres.as_deref()));

    let tax_exempt = classify::is_exempt(owners.as_deref(), landuse_code.as_deref());
    let is_water = classify::is_water(
        owners.as_deref(),
        landuse_code.as_deref(),
        landuse_description.as_deref(),
    );

    let est_annual_tax = total_value.unwrap_or(0.0) * (tax_rate / 1000.0);
    let rev_per_acre = if acres == 0.0 {
        None
    } else {
        Some(est_annual_tax / acres)
    };

    EnrichedParcel {
        map_par_id: parcel.map_par_id.clone(),
        loc_id: parcel.loc_id.clone(),
        geometry: parcel.geometry.clone(),
        acres,
        owners,
        landuse_code,
        landuse_description,
        zoning_code: record.and_then(|r| r.zoning_code.clone()),
        zoning_description: record.and_then(|r| r.zoning_description.clone()),
        full_address: record.and_then(|r| r.full_address.clone()),
        valuation_fiscal_year: record.and_then(|r| r.valuation_fiscal_year.clone()),
        total_value,
        building_value,
        land_value,
        assessed_acres,
        tax_exempt,
        is_water,
        est_annual_tax,
        rev_per_acre,
        unit_count: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPolygon, Polygon};

    /// A planar rectangle covering exactly `acres` acres.
    fn parcel(id: &str, acres: f64) -> ParcelFeature {
        let width = 100.0;
        let height = acres * parcel_map_spatial::SQ_METERS_PER_ACRE / width;
        ParcelFeature {
            map_par_id: id.to_owned(),
            loc_id: None,
            geometry: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![
                    (0.0, 0.0),
                    (width, 0.0),
                    (width, height),
                    (0.0, height),
                    (0.0, 0.0),
                ]),
                vec![],
            )]),
        }
    }

    fn assessor_row(gis_id: &str, total_value: &str) -> AssessorRecord {
        AssessorRecord {
            gis_parcel_id: gis_id.to_owned(),
            assessor_parcel_id: gis_id.to_owned(),
            total_value: Some(total_value.to_owned()),
            ..AssessorRecord::default()
        }
    }

    #[test]
    fn simple_match_computes_tax_and_revenue() {
        let parcels = vec![parcel("001-0001", 2.0)];
        let assessor = vec![assessor_row("001-0001", "500000")];

        let rows = enrich(&parcels, &assessor, 11.17);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert!((row.acres - 2.0).abs() < 1e-9);
        assert!((row.est_annual_tax - 5585.0).abs() < 1e-6);
        assert!((row.rev_per_acre.unwrap() - 2792.5).abs() < 1e-6);
    }

    #[test]
    fn every_parcel_survives_the_join() {
        let parcels = vec![parcel("A", 1.0), parcel("B", 1.0)];
        let assessor = vec![
            assessor_row("A", "100000"),
            assessor_row("A", "200000"),
        ];

        let rows = enrich(&parcels, &assessor, 10.0);
        // Parcel A twice (two matches, in table order), parcel B once
        // with null assessor fields.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].map_par_id, "A");
        assert_eq!(rows[0].total_value, Some(100_000.0));
        assert_eq!(rows[1].total_value, Some(200_000.0));
        assert_eq!(rows[2].map_par_id, "B");
        assert_eq!(rows[2].total_value, None);
        assert_eq!(rows[2].owners, None);
    }

    #[test]
    fn unmatched_parcel_gets_zero_tax_not_null_revenue() {
        let rows = enrich(&[parcel("LONE", 1.5)], &[], 11.17);
        let row = &rows[0];
        assert_eq!(row.total_value, None);
        assert!((row.est_annual_tax - 0.0).abs() < f64::EPSILON);
        assert_eq!(row.rev_per_acre, Some(0.0));
    }

    #[test]
    fn zero_area_parcel_has_null_revenue_per_acre() {
        let mut degenerate = parcel("FLAT", 1.0);
        degenerate.geometry = MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(0.0, 0.0), (100.0, 0.0), (0.0, 0.0)]),
            vec![],
        )]);
        let rows = enrich(&[degenerate], &[assessor_row("FLAT", "500000")], 11.17);
        assert_eq!(rows[0].rev_per_acre, None);
        assert!(rows[0].est_annual_tax > 0.0);
    }

    #[test]
    fn unparseable_total_value_degrades_to_zero_tax() {
        let rows = enrich(&[parcel("X", 1.0)], &[assessor_row("X", "n/a")], 11.17);
        assert_eq!(rows[0].total_value, None);
        assert!((rows[0].est_annual_tax - 0.0).abs() < f64::EPSILON);
    }
}
