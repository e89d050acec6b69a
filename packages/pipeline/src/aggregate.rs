//! Per-parcel aggregation.
//!
//! Collapses the enriched join product to exactly one row per distinct
//! normalized parcel identifier, in first-seen order. Reduction rules:
//! first non-null for descriptive fields, sum for valuation fields and
//! the unit count, any-true for the boolean tags, order-preserving
//! dedupe for addresses. The estimated tax is recomputed from the
//! aggregated total value (aggregate-then-multiply), then forced to zero
//! for exempt parcels.

use std::collections::HashMap;

use geo::MultiPolygon;
use parcel_map_parcel_models::{EnrichedParcel, ParcelRollup};

/// Separator between deduplicated addresses in the merged field.
const ADDRESS_SEPARATOR: &str = " | ";

struct GroupAcc {
    map_par_id: String,
    geometry: MultiPolygon<f64>,
    acres: f64,
    loc_id: Option<String>,
    assessed_acres: Option<f64>,
    total_value: f64,
    building_value: f64,
    land_value: f64,
    owners: Option<String>,
    zoning_code: Option<String>,
    zoning_description: Option<String>,
    landuse_code: Option<String>,
    landuse_description: Option<String>,
    valuation_fiscal_year: Option<String>,
    addresses: Vec<String>,
    unit_count: u64,
    tax_exempt: bool,
    is_water: bool,
}

impl GroupAcc {
    fn new(row: &EnrichedParcel) -> Self {
        Self {
            map_par_id: row.map_par_id.clone(),
            geometry: row.geometry.clone(),
            acres: row.acres,
            loc_id: None,
            assessed_acres: None,
            total_value: 0.0,
            building_value: 0.0,
            land_value: 0.0,
            owners: None,
            zoning_code: None,
            zoning_description: None,
            landuse_code: None,
            landuse_description: None,
            valuation_fiscal_year: None,
            addresses: Vec::new(),
            unit_count: 0,
            tax_exempt: false,
            is_water: false,
        }
    }

    fn fold(&mut self, row: &EnrichedParcel) {
        if self.loc_id.is_none() {
            self.loc_id = row.loc_id.clone();
        }
        if self.assessed_acres.is_none() {
            self.assessed_acres = row.assessed_acres;
        }
        if self.owners.is_none() {
            self.owners = row.owners.clone();
        }
        if self.zoning_code.is_none() {
            self.zoning_code = row.zoning_code.clone();
        }
        if self.zoning_description.is_none() {
            self.zoning_description = row.zoning_description.clone();
        }
        if self.landuse_code.is_none() {
            self.landuse_code = row.landuse_code.clone();
        }
        if self.landuse_description.is_none() {
            self.landuse_description = row.landuse_description.clone();
        }
        if self.valuation_fiscal_year.is_none() {
            self.valuation_fiscal_year = row.valuation_fiscal_year.clone();
        }

        if let Some(v) = row.total_value {
            self.total_value += v;
        }
        if let Some(v) = row.building_value {
            self.building_value += v;
        }
        if let Some(v) = row.land_value {
            self.land_value += v;
        }

        if let Some(address) = row.full_address.as_deref() {
            let address = address.trim();
            if !address.is_empty() && !self.addresses.iter().any(|a| a == address) {
                self.addresses.push(address.to_owned());
            }
        }

        self.unit_count += row.unit_count;
        self.tax_exempt |= row.tax_exempt;
        self.is_water |= row.is_water;
    }

    fn finalize(self, tax_rate: f64) -> ParcelRollup {
        // Exempt parcels report zero modeled revenue regardless of value.
        let est_annual_tax = if self.tax_exempt {
            0.0
        } else {
            self.total_value * (tax_rate / 1000.0)
        };
        let rev_per_acre = if self.acres == 0.0 {
            None
        } else {
            Some(est_annual_tax / self.acres)
        };
        let full_address = if self.addresses.is_empty() {
            None
        } else {
            Some(self.addresses.join(ADDRESS_SEPARATOR))
        };

        ParcelRollup {
            map_par_id: self.map_par_id,
            loc_id: self.loc_id,
            geometry: self.geometry,
            acres: self.acres,
            assessed_acres: self.assessed_acres,
            total_value: self.total_value,
            building_value: self.building_value,
            land_value: self.land_value,
            est_annual_tax,
            rev_per_acre,
            full_address,
            owners: self.owners,
            zoning_code: self.zoning_code,
            zoning_description: self.zoning_description,
            landuse_code: self.landuse_code,
            landuse_description: self.landuse_description,
            valuation_fiscal_year: self.valuation_fiscal_year,
            unit_count: self.unit_count,
            tax_exempt: self.tax_exempt,
            is_water: self.is_water,
        }
    }
}

/// Groups enriched rows by parcel identifier and produces exactly one
/// rollup per group. Group order follows first appearance in the input.
#[must_use]
pub fn aggregate(rows: &[EnrichedParcel], tax_rate: f64) -> Vec<ParcelRollup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupAcc> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.map_par_id.clone()).or_insert_with(|| {
            groups.push(GroupAcc::new(row));
            groups.len() - 1
        });
        groups[slot].fold(row);
    }

    let rollups: Vec<ParcelRollup> = groups
        .into_iter()
        .map(|group| group.finalize(tax_rate))
        .collect();

    log::info!(
        "Aggregated {} enriched rows into {} parcels",
        rows.len(),
        rollups.len()
    );
    rollups
}
