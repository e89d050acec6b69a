//! Per-land-use revenue distribution statistics.
//!
//! Summarizes positive revenue-per-acre values by land-use description:
//! count plus min/p10/p25/median/p75/p90/max, quantiles by linear
//! interpolation over the sorted values. Groups are ordered by
//! descending median so the highest-yield land uses lead the report.

use std::collections::BTreeMap;

use parcel_map_parcel_models::ParcelRollup;
use serde::Serialize;

/// Label applied when a parcel carries no (or a blank) land-use
/// description.
const UNKNOWN_LANDUSE: &str = "Unknown";

/// Distribution of revenue per acre for one land use.
#[derive(Debug, Clone, Serialize)]
pub struct LanduseStats {
    pub landuse: String,
    /// Number of parcels with a positive revenue per acre.
    pub count: usize,
    pub min: f64,
    pub p10: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p90: f64,
    pub max: f64,
}

/// Computes revenue-per-acre distributions grouped by land-use
/// description. Parcels with null, zero, or negative revenue per acre
/// (exempt parcels, zero-area parcels) are excluded.
#[must_use]
pub fn landuse_stats(rollups: &[ParcelRollup]) -> Vec<LanduseStats> {
    let mut by_landuse: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for rollup in rollups {
        let Some(rev) = rollup.rev_per_acre else {
            continue;
        };
        if !rev.is_finite() || rev <= 0.0 {
            continue;
        }
        let landuse = rollup
            .landuse_description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map_or_else(|| UNKNOWN_LANDUSE.to_owned(), str::to_owned);
        by_landuse.entry(landuse).or_default().push(rev);
    }

    let mut stats: Vec<LanduseStats> = by_landuse
        .into_iter()
        .map(|(landuse, mut values)| {
            values.sort_by(f64::total_cmp);
            LanduseStats {
                count: values.len(),
                min: values[0],
                p10: quantile(&values, 0.10),
                p25: quantile(&values, 0.25),
                median: quantile(&values, 0.50),
                p75: quantile(&values, 0.75),
                p90: quantile(&values, 0.90),
                max: values[values.len() - 1],
                landuse,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.median.total_cmp(&a.median));
    stats
}

/// Linear-interpolation quantile over an ascending-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pos = (sorted.len() - 1) as f64 * q;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let base = pos.floor() as usize;
    let rest = pos - pos.floor();
    sorted.get(base + 1).map_or(sorted[base], |next| {
        rest.mul_add(next - sorted[base], sorted[base])
    })
}
