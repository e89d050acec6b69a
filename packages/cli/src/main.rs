#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Parcel revenue pipeline entry point.
//!
//! Loads the parcel geometry layer and assessor table, joins and
//! aggregates them into one rollup per parcel, then writes the full and
//! public `GeoJSON` outputs and the summary CSV. All stages run in one
//! pass; a failure in any stage aborts the run.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use parcel_map_loader::{load_assessor_table, load_parcel_layer};
use parcel_map_pipeline::{aggregate, enrich, landuse_stats};
use parcel_map_spatial::{Crs, to_geographic, to_planar};

#[derive(Parser, Debug)]
#[command(
    name = "parcel_map",
    about = "Join parcel geometry to assessor valuations and compute tax revenue per acre"
)]
struct Args {
    /// Parcel geometry layer (GeoJSON FeatureCollection with a declared CRS)
    #[arg(long, default_value = "data/raw/parcels.geojson")]
    parcels: PathBuf,

    /// Assessor valuation table (CSV)
    #[arg(long, default_value = "data/raw/assessor.csv")]
    assessor: PathBuf,

    /// Residential tax rate in dollars per $1000 of assessed value
    #[arg(long)]
    tax_rate: f64,

    /// Full GeoJSON output with every aggregated column
    #[arg(long, default_value = "data/processed/parcels_revenue.geojson")]
    output: PathBuf,

    /// Attribute-trimmed GeoJSON output for public distribution
    #[arg(long, default_value = "data/processed/parcels_public.geojson")]
    public_output: PathBuf,

    /// Per-parcel summary CSV
    #[arg(long, default_value = "data/processed/summary.csv")]
    summary: PathBuf,

    /// Optional per-land-use revenue distribution CSV
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let layer = load_parcel_layer(&args.parcels)?;
    let assessor = load_assessor_table(&args.assessor)?;

    let parcels = match layer.crs {
        Crs::Planar26986 => layer.features,
        Crs::Geographic4326 => {
            log::info!("Reprojecting parcel layer to EPSG:26986 for area computation");
            layer
                .features
                .into_iter()
                .map(|mut feature| {
                    feature.geometry = to_planar(&feature.geometry);
                    feature
                })
                .collect()
        }
    };

    let enriched = enrich(&parcels, &assessor, args.tax_rate);
    let mut rollups = aggregate(&enriched, args.tax_rate);

    log::info!(
        "Reprojecting {} parcel rollups to EPSG:4326 for output",
        rollups.len()
    );
    for rollup in &mut rollups {
        rollup.geometry = to_geographic(&rollup.geometry);
    }

    parcel_map_output::write_full_geojson(&args.output, &rollups)?;
    parcel_map_output::write_public_geojson(&args.public_output, &rollups)?;
    parcel_map_output::write_summary(&args.summary, &rollups)?;

    if let Some(stats_path) = &args.stats {
        let stats = landuse_stats(&rollups);
        parcel_map_output::write_landuse_stats(stats_path, &stats)?;
    }

    log::info!(
        "Pipeline finished: {} parcels in {:.2}s",
        rollups.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
