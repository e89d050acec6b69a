//! Parcel geometry layer reader.
//!
//! Parses a `GeoJSON` `FeatureCollection` into [`ParcelFeature`]s and
//! validates that the layer declares a coordinate reference system. The
//! CRS is never guessed or defaulted: area math downstream would silently
//! produce wrong units if the declaration were wrong.

use std::path::Path;

use geojson::{FeatureCollection, GeoJson};
use parcel_map_parcel_models::{ParcelFeature, key};
use parcel_map_spatial::Crs;

use crate::LoadError;

/// A loaded parcel layer: features plus the CRS the source declared.
#[derive(Debug, Clone)]
pub struct ParcelLayer {
    /// CRS of every feature's coordinates.
    pub crs: Crs,
    /// Polygon features with normalized identifiers.
    pub features: Vec<ParcelFeature>,
}

/// Loads a parcel geometry layer from a `GeoJSON` file.
///
/// Features whose geometry is missing or not a polygon are skipped with
/// a warning. Parcel identifiers are normalized on the way in.
///
/// # Errors
///
/// Returns [`LoadError::Config`] if the file is not a
/// `FeatureCollection`, declares no CRS, or declares a CRS other than
/// EPSG:26986 / EPSG:4326. I/O and parse failures propagate as-is.
pub fn load_parcel_layer(path: &Path) -> Result<ParcelLayer, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    let geojson: GeoJson = contents.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(LoadError::Config {
            message: format!(
                "Parcel layer {} is not a GeoJSON FeatureCollection",
                path.display()
            ),
        });
    };

    let crs = declared_crs(&collection)?;

    let mut features = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for feature in collection.features {
        let Some(geometry) = feature
            .geometry
            .as_ref()
            .and_then(parcel_map_spatial::multipolygon_from_geojson)
        else {
            skipped += 1;
            continue;
        };

        let props = feature.properties.as_ref();
        let map_par_id = key::normalize_key(props.and_then(|p| p.get("MAP_PAR_ID")));
        let loc_id = props.and_then(|p| p.get("LOC_ID")).and_then(key::stringify);

        features.push(ParcelFeature {
            map_par_id,
            loc_id,
            geometry,
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} features without polygon geometry in {}", path.display());
    }
    log::info!(
        "Loaded {} parcel features from {} (EPSG:{})",
        features.len(),
        path.display(),
        crs.epsg()
    );

    Ok(ParcelLayer { crs, features })
}

/// Reads the legacy `crs` foreign member from a feature collection.
fn declared_crs(collection: &FeatureCollection) -> Result<Crs, LoadError> {
    let Some(crs_member) = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("crs"))
    else {
        return Err(LoadError::Config {
            message: "Parcel layer has no CRS; expected EPSG:26986".to_owned(),
        });
    };

    let Some(name) = crs_member
        .get("properties")
        .and_then(|props| props.get("name"))
        .and_then(serde_json::Value::as_str)
    else {
        return Err(LoadError::Config {
            message: "Parcel layer crs member has no name property".to_owned(),
        });
    };

    Crs::from_crs_name(name).ok_or_else(|| LoadError::Config {
        message: format!("Unsupported parcel CRS {name}; expected EPSG:26986 or EPSG:4326"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_layer(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcels.geojson");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    const LAYER: &str = r#"{
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::26986"}},
        "features": [
            {
                "type": "Feature",
                "properties": {"MAP_PAR_ID": " 001-0001 ", "LOC_ID": "F_1_2"},
                "geometry": {"type": "Polygon", "coordinates": [[
                    [230000.0, 890000.0], [230100.0, 890000.0],
                    [230100.0, 890100.0], [230000.0, 890100.0],
                    [230000.0, 890000.0]
                ]]}
            },
            {
                "type": "Feature",
                "properties": {"MAP_PAR_ID": 1234, "LOC_ID": null},
                "geometry": {"type": "MultiPolygon", "coordinates": [[[
                    [231000.0, 891000.0], [231050.0, 891000.0],
                    [231050.0, 891050.0], [231000.0, 891000.0]
                ]]]}
            },
            {
                "type": "Feature",
                "properties": {"MAP_PAR_ID": "POINTY"},
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
            }
        ]
    }"#;

    #[test]
    fn loads_features_and_normalizes_ids() {
        let (_dir, path) = write_layer(LAYER);
        let layer = load_parcel_layer(&path).unwrap();

        assert_eq!(layer.crs, Crs::Planar26986);
        // Point feature is skipped.
        assert_eq!(layer.features.len(), 2);
        assert_eq!(layer.features[0].map_par_id, "001-0001");
        assert_eq!(layer.features[0].loc_id.as_deref(), Some("F_1_2"));
        assert_eq!(layer.features[1].map_par_id, "1234");
        assert_eq!(layer.features[1].loc_id, None);
    }

    #[test]
    fn missing_crs_is_a_configuration_error() {
        let (_dir, path) = write_layer(r#"{"type": "FeatureCollection", "features": []}"#);
        let err = load_parcel_layer(&path).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }), "{err}");
        assert!(err.to_string().contains("no CRS"));
    }

    #[test]
    fn unsupported_crs_is_a_configuration_error() {
        let (_dir, path) = write_layer(
            r#"{
                "type": "FeatureCollection",
                "crs": {"type": "name", "properties": {"name": "EPSG:3857"}},
                "features": []
            }"#,
        );
        let err = load_parcel_layer(&path).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }), "{err}");
    }

    #[test]
    fn non_collection_input_is_rejected() {
        let (_dir, path) =
            write_layer(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#);
        let err = load_parcel_layer(&path).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }), "{err}");
    }
}
