#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Coordinate reference handling for the parcel pipeline.
//!
//! Identifies the CRS a parcel layer declares, reprojects geometry
//! between the planar reference used for area math (EPSG:26986) and the
//! geographic reference used for output (EPSG:4326), and computes parcel
//! areas in acres.

pub mod lcc;

use geo::{Area, MapCoords, MultiPolygon};

/// Square meters per acre; the divisor applied to planar polygon areas.
pub const SQ_METERS_PER_ACRE: f64 = 4_046.856_422_4;

/// The two coordinate reference systems the pipeline understands.
///
/// Area computation requires [`Crs::Planar26986`]; output always uses
/// [`Crs::Geographic4326`]. Anything else must be rejected at load time
/// rather than guessed at, since a wrong assumption would silently
/// produce areas in the wrong units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crs {
    /// NAD83 / Massachusetts Mainland, meters.
    Planar26986,
    /// WGS84 longitude/latitude, degrees.
    Geographic4326,
}

impl Crs {
    /// Parses a `GeoJSON` legacy `crs` name such as
    /// `urn:ogc:def:crs:EPSG::26986`, `EPSG:4326`, or
    /// `urn:ogc:def:crs:OGC:1.3:CRS84`.
    ///
    /// Returns `None` for names this pipeline does not support.
    #[must_use]
    pub fn from_crs_name(name: &str) -> Option<Self> {
        let tail = name
            .rsplit(':')
            .find(|segment| !segment.is_empty())?
            .trim()
            .to_uppercase();

        match tail.as_str() {
            "26986" => Some(Self::Planar26986),
            "4326" | "CRS84" => Some(Self::Geographic4326),
            _ => None,
        }
    }

    /// The EPSG code for this reference.
    #[must_use]
    pub const fn epsg(self) -> u32 {
        match self {
            Self::Planar26986 => 26_986,
            Self::Geographic4326 => 4_326,
        }
    }
}

/// Reprojects geographic (EPSG:4326) geometry to the planar reference.
#[must_use]
pub fn to_planar(geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    geometry.map_coords(|c| {
        let (x, y) = lcc::project(c.x, c.y);
        geo::coord! { x: x, y: y }
    })
}

/// Reprojects planar (EPSG:26986) geometry to geographic coordinates.
#[must_use]
pub fn to_geographic(geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    geometry.map_coords(|c| {
        let (lon, lat) = lcc::unproject(c.x, c.y);
        geo::coord! { x: lon, y: lat }
    })
}

/// Computes the area of planar geometry in acres.
///
/// Degenerate geometry yields zero area rather than an error; the
/// enrichment stage maps zero acres to a null revenue-per-acre.
#[must_use]
pub fn area_acres(geometry: &MultiPolygon<f64>) -> f64 {
    geometry.unsigned_area() / SQ_METERS_PER_ACRE
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
///
/// Handles both `Polygon` and `MultiPolygon` geometry types; anything
/// else (points, lines, collections) returns `None`.
#[must_use]
pub fn multipolygon_from_geojson(geometry: &geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    fn rect(x0: f64, y0: f64, width: f64, height: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![
                (x0, y0),
                (x0 + width, y0),
                (x0 + width, y0 + height),
                (x0, y0 + height),
                (x0, y0),
            ]),
            vec![],
        )])
    }

    #[test]
    fn parses_urn_and_short_crs_names() {
        assert_eq!(
            Crs::from_crs_name("urn:ogc:def:crs:EPSG::26986"),
            Some(Crs::Planar26986)
        );
        assert_eq!(Crs::from_crs_name("EPSG:26986"), Some(Crs::Planar26986));
        assert_eq!(Crs::from_crs_name("EPSG:4326"), Some(Crs::Geographic4326));
        assert_eq!(
            Crs::from_crs_name("urn:ogc:def:crs:OGC:1.3:CRS84"),
            Some(Crs::Geographic4326)
        );
    }

    #[test]
    fn rejects_unsupported_crs_names() {
        assert_eq!(Crs::from_crs_name("EPSG:3857"), None);
        assert_eq!(Crs::from_crs_name(""), None);
    }

    #[test]
    fn hundred_meter_square_in_acres() {
        let area = area_acres(&rect(230_000.0, 890_000.0, 100.0, 100.0));
        assert!((area - 10_000.0 / SQ_METERS_PER_ACRE).abs() < 1e-9);
    }

    #[test]
    fn planar_round_trip_preserves_shape() {
        let planar = rect(230_000.0, 890_000.0, 200.0, 100.0);
        let geographic = to_geographic(&planar);
        let back = to_planar(&geographic);

        let orig = &planar.0[0].exterior().0;
        let round = &back.0[0].exterior().0;
        for (a, b) in orig.iter().zip(round.iter()) {
            assert!((a.x - b.x).abs() < 1e-4);
            assert!((a.y - b.y).abs() < 1e-4);
        }
    }

    #[test]
    fn geojson_polygon_and_multipolygon_convert() {
        let poly = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        assert!(multipolygon_from_geojson(&poly).is_some());

        let point = geojson::Geometry::new(geojson::Value::Point(vec![0.0, 0.0]));
        assert!(multipolygon_from_geojson(&point).is_none());
    }
}
