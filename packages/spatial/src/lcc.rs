//! Lambert Conformal Conic (2SP) transform for EPSG:26986.
//!
//! NAD83 / Massachusetts Mainland: GRS80 ellipsoid, standard parallels
//! 42°41'N and 41°43'N, origin 41°N 71°30'W, false easting 200 000 m,
//! false northing 750 000 m. Formulas follow Snyder, Map Projections —
//! A Working Manual, pp. 107-109. Implemented directly rather than
//! binding the PROJ C library, since this is the only zone the pipeline
//! ever touches.

use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;
use std::sync::LazyLock;

/// GRS80 semi-major axis in meters.
const A: f64 = 6_378_137.0;
/// GRS80 inverse flattening.
const INV_F: f64 = 298.257_222_101;

/// Standard parallels, latitude/longitude of origin (degrees).
const LAT_1: f64 = 42.683_333_333_333_336; // 42°41'N
const LAT_2: f64 = 41.716_666_666_666_667; // 41°43'N
const LAT_0: f64 = 41.0;
const LON_0: f64 = -71.5;

const FALSE_EASTING: f64 = 200_000.0;
const FALSE_NORTHING: f64 = 750_000.0;

/// Convergence tolerance for the inverse latitude iteration (radians).
const INVERSE_TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: u32 = 20;

struct ZoneConstants {
    /// First eccentricity.
    e: f64,
    /// Cone constant.
    n: f64,
    /// Mapping radius factor.
    f: f64,
    /// Radius at the latitude of origin.
    rho0: f64,
}

static ZONE: LazyLock<ZoneConstants> = LazyLock::new(|| {
    let flattening = 1.0 / INV_F;
    let e = (flattening * (2.0 - flattening)).sqrt();

    let phi1 = LAT_1.to_radians();
    let phi2 = LAT_2.to_radians();
    let phi0 = LAT_0.to_radians();

    let m1 = m(phi1, e);
    let m2 = m(phi2, e);
    let t1 = t(phi1, e);
    let t2 = t(phi2, e);
    let t0 = t(phi0, e);

    let n = (m1.ln() - m2.ln()) / (t1.ln() - t2.ln());
    let f = m1 / (n * t1.powf(n));
    let rho0 = A * f * t0.powf(n);

    ZoneConstants { e, n, f, rho0 }
});

/// Snyder's m: cos(phi) / sqrt(1 - e^2 sin^2(phi)).
fn m(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    phi.cos() / es.mul_add(-es, 1.0).sqrt()
}

/// Snyder's t: tan(pi/4 - phi/2) / ((1 - e sin phi)/(1 + e sin phi))^(e/2).
fn t(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

/// Projects geographic coordinates (degrees, EPSG:4326) to Massachusetts
/// Mainland easting/northing in meters.
#[must_use]
pub fn project(lon: f64, lat: f64) -> (f64, f64) {
    let z = &*ZONE;
    let phi = lat.to_radians();
    let lam = lon.to_radians();

    let rho = A * z.f * t(phi, z.e).powf(z.n);
    let theta = z.n * (lam - LON_0.to_radians());

    let x = rho.mul_add(theta.sin(), FALSE_EASTING);
    let y = FALSE_NORTHING + z.rho0 - rho * theta.cos();
    (x, y)
}

/// Inverse of [`project`]: easting/northing in meters back to geographic
/// degrees. Latitude is recovered by fixed-point iteration.
#[must_use]
pub fn unproject(x: f64, y: f64) -> (f64, f64) {
    let z = &*ZONE;
    let dx = x - FALSE_EASTING;
    let dy = z.rho0 - (y - FALSE_NORTHING);

    let rho = dx.hypot(dy) * z.n.signum();
    let t_prime = (rho / (A * z.f)).powf(1.0 / z.n);
    let theta = dx.atan2(dy);

    let lam = theta / z.n + LON_0.to_radians();

    let mut phi = FRAC_PI_2 - 2.0 * t_prime.atan();
    for _ in 0..MAX_ITERATIONS {
        let es = z.e * phi.sin();
        let next =
            FRAC_PI_2 - 2.0 * (t_prime * ((1.0 - es) / (1.0 + es)).powf(z.e / 2.0)).atan();
        if (next - phi).abs() < INVERSE_TOLERANCE {
            phi = next;
            break;
        }
        phi = next;
    }

    (lam.to_degrees(), phi.to_degrees())
}
