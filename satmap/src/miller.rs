//! Miller cylindrical projection, unit sphere.
//!
//! x is the longitude in radians, y stretches latitude so that the poles are
//! finite (about ±2.303).

use crate::{figure::Bounds, units::Angle};
use std::f64::consts::{FRAC_PI_4, PI};

pub fn project(longitude: Angle, latitude: Angle) -> (f64, f64) {
    let y = 1.25 * (FRAC_PI_4 + 0.4 * latitude.as_radians()).tan().ln();
    (longitude.as_radians(), y)
}

/// Inverse of [`project`], returns (longitude, latitude)
pub fn unproject(x: f64, y: f64) -> (Angle, Angle) {
    let lat = 2.5 * (0.8 * y).exp().atan() - 0.625 * PI;
    (Angle::from_radians(x), Angle::from_radians(lat))
}

/// Convenience for (longitude, latitude) pairs in degrees
pub fn project_degrees((lon, lat): (f64, f64)) -> (f64, f64) {
    project(Angle::from_degrees(lon), Angle::from_degrees(lat))
}

/// The whole globe in projected coordinates
pub fn world_bounds() -> Bounds {
    let (x_min, y_min) = project_degrees((-180.0, -90.0));
    let (x_max, y_max) = project_degrees((180.0, 90.0));
    Bounds::new(x_min, x_max, y_min, y_max)
}
