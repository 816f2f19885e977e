//! Day/night terminator for the ground track view.
//!
//! Low-precision solar position: declination from the day of year and the
//! sub-solar longitude from the UTC hour angle.

use crate::units::Angle;
use chrono::{Datelike, Timelike};
use satmap_types::prelude::*;

const SOLAR_DECLINATION_MAX_DEG: f64 = -23.45;
const DAYS_PER_YEAR: f64 = 365.0;

/// Keeps the terminator defined at the equinoxes
const MIN_DECLINATION_DEG: f64 = 1e-6;

pub fn solar_declination(t: &UtcTimestamp) -> Angle {
    let doy = t.ordinal() as f64;
    Angle::from_degrees(
        SOLAR_DECLINATION_MAX_DEG * ((360.0 / DAYS_PER_YEAR) * (doy + 10.0)).to_radians().cos(),
    )
}

/// (latitude, longitude) of the point with the sun at zenith
pub fn subsolar_point(t: &UtcTimestamp) -> (Angle, Angle) {
    let hours = t.hour() as f64
        + t.minute() as f64 / 60.0
        + (t.second() as f64 + t.nanosecond() as f64 * 1e-9) / 3600.0;
    let lon = -(hours - 12.0) * 15.0;
    (solar_declination(t), Angle::from_degrees(lon))
}

/// Latitude of the terminator at `longitude`
pub fn terminator_latitude(longitude: Angle, subsolar: (Angle, Angle)) -> Angle {
    let (decl, sub_lon) = subsolar;
    let decl = clamp_declination(decl);
    let h = (longitude - sub_lon).as_radians();
    Angle::from_radians((-h.cos() / decl.as_radians().tan()).atan())
}

/// Terminator sampled every `step_deg` degrees of longitude from -180 to 180,
/// (longitude, latitude) in degrees, and the latitude of the pole in darkness.
/// The night side is the region between the two.
pub fn night_boundary(t: &UtcTimestamp, step_deg: f64) -> (Vec<(f64, f64)>, f64) {
    let subsolar = subsolar_point(t);
    let steps = (360.0 / step_deg.max(1e-3)).ceil() as usize;
    let curve = (0..=steps)
        .map(|i| -180.0 + 360.0 * i as f64 / steps as f64)
        .map(|lon| {
            let lat = terminator_latitude(Angle::from_degrees(lon), subsolar);
            (lon, lat.as_degrees())
        })
        .collect();

    // Darkness surrounds the pole tilted away from the sun
    let pole = if clamp_declination(subsolar.0).as_degrees() > 0.0 {
        -90.0
    } else {
        90.0
    };
    (curve, pole)
}

fn clamp_declination(decl: Angle) -> Angle {
    let d = decl.as_degrees();
    if d.abs() < MIN_DECLINATION_DEG {
        Angle::from_degrees(MIN_DECLINATION_DEG.copysign(d))
    } else {
        decl
    }
}
