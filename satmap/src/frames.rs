//! Frame conversions between the propagator output (TEME), Earth-fixed
//! coordinates and an observer's local horizon.

use crate::units::{Angle, Length};
use chrono::{TimeZone, Utc};
use na::{Rotation3, Vector3};
use nav_types::{ECEF, WGS84};
use satmap_types::prelude::*;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const GMST_BASE_DEG: f64 = 280.460_618_37;
const GMST_ROTATION_PER_DAY: f64 = 360.985_647_366_29;
const GMST_CORRECTION: f64 = 0.000_387_933;

/// Greenwich mean sidereal time
pub fn gmst(t: &UtcTimestamp) -> Angle {
    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).single();
    let days = j2000
        .map(|j| (*t - j).num_milliseconds() as f64 / (1000.0 * SECONDS_PER_DAY))
        .unwrap_or_default();
    let centuries = days / DAYS_PER_JULIAN_CENTURY;
    let deg = GMST_BASE_DEG + GMST_ROTATION_PER_DAY * days + GMST_CORRECTION * centuries.powi(2)
        - centuries.powi(3) / 38_710_000.0;
    Angle::from_degrees(deg).normalized()
}

/// Rotate a TEME vector into the Earth-fixed frame (polar motion ignored)
pub fn teme_to_ecef(teme: &Vector3<f64>, gmst: Angle) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst.as_radians()) * teme
}

/// Azimuth, elevation and slant range from `observer` to `target`
pub fn look_angle(observer: &WGS84<f64>, target: &ECEF<f64>) -> (LookAngle, Length) {
    let obs = ECEF::from(*observer);
    let d = Vector3::new(target.x() - obs.x(), target.y() - obs.y(), target.z() - obs.z());
    let range = d.norm();

    let (sin_lat, cos_lat) = observer.latitude_radians().sin_cos();
    let (sin_lon, cos_lon) = observer.longitude_radians().sin_cos();

    let east = -sin_lon * d.x + cos_lon * d.y;
    let north = -sin_lat * cos_lon * d.x - sin_lat * sin_lon * d.y + cos_lat * d.z;
    let up = cos_lat * cos_lon * d.x + cos_lat * sin_lon * d.y + sin_lat * d.z;

    let look = if range > 0.0 {
        LookAngle {
            azimuth: Angle::from_radians(east.atan2(north))
                .normalized()
                .as_radians(),
            elevation: (up / range).clamp(-1.0, 1.0).asin(),
        }
    } else {
        LookAngle::default()
    };

    (look, Length::from_meters(range))
}

/// Geodetic point directly beneath `target`
pub fn sub_point(target: &ECEF<f64>) -> SubPoint {
    let wgs = WGS84::from(*target);
    SubPoint {
        latitude: wgs.latitude_radians(),
        longitude: wgs.longitude_radians(),
        altitude: wgs.altitude(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gmst_at_j2000() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(gmst(&t).as_degrees(), 280.46061837, epsilon = 1e-9);
    }

    #[test]
    fn gmst_advances_about_one_degree_per_day() {
        let t0 = Utc.with_ymd_and_hms(2023, 7, 10, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2023, 7, 11, 0, 0, 0).unwrap();
        let d = (gmst(&t1) - gmst(&t0)).normalized().as_degrees();
        assert_relative_eq!(d, 0.985647, epsilon = 1e-4);
    }

    #[test]
    fn teme_rotation_preserves_z_and_norm() {
        let v = Vector3::new(7000e3, 1000e3, 500e3);
        let r = teme_to_ecef(&v, Angle::from_degrees(90.0));
        assert_relative_eq!(r.norm(), v.norm(), epsilon = 1e-6);
        assert_relative_eq!(r.z, v.z);
        // +y in the inertial frame lies on the prime meridian once Earth turned 90°
        assert_relative_eq!(r.x, 1000e3, epsilon = 1e-6);
        assert_relative_eq!(r.y, -7000e3, epsilon = 1e-6);
    }

    #[test]
    fn zenith_and_horizon() {
        let obs = WGS84::from_degrees_and_meters(0.0, 0.0, 0.0);

        let overhead = ECEF::from(WGS84::from_degrees_and_meters(0.0, 0.0, 20_000e3));
        let (look, range) = look_angle(&obs, &overhead);
        assert_relative_eq!(look.elevation, std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(range.as_kilometers(), 20_000.0, epsilon = 1e-6);

        // Due north along the surface tangent
        let obs_ecef = ECEF::from(obs);
        let north = ECEF::new(obs_ecef.x(), obs_ecef.y(), obs_ecef.z() + 1000.0);
        let (look, _) = look_angle(&obs, &north);
        assert_relative_eq!(look.azimuth, 0.0, epsilon = 1e-9);
        assert_relative_eq!(look.elevation, 0.0, epsilon = 1e-9);

        // Due east
        let east = ECEF::new(obs_ecef.x(), obs_ecef.y() + 1000.0, obs_ecef.z());
        let (look, _) = look_angle(&obs, &east);
        assert_relative_eq!(look.azimuth, std::f64::consts::FRAC_PI_2, epsilon = 1e-9);

        // Below the horizon on the far side of the Earth
        let far = ECEF::from(WGS84::from_degrees_and_meters(0.0, 180.0, 20_000e3));
        let (look, _) = look_angle(&obs, &far);
        assert!(look.elevation < 0.0);
    }

    #[test]
    fn sub_point_of_geodetic_position() {
        let p = ECEF::from(WGS84::from_degrees_and_meters(35.0, -120.0, 20_200e3));
        let sp = sub_point(&p);
        assert_relative_eq!(sp.latitude.to_degrees(), 35.0, epsilon = 1e-6);
        assert_relative_eq!(sp.longitude.to_degrees(), -120.0, epsilon = 1e-6);
        assert_relative_eq!(sp.altitude, 20_200e3, epsilon = 1e-2);
    }
}
