use derive_more::Display;

/// Topocentric look angle from an observer to a satellite
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(fmt = "{{az: {}, el: {}}}", "azimuth", "elevation")]
pub struct LookAngle {
    /// Azimuth, clockwise from north [rad], in [0, 2π)
    pub azimuth: f64,
    /// Elevation above the local horizon [rad]
    pub elevation: f64,
}

/// The point on the Earth directly beneath a satellite
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(fmt = "{{lat: {}, lon: {}}}", "latitude", "longitude")]
pub struct SubPoint {
    /// Geodetic, WGS-84 latitude [rad]
    pub latitude: f64,
    /// Geodetic, WGS-84 longitude [rad], in [-π, π]
    pub longitude: f64,
    /// Height above the WGS-84 ellipsoid [m]
    pub altitude: f64,
}

/// A satellite position computed for one observer at one instant
#[derive(Clone, PartialEq, Debug, Display)]
#[display(fmt = "{{name: {}, look: {}, sub_point: {}, ...}}", "name", "look", "sub_point")]
pub struct SatellitePosition {
    pub name: String,

    pub look: LookAngle,

    /// Slant range from the observer [m]
    pub range: f64,

    pub sub_point: SubPoint,

    /// Position vector in ECEF [m]
    pub pos_ecef: na::Vector3<f64>,
}

impl SatellitePosition {
    /// Above the local horizon (elevation strictly greater than zero)
    pub fn is_above_horizon(&self) -> bool {
        self.look.elevation > 0.0
    }
}
