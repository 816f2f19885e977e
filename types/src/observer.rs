use crate::time::UtcTimestamp;
use derive_more::Display;

/// A ground observer at a single instant.
///
/// No range checking is applied to the coordinates, out-of-range values are
/// passed through to the propagation stage as-is.
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(
    fmt = "{{lat: {}, lon: {}, time: {}}}",
    "latitude",
    "longitude",
    "timestamp"
)]
pub struct Observer {
    /// Geodetic latitude [deg]
    pub latitude: f64,
    /// Geodetic longitude [deg]
    pub longitude: f64,
    /// Observation instant
    pub timestamp: UtcTimestamp,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64, timestamp: UtcTimestamp) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }
}
