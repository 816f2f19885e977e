use crate::units::Length;
use chrono::NaiveDateTime;
use na::Vector3;
use satmap_types::prelude::*;

/// A propagatable satellite, built from one catalog entry
pub struct Satellite {
    name: String,
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl Satellite {
    /// Parse the element lines of `tle`. The error is a human readable reason.
    pub fn from_tle(tle: &UnstructuredTle) -> Result<Self, String> {
        let elements = sgp4::Elements::from_tle(
            Some(tle.satellite_name.clone()),
            tle.line1.as_bytes(),
            tle.line2.as_bytes(),
        )
        .map_err(|e| e.to_string())?;
        let constants = sgp4::Constants::from_elements(&elements).map_err(|e| e.to_string())?;
        Ok(Self {
            name: tle.satellite_name.clone(),
            elements,
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn epoch(&self) -> NaiveDateTime {
        self.elements.datetime
    }

    pub fn minutes_since_epoch(&self, t: &UtcTimestamp) -> f64 {
        (t.naive_utc() - self.elements.datetime).num_milliseconds() as f64 / 60_000.0
    }

    /// Position in the TEME frame [m]
    pub fn propagate(&self, t: &UtcTimestamp) -> Result<Vector3<f64>, String> {
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(self.minutes_since_epoch(t)))
            .map_err(|e| e.to_string())?;
        let [x, y, z] = prediction.position.map(|km| Length::from_kilometers(km).as_meters());
        Ok(Vector3::new(x, y, z))
    }
}

impl std::fmt::Debug for Satellite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satellite")
            .field("name", &self.name)
            .field("norad_id", &self.elements.norad_id)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}
