//! A lightweight uom-ish set of the quantities the plotting pipeline passes around.

use std::f64::consts::TAU;
use std::ops::Sub;

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle { degrees }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle {
            degrees: radians.to_degrees(),
        }
    }

    pub fn as_degrees(&self) -> f64 {
        self.degrees
    }

    pub fn as_radians(&self) -> f64 {
        self.degrees.to_radians()
    }

    /// Wrapped into [0, 360) degrees
    pub fn normalized(&self) -> Angle {
        Angle::from_radians(self.as_radians().rem_euclid(TAU))
    }
}

impl Sub<Angle> for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Self::Output {
        Angle::from_degrees(self.as_degrees() - rhs.as_degrees())
    }
}
