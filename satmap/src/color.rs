//! Per-group colours, sampled from the `nipy_spectral` colour map.

use crate::figure::Rgb;
use satmap_types::prelude::*;

/// Number of entries in the sampled lookup table
pub const LUT_SIZE: usize = 256;

type Segment = &'static [(f64, f64)];

const RED: Segment = &[
    (0.00, 0.0),
    (0.05, 0.4667),
    (0.10, 0.5333),
    (0.15, 0.0),
    (0.60, 0.0),
    (0.65, 0.7333),
    (0.70, 0.9333),
    (0.75, 1.0),
    (0.85, 1.0),
    (0.90, 0.8667),
    (0.95, 0.80),
    (1.00, 0.80),
];

const GREEN: Segment = &[
    (0.00, 0.0),
    (0.20, 0.0),
    (0.25, 0.4667),
    (0.30, 0.6000),
    (0.35, 0.6667),
    (0.40, 0.6667),
    (0.45, 0.6000),
    (0.50, 0.7333),
    (0.55, 0.8667),
    (0.60, 1.0),
    (0.65, 1.0),
    (0.70, 0.9333),
    (0.75, 0.8000),
    (0.80, 0.6000),
    (0.85, 0.0),
    (0.95, 0.0),
    (1.00, 0.80),
];

const BLUE: Segment = &[
    (0.00, 0.0),
    (0.05, 0.5333),
    (0.10, 0.6000),
    (0.15, 0.6667),
    (0.20, 0.8667),
    (0.30, 0.8667),
    (0.35, 0.6667),
    (0.40, 0.5333),
    (0.45, 0.0),
    (0.95, 0.0),
    (1.00, 0.80),
];

/// Piecewise linear interpolation of a channel at `x` in [0, 1]
fn channel(segment: Segment, x: f64) -> f64 {
    for w in segment.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if x <= x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    segment.last().map(|(_, y)| *y).unwrap_or_default()
}

/// Colour map entry `idx` of the [`LUT_SIZE`] step table
pub fn lut(idx: usize) -> Rgb {
    let x = idx.min(LUT_SIZE - 1) as f64 / (LUT_SIZE - 1) as f64;
    Rgb::from_unit(channel(RED, x), channel(GREEN, x), channel(BLUE, x))
}

/// Colour for group `index` of `count`, sampling the map at evenly spaced
/// points from 0 to 1 inclusive
pub fn color_for(index: usize, count: usize) -> Rgb {
    let t = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    lut((t * LUT_SIZE as f64).floor() as usize)
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct GroupColors {
    colors: Vec<(GroupName, Rgb)>,
}

impl GroupColors {
    pub fn get(&self, group: &GroupName) -> Option<Rgb> {
        self.colors
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(GroupName, Rgb)> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// One colour per group, depending only on each group's position and the
/// number of groups
pub fn group_colors<'a, I>(names: I) -> GroupColors
where
    I: IntoIterator<Item = &'a GroupName>,
{
    let names: Vec<&GroupName> = names.into_iter().collect();
    let count = names.len();
    GroupColors {
        colors: names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), color_for(idx, count)))
            .collect(),
    }
}
