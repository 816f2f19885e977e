//! Sky plot: azimuth/elevation of the satellites above the observer's horizon.
//!
//! North is up and azimuth increases clockwise. The radius is the zenith
//! angle in degrees, so the zenith is the centre and the horizon the rim.

use crate::{
    color::group_colors,
    figure::{Anchor, Bounds, Figure, Layer, Marker, Rgb},
    propagation::PositionArena,
    units::Angle,
};
use satmap_types::{prelude::*, time::TITLE_TIMESTAMP_FORMAT};
use tracing::debug;

/// [in]
pub const FIGURE_SIZE: (f64, f64) = (10.0, 10.0);

/// Radius of the horizon ring
pub const MAX_RADIUS: f64 = 90.0;

/// Radial tick positions and their labels, zenith angle to elevation
pub const RADIAL_TICKS: [(f64, &str); 10] = [
    (0.0, "90"),
    (10.0, ""),
    (20.0, ""),
    (30.0, "60"),
    (40.0, ""),
    (50.0, ""),
    (60.0, "30"),
    (70.0, ""),
    (80.0, ""),
    (90.0, ""),
];

const SPOKE_STEP_DEG: usize = 45;
const RADIAL_LABEL_AZIMUTH_DEG: f64 = 22.5;
const SPOKE_LABEL_RADIUS: f64 = 96.0;
const CIRCLE_SEGMENTS: usize = 180;
const MARKER_SIZE: f64 = 6.0;
const FONT_SIZE: f64 = 10.0;

/// Above the horizon, elevation strictly greater than zero
pub fn is_visible(position: &SatellitePosition) -> bool {
    position.is_above_horizon()
}

/// Plot radius for an elevation, 0 at the zenith and 90 on the horizon
pub fn plot_radius(elevation: Angle) -> f64 {
    MAX_RADIUS - elevation.as_degrees()
}

/// Cartesian plot coordinates, north up and clockwise
pub fn polar_xy(azimuth: Angle, radius: f64) -> (f64, f64) {
    let (s, c) = azimuth.as_radians().sin_cos();
    (radius * s, radius * c)
}

pub fn polar_title(location: &LocationRecord, t: &UtcTimestamp) -> String {
    format!(
        "Visible Satellites above {location} at {} (UTC)",
        t.format(TITLE_TIMESTAMP_FORMAT)
    )
}

pub fn plot_polar_azel(arena: &PositionArena) -> Figure {
    let lim = MAX_RADIUS + 10.0;
    let mut fig = Figure::new(
        FIGURE_SIZE.0,
        FIGURE_SIZE.1,
        Bounds::new(-lim, lim, -lim, lim),
    );

    draw_grid(&mut fig);

    let colors = group_colors(arena.group_names());
    for group in arena.group_names() {
        let color = colors.get(group).unwrap_or(Rgb::BLACK);
        let visible: Vec<&SatellitePosition> = arena
            .group(group)
            .map(|(_, p)| p)
            .filter(|p| is_visible(p))
            .collect();
        debug!(%group, visible = visible.len(), "Visible satellites");

        let points: Vec<(f64, f64)> = visible.iter().map(|p| position_xy(p)).collect();
        fig.push(Layer::Scatter {
            points: points.clone(),
            color,
            marker: Marker::Plus,
            size: MARKER_SIZE,
            label: None,
        });

        for (p, xy) in visible.iter().zip(points) {
            fig.push(Layer::Annotation {
                position: xy,
                text: p.name.clone(),
                color,
                anchor: Anchor::LeftBottom,
                font_size: FONT_SIZE,
            });
        }
    }

    fig
}

fn position_xy(p: &SatellitePosition) -> (f64, f64) {
    polar_xy(
        Angle::from_radians(p.look.azimuth),
        plot_radius(Angle::from_radians(p.look.elevation)),
    )
}

fn circle(radius: f64) -> Vec<(f64, f64)> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            polar_xy(
                Angle::from_degrees(360.0 * i as f64 / CIRCLE_SEGMENTS as f64),
                radius,
            )
        })
        .collect()
}

fn draw_grid(fig: &mut Figure) {
    for (r, _) in RADIAL_TICKS.iter().filter(|(r, _)| *r > 0.0) {
        let outer = *r >= MAX_RADIUS;
        fig.push(Layer::Polyline {
            points: circle(*r),
            color: if outer { Rgb::BLACK } else { Rgb::GRAY },
            width: if outer { 1.0 } else { 0.8 },
        });
    }

    for az in (0..360).step_by(SPOKE_STEP_DEG) {
        let az = Angle::from_degrees(az as f64);
        fig.push(Layer::Polyline {
            points: vec![(0.0, 0.0), polar_xy(az, MAX_RADIUS)],
            color: Rgb::GRAY,
            width: 0.8,
        });
        fig.push(Layer::Annotation {
            position: polar_xy(az, SPOKE_LABEL_RADIUS),
            text: format!("{}°", az.as_degrees()),
            color: Rgb::BLACK,
            anchor: Anchor::Center,
            font_size: FONT_SIZE,
        });
    }

    for (r, label) in RADIAL_TICKS.iter().filter(|(_, l)| !l.is_empty()) {
        fig.push(Layer::Annotation {
            position: polar_xy(Angle::from_degrees(RADIAL_LABEL_AZIMUTH_DEG), *r),
            text: (*label).to_owned(),
            color: Rgb::BLACK,
            anchor: Anchor::LeftBottom,
            font_size: FONT_SIZE,
        });
    }
}
