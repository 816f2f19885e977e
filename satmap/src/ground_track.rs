//! World map of satellite sub-points on a Miller cylindrical projection.

use crate::{
    basemap::Basemap,
    color::group_colors,
    figure::{Figure, Layer, LegendEntry, Marker, Rgb},
    miller, nightshade,
    propagation::PositionArena,
    units::Angle,
};
use satmap_types::{prelude::*, time::TITLE_TIMESTAMP_FORMAT};

/// [in]
pub const FIGURE_SIZE: (f64, f64) = (12.0, 10.0);

pub const IMAGERY_ALPHA: f64 = 0.95;
pub const NIGHT_ALPHA: f64 = 0.5;

const NIGHT_STEP_DEG: f64 = 1.0;
const MARKER_SIZE: f64 = 6.32;

pub fn ground_track_title(t: &UtcTimestamp) -> String {
    format!(
        "Visible Satellites at {} (UTC)",
        t.format(TITLE_TIMESTAMP_FORMAT)
    )
}

/// Every satellite's sub-point, regardless of elevation, over the basemap
/// and the night side at `obs_time`
pub fn plot_ground_tracks(arena: &PositionArena, basemap: &Basemap, obs_time: &UtcTimestamp) -> Figure {
    let mut fig = Figure::new(FIGURE_SIZE.0, FIGURE_SIZE.1, miller::world_bounds());
    fig.set_title(ground_track_title(obs_time));

    if let Some(img) = basemap.imagery.as_ref() {
        fig.push(Layer::Raster(img.to_miller_raster(IMAGERY_ALPHA)));
    }

    let (terminator, pole) = nightshade::night_boundary(obs_time, NIGHT_STEP_DEG);
    fig.push(Layer::Area {
        curve: terminator.into_iter().map(miller::project_degrees).collect(),
        baseline: miller::project_degrees((0.0, pole)).1,
        fill: Rgb::BLACK,
        alpha: NIGHT_ALPHA,
    });

    for line in basemap.coastlines.iter() {
        fig.push(Layer::Polyline {
            points: line.iter().copied().map(miller::project_degrees).collect(),
            color: Rgb::BLACK,
            width: 1.0,
        });
    }

    let colors = group_colors(arena.group_names());
    for group in arena.group_names() {
        let color = colors.get(group).unwrap_or(Rgb::BLACK);
        let points = arena
            .group(group)
            .map(|(_, p)| {
                miller::project(
                    Angle::from_radians(p.sub_point.longitude),
                    Angle::from_radians(p.sub_point.latitude),
                )
            })
            .collect();
        fig.push(Layer::Scatter {
            points,
            color,
            marker: Marker::Plus,
            size: MARKER_SIZE,
            label: Some(group.to_string()),
        });
        fig.legend.push(LegendEntry {
            label: group.to_string(),
            color,
            marker: Marker::Plus,
        });
    }

    fig
}
