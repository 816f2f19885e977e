//! The end to end run: locate, load, propagate and plot.

use crate::{
    basemap::load_basemap,
    catalog::load_catalogs,
    config::Config,
    error::Error,
    fetch::Fetch,
    figure::Figure,
    geolocation::resolve_location,
    ground_track::plot_ground_tracks,
    observer::observer_from_location,
    polar::{plot_polar_azel, polar_title},
    propagation::compute_positions,
};
use satmap_types::prelude::*;
use std::str::FromStr;
use tracing::info;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum PlotType {
    /// Azimuth/elevation of the satellites above the horizon
    #[default]
    PolarAzel,
    /// Sub-points of every satellite on a world map
    GroundTrack,
}

impl FromStr for PlotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polar_azel" => Ok(PlotType::PolarAzel),
            "ground_track" => Ok(PlotType::GroundTrack),
            _ => Err(format!(
                "Unknown plot type '{s}', expected 'polar_azel' or 'ground_track'"
            )),
        }
    }
}

/// Build the requested figure.
///
/// Observation time defaults to now. The basemap is only loaded for the
/// ground track view.
pub fn run<F: Fetch + ?Sized>(
    fetch: &F,
    config: &Config,
    plot_type: PlotType,
    obs_time: Option<UtcTimestamp>,
) -> Result<Figure, Error> {
    let location = resolve_location(fetch, &config.geolocation_url)?;
    let observer = observer_from_location(&location, obs_time)?;
    let groups = load_catalogs(fetch, &config.catalogs)?;
    let arena = compute_positions(&groups, &observer)?;
    info!(
        groups = groups.len(),
        satellites = arena.len(),
        "Computed satellite positions"
    );

    let figure = match plot_type {
        PlotType::PolarAzel => {
            let mut fig = plot_polar_azel(&arena);
            fig.set_title(polar_title(&location, &observer.timestamp));
            fig
        }
        PlotType::GroundTrack => {
            let basemap = load_basemap(fetch, &config.basemap)?;
            plot_ground_tracks(&arena, &basemap, &observer.timestamp)
        }
    };
    Ok(figure)
}
