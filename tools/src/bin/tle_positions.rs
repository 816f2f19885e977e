// cargo run --bin tle-positions -- --lat 47.6 --lon -122.3 --time 2023-07-10T12:00:00Z -o /tmp/positions.txt gps-ops.txt

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use std::fs::{self, File};
use std::io::prelude::*;
use std::path::PathBuf;
use tracing::info;

use satmap_lib::{
    catalog::{group_name_from_path, parse_catalog, SatelliteGroups},
    logging,
    observer::build_observer,
    propagation::compute_positions,
};

/// Print the position of every satellite in a TLE file
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Observer latitude [deg]
    #[arg(long, allow_hyphen_values = true)]
    lat: String,

    /// Observer longitude [deg]
    #[arg(long, allow_hyphen_values = true)]
    lon: String,

    /// Observation instant (RFC 3339), defaults to now
    #[arg(long)]
    time: Option<DateTime<Utc>>,

    /// Increase log verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Output file path to write
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// TLE catalog file to read, the group is named after the file
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    logging::init(opts.verbose, 0);

    let text = fs::read_to_string(&opts.input)?;
    let mut groups = SatelliteGroups::new();
    groups.insert(parse_catalog(group_name_from_path(&opts.input), &text)?);

    let observer = build_observer(opts.lat.as_str(), opts.lon.as_str(), opts.time)?;
    let arena = compute_positions(&groups, &observer)?;
    info!(%observer, satellites = arena.len(), "Computed positions");

    let mut output = File::create(opts.output)?;
    for (key, pos) in arena.iter() {
        writeln!(
            &mut output,
            "{} \"{}\" {} {} {} {} {}",
            key.group,
            pos.name,
            pos.look.azimuth.to_degrees(),
            pos.look.elevation.to_degrees(),
            pos.sub_point.latitude.to_degrees(),
            pos.sub_point.longitude.to_degrees(),
            pos.range / 1000.0,
        )?;
    }

    Ok(())
}
