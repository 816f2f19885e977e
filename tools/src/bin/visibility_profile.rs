// cargo run --bin visibility-profile --release -- --satellite "GPS BIIR-2  (PRN 13)" --lat 0 --lon 0 --duration 86400 --dt 60 gps-ops.txt /tmp/visibility.txt

use chrono::{DateTime, Duration, Utc};
use clap::{ArgAction, Parser};
use std::fs::{self, File};
use std::io::prelude::*;
use std::path::PathBuf;

use satmap_lib::{
    catalog::{group_name_from_path, parse_catalog},
    logging,
    observer::build_observer,
    polar::is_visible,
    propagation::compute_position,
};

/// Print a satellite's look angle over time
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Satellite name, as given on the TLE name line
    #[arg(short = 's', long)]
    satellite: String,

    /// Observer latitude [deg]
    #[arg(long, allow_hyphen_values = true)]
    lat: String,

    /// Observer longitude [deg]
    #[arg(long, allow_hyphen_values = true)]
    lon: String,

    /// Start instant (RFC 3339), defaults to now
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Duration in seconds
    #[arg(short = 'd', long)]
    duration: f64,

    /// Time step (dt) in seconds
    #[arg(short = 't', long)]
    dt: f64,

    /// Use absolute UTC timestamp seconds instead of relative
    #[arg(short = 'a', long)]
    abs_time: bool,

    /// Increase log verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// TLE catalog file to read
    input: PathBuf,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    logging::init(opts.verbose, 0);

    if opts.dt.is_nan() || opts.dt <= 0.0 {
        return Err(format!("Time step must be positive, got {}", opts.dt).into());
    }

    let text = fs::read_to_string(&opts.input)?;
    let group = parse_catalog(group_name_from_path(&opts.input), &text)?;
    let sat = group
        .satellites
        .iter()
        .find(|s| s.name() == opts.satellite.trim())
        .ok_or_else(|| format!("Satellite '{}' not found in {}", opts.satellite, group.name))?;

    let start = opts.start.unwrap_or_else(Utc::now);
    let mut output = File::create(opts.output)?;

    let mut t = 0.0;
    while t <= opts.duration {
        let timestamp = start + Duration::milliseconds((t * 1000.0).round() as i64);
        let observer = build_observer(opts.lat.as_str(), opts.lon.as_str(), Some(timestamp))?;
        let pos = compute_position(&group.name, sat, &observer)?;

        let time_sec = if opts.abs_time {
            timestamp.timestamp() as f64
        } else {
            t
        };

        writeln!(
            &mut output,
            "{} {} {} {}",
            time_sec,
            pos.look.azimuth.to_degrees(),
            pos.look.elevation.to_degrees(),
            is_visible(&pos) as usize,
        )?;

        t += opts.dt;
    }

    Ok(())
}
