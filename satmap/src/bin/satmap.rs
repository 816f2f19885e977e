use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use satmap_lib::{
    config::Config,
    fetch::HttpFetcher,
    logging::{self, RunTimer},
    pipeline::{self, PlotType},
    render::{save_figure, show_figure},
};

/// Plot the GNSS satellites visible from your current location
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Which view to produce
    #[arg(short = 't', long, value_enum, default_value_t = PlotType::PolarAzel)]
    plot_type: PlotType,

    /// Save the figure to this image file instead of opening a window
    #[arg(short = 'f', long)]
    figure: Option<PathBuf>,

    /// Increase log verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    quiet: u8,

    /// Observation instant (RFC 3339), defaults to now
    #[arg(long, value_parser = parse_time)]
    time: Option<DateTime<Utc>>,

    /// Configuration toml file.
    ///
    /// The built-in defaults are used when not provided.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{s}': {e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    logging::init(opts.verbose, opts.quiet);
    let timer = RunTimer::start();

    let cfg = Config::load_or_default(opts.config.as_ref())?;
    let fetcher = HttpFetcher::new(cfg.timeout);

    let figure = pipeline::run(&fetcher, &cfg, opts.plot_type, opts.time)?;

    match &opts.figure {
        Some(path) => save_figure(&figure, path, cfg.dpi)?,
        None => show_figure(figure)?,
    }

    timer.finish();
    Ok(())
}
