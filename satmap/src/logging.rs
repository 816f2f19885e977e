//! Log level selection and run start/finish reporting.

use chrono::Local;
use std::time::{Duration, Instant};
use tracing::{info, level_filters::LevelFilter};

const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Max log level for the net verbosity, `verbose - quiet`:
/// warnings by default, each `-v` one level more detail, each `-q` one less,
/// nothing at all from -3.
pub fn level_filter(verbose: u8, quiet: u8) -> LevelFilter {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-3 => LevelFilter::OFF,
        -2 | -1 => LevelFilter::ERROR,
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init(verbose: u8, quiet: u8) {
    tracing_subscriber::fmt()
        .with_max_level(level_filter(verbose, quiet))
        .init();
}

/// Reports the wall clock start, finish and elapsed time of a run
#[derive(Debug)]
pub struct RunTimer {
    started: Instant,
}

impl RunTimer {
    pub fn start() -> Self {
        info!("Starting at {}", Local::now().format(ASCTIME_FORMAT));
        Self {
            started: Instant::now(),
        }
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.started.elapsed();
        info!("Finished at {}", Local::now().format(ASCTIME_FORMAT));
        info!("Elapsed time: {:.2} seconds", elapsed.as_secs_f64());
        elapsed
    }
}
