pub use crate::location::{parse_location, split_coordinates, GeolocationError};
pub use crate::parser::{count_lines, parse_tle_catalog, TleParseError};

pub mod location;
pub mod parser;

/// Lines making up one catalog entry: name, element line 1, element line 2
pub const LINES_PER_TLE: usize = 3;
