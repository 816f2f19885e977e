use crate::error::{Error, ParseFailure};
use chrono::Utc;
use satmap_types::prelude::*;
use tracing::debug;

/// A latitude or longitude in degrees, either numeric or as text.
pub trait Coordinate {
    fn to_degrees(&self) -> Result<f64, ParseFailure>;
}

impl Coordinate for f64 {
    fn to_degrees(&self) -> Result<f64, ParseFailure> {
        Ok(*self)
    }
}

impl Coordinate for &str {
    fn to_degrees(&self) -> Result<f64, ParseFailure> {
        self.trim()
            .parse::<f64>()
            .map_err(|source| ParseFailure::Coordinate {
                value: self.to_string(),
                source,
            })
    }
}

impl Coordinate for String {
    fn to_degrees(&self) -> Result<f64, ParseFailure> {
        self.as_str().to_degrees()
    }
}

/// Build an observer at the given coordinates [deg].
///
/// The observation instant defaults to the current time when not given.
/// Coordinates are not range checked.
pub fn build_observer<A: Coordinate, B: Coordinate>(
    latitude: A,
    longitude: B,
    timestamp: Option<UtcTimestamp>,
) -> Result<Observer, Error> {
    let observer = Observer::new(
        latitude.to_degrees()?,
        longitude.to_degrees()?,
        timestamp.unwrap_or_else(Utc::now),
    );
    debug!(%observer, "Built observer");
    Ok(observer)
}

/// Build an observer at a resolved location
pub fn observer_from_location(
    location: &LocationRecord,
    timestamp: Option<UtcTimestamp>,
) -> Result<Observer, Error> {
    let (lat, lon) = satmap_protocol::split_coordinates(&location.loc)
        .map_err(ParseFailure::LocationCoordinates)?;
    build_observer(lat, lon, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    #[test]
    fn numeric_and_text_coordinates() {
        let t = Utc.with_ymd_and_hms(2023, 7, 10, 12, 0, 0).unwrap();
        let a = build_observer(40.015, -105.2705, Some(t)).unwrap();
        let b = build_observer("40.015", "-105.2705", Some(t)).unwrap();
        let c = build_observer(String::from(" 40.015"), -105.2705, Some(t)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_relative_eq!(a.latitude, 40.015);
        assert_relative_eq!(a.longitude, -105.2705);
        assert_eq!(a.timestamp, t);
    }

    #[test]
    fn timestamp_defaults_to_now() {
        let before = Utc::now();
        let o = build_observer(0.0, 0.0, None).unwrap();
        assert!(o.timestamp >= before);
        assert!(o.timestamp <= Utc::now());
    }

    #[test]
    fn out_of_range_is_passed_through() {
        let o = build_observer(123.0, 400.0, None).unwrap();
        assert_eq!(o.latitude, 123.0);
        assert_eq!(o.longitude, 400.0);
    }

    #[test]
    fn unparsable_coordinate() {
        assert!(matches!(
            build_observer("north", 0.0, None),
            Err(Error::Parse(ParseFailure::Coordinate { .. }))
        ));
    }

    #[test]
    fn from_location() {
        let loc = LocationRecord {
            city: "Quito".to_owned(),
            region: "Pichincha".to_owned(),
            loc: "-0.2299,-78.5249".to_owned(),
        };
        let o = observer_from_location(&loc, None).unwrap();
        assert_relative_eq!(o.latitude, -0.2299);
        assert_relative_eq!(o.longitude, -78.5249);

        let bad = LocationRecord {
            loc: "-0.2299".to_owned(),
            ..loc
        };
        assert!(matches!(
            observer_from_location(&bad, None),
            Err(Error::Parse(ParseFailure::LocationCoordinates(_)))
        ));
    }
}
