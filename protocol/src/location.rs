//! Geolocation lookup response body (ipinfo.io style JSON)

use satmap_types::prelude::*;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Malformed geolocation response. {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed coordinate string '{0}', expected 'lat,lon'")]
    Coordinates(String),
}

/// Only the fields we need, everything else in the body is ignored
#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    city: String,
    region: String,
    loc: String,
}

/// Parse a geolocation response body. `city`, `region` and `loc` are required
/// string fields, and `loc` must be a `lat,lon` pair.
pub fn parse_location(body: &str) -> Result<LocationRecord, GeolocationError> {
    let resp: IpInfoResponse = serde_json::from_str(body)?;
    split_coordinates(&resp.loc)?;
    Ok(LocationRecord {
        city: resp.city,
        region: resp.region,
        loc: resp.loc,
    })
}

/// Split a `"lat,lon"` coordinate string on its single comma.
///
/// The halves are returned as-is (trimmed), numeric conversion happens when
/// the observer is built.
pub fn split_coordinates(loc: &str) -> Result<(&str, &str), GeolocationError> {
    match loc.split_once(',') {
        Some((lat, lon)) if !lon.contains(',') => Ok((lat.trim(), lon.trim())),
        _ => Err(GeolocationError::Coordinates(loc.to_owned())),
    }
}
