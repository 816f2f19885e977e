use crate::{
    error::{Error, ParseFailure},
    fetch::Fetch,
};
use satmap_types::prelude::*;
use tracing::info;
use url::Url;

/// Resolve the caller's location from their public IP address.
///
/// A single GET to `endpoint`, no retry and no fallback location.
pub fn resolve_location<F: Fetch + ?Sized>(
    fetch: &F,
    endpoint: &Url,
) -> Result<LocationRecord, Error> {
    info!("Extracting location data based on IP address...");
    let body = fetch.fetch_text(endpoint)?;
    let location =
        satmap_protocol::parse_location(&body).map_err(|source| ParseFailure::Location {
            url: endpoint.clone(),
            source,
        })?;
    info!("Location determined to be: {location}");
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::NetworkError, fetch::StaticFetcher};

    fn endpoint() -> Url {
        Url::parse("http://ipinfo.io/json").unwrap()
    }

    #[test]
    fn resolves_location() {
        let f = StaticFetcher::new().with(
            endpoint(),
            r#"{"ip": "192.0.2.1", "city": "Quito", "region": "Pichincha", "loc": "-0.2299,-78.5249"}"#,
        );
        let loc = resolve_location(&f, &endpoint()).unwrap();
        assert_eq!(loc.to_string(), "Quito, Pichincha");
        assert_eq!(loc.loc, "-0.2299,-78.5249");
    }

    #[test]
    fn missing_fields_are_a_parse_error() {
        let f = StaticFetcher::new().with(endpoint(), r#"{"city": "Quito"}"#);
        assert!(matches!(
            resolve_location(&f, &endpoint()),
            Err(Error::Parse(ParseFailure::Location { .. }))
        ));
    }

    #[test]
    fn unreachable_endpoint_is_a_network_error() {
        let f = StaticFetcher::new();
        assert!(matches!(
            resolve_location(&f, &endpoint()),
            Err(Error::Network(NetworkError::NotFound(_)))
        ));
    }
}
