use satmap_protocol::GeolocationError;
use std::path::PathBuf;
use url::Url;

/// Every failure the pipeline can produce. Nothing is retried or recovered,
/// the first error aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error(transparent)]
    Propagation(#[from] PropagationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Request to '{url}' failed. {reason}")]
    Request { url: Url, reason: String },

    #[error("Failed to read the response body from '{url}'")]
    Body {
        url: Url,
        #[source]
        source: std::io::Error,
    },

    #[error("No response available for '{0}'")]
    NotFound(Url),

    #[error("Failed to read '{}'", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error("Failed to parse the geolocation response from '{url}'. {source}")]
    Location {
        url: Url,
        #[source]
        source: GeolocationError,
    },

    #[error("Malformed location record. {0}")]
    LocationCoordinates(#[source] GeolocationError),

    #[error("Invalid coordinate '{value}', expected degrees")]
    Coordinate {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Failed to parse the TLE catalog for satellite group '{group}'. {reason}")]
    Catalog { group: String, reason: String },

    #[error("Malformed element set for satellite '{satellite}' in group '{group}'. {reason}")]
    ElementSet {
        group: String,
        satellite: String,
        reason: String,
    },

    #[error("Failed to parse coastline data. {0}")]
    Coastlines(String),

    #[error("Failed to decode basemap imagery")]
    Imagery(#[from] image::ImageError),
}

#[derive(Debug, thiserror::Error)]
pub enum PropagationError {
    #[error("Failed to propagate satellite '{satellite}' in group '{group}'. {reason}")]
    Satellite {
        group: String,
        satellite: String,
        reason: String,
    },

    #[error("Observer latitude {0}° does not lie on the WGS-84 ellipsoid")]
    ObserverLatitude(f64),

    #[error("Observer longitude {0}° is not a finite number")]
    ObserverLongitude(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to save figure to '{}'. {reason}", path.display())]
    Bitmap { path: PathBuf, reason: String },

    #[error("Invalid figure size {width} x {height} in at {dpi} DPI")]
    Size { width: f64, height: f64, dpi: f64 },

    #[error("Failed to display figure")]
    Window(#[from] eframe::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),

    #[error("At least one TLE catalog URL must be configured")]
    NoCatalogs,

    #[error("Unsupported catalog URL '{0}', expected an http, https or file URL")]
    CatalogScheme(Url),

    #[error("Figure DPI must be a positive number, got {0}")]
    Dpi(f64),

    #[error("Timeout must be non-zero")]
    ZeroTimeout,
}
