//! Pipeline configuration, loaded from an optional TOML file.
//!
//! Every key is optional, missing keys take the built-in defaults:
//!
//! ```toml
//! geolocation-url = "http://ipinfo.io/json"
//! catalogs = ["https://www.celestrak.com/NORAD/elements/gps-ops.txt"]
//! dpi = 150.0
//! timeout = "30s"
//!
//! [basemap]
//! coastlines = "ne_110m_coastline.geojson"
//! imagery = "https://eoimages.gsfc.nasa.gov/images/imagerecords/57000/57752/land_shallow_topo_2048.jpg"
//! ```

use crate::{error::ConfigError, fetch::SUPPORTED_SCHEMES};
use serde::{Deserialize, Deserializer};
use std::{fs, path::Path, time::Duration};
use tracing::info;
use url::Url;

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ipinfo.io/json";

pub const DEFAULT_CATALOG_URLS: &[&str] = &[
    "https://www.celestrak.com/NORAD/elements/gps-ops.txt",
    "https://www.celestrak.com/NORAD/elements/glo-ops.txt",
    "https://www.celestrak.com/NORAD/elements/galileo.txt",
    "https://www.celestrak.com/NORAD/elements/beidou.txt",
    "https://www.celestrak.com/NORAD/elements/sbas.txt",
];

pub const DEFAULT_COASTLINES: &str = "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_coastline.geojson";

pub const DEFAULT_IMAGERY: &str =
    "https://eoimages.gsfc.nasa.gov/images/imagerecords/57000/57752/land_shallow_topo_2048.jpg";

pub const DEFAULT_DPI: f64 = 150.0;

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub geolocation_url: Url,
    #[serde(alias = "catalog")]
    pub catalogs: Vec<Url>,
    pub dpi: f64,
    /// Per-request timeout, humantime syntax (e.g. "30s"). No timeout when absent.
    #[serde(deserialize_with = "humantime_opt")]
    pub timeout: Option<Duration>,
    pub basemap: BasemapConfig,
}

/// Basemap sources for the ground track view. Each is either an http(s) URL
/// or a local file path. A missing entry leaves that layer out.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BasemapConfig {
    pub coastlines: Option<String>,
    pub imagery: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geolocation_url: parse_builtin_url(DEFAULT_GEOLOCATION_URL),
            catalogs: DEFAULT_CATALOG_URLS
                .iter()
                .map(|u| parse_builtin_url(u))
                .collect(),
            dpi: DEFAULT_DPI,
            timeout: None,
            basemap: BasemapConfig::default(),
        }
    }
}

impl Default for BasemapConfig {
    fn default() -> Self {
        Self {
            coastlines: Some(DEFAULT_COASTLINES.to_owned()),
            imagery: Some(DEFAULT_IMAGERY.to_owned()),
        }
    }
}

impl Config {
    /// Use the built-in defaults when no config file is given
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(config = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        if cfg.catalogs.is_empty() {
            return Err(ConfigError::NoCatalogs);
        }

        if let Some(url) = cfg
            .catalogs
            .iter()
            .find(|u| !SUPPORTED_SCHEMES.contains(&u.scheme()))
        {
            return Err(ConfigError::CatalogScheme(url.clone()));
        }

        if !(cfg.dpi.is_finite() && cfg.dpi > 0.0) {
            return Err(ConfigError::Dpi(cfg.dpi));
        }

        if cfg.timeout.map(|t| t.is_zero()).unwrap_or(false) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(cfg)
    }
}

/// The built-in URL constants are known to be well formed
fn parse_builtin_url(s: &str) -> Url {
    match Url::parse(s) {
        Ok(u) => u,
        Err(e) => unreachable!("Built-in URL '{s}' is malformed. {e}"),
    }
}

fn humantime_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}
