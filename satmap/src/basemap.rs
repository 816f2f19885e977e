//! World imagery and coastlines drawn beneath the ground tracks.

use crate::{
    config::BasemapConfig,
    error::{Error, NetworkError, ParseFailure},
    fetch::Fetch,
    figure::Raster,
    miller,
    units::Angle,
};
use std::{fs, io::Cursor, path::PathBuf};
use tracing::info;
use url::Url;

/// Largest reprojected raster width [px]
pub const MAX_RASTER_WIDTH: usize = 2048;

/// An equirectangular (plate carrée) image of the whole Earth
#[derive(Clone, PartialEq, Debug)]
pub struct EarthImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl EarthImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let mut reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        reader.no_limits();
        let img = reader.decode()?.to_rgb8();
        Ok(Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| p.0).collect(),
        })
    }

    /// Nearest pixel at a geodetic position
    pub fn sample(&self, longitude: Angle, latitude: Angle) -> [u8; 3] {
        if self.pixels.is_empty() {
            return [0, 0, 0];
        }
        let (w, h) = (self.width as f64, self.height as f64);
        let u = (longitude.as_degrees() + 180.0).rem_euclid(360.0) / 360.0;
        let v = (90.0 - latitude.as_degrees()).clamp(0.0, 180.0) / 180.0;
        let col = ((u * w) as usize).min(self.width as usize - 1);
        let row = ((v * h) as usize).min(self.height as usize - 1);
        self.pixels[row * self.width as usize + col]
    }

    /// Resample into Miller projected space covering the whole globe
    pub fn to_miller_raster(&self, alpha: f64) -> Raster {
        let bounds = miller::world_bounds();
        let width = (self.width as usize).clamp(1, MAX_RASTER_WIDTH);
        let height = ((width as f64 * bounds.height() / bounds.width()).round() as usize).max(1);
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            let y = bounds.y_max - (row as f64 + 0.5) / height as f64 * bounds.height();
            for col in 0..width {
                let x = bounds.x_min + (col as f64 + 0.5) / width as f64 * bounds.width();
                let (lon, lat) = miller::unproject(x, y);
                pixels.push(self.sample(lon, lat));
            }
        }
        Raster {
            width,
            height,
            pixels,
            bounds,
            alpha,
        }
    }
}

/// Background layers for the ground track view. The default is empty.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Basemap {
    pub imagery: Option<EarthImage>,
    /// Polylines of (longitude, latitude) [deg]
    pub coastlines: Vec<Vec<(f64, f64)>>,
}

/// Where a basemap layer comes from
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Source {
    Url(Url),
    Path(PathBuf),
}

impl Source {
    /// http(s) URLs are fetched, anything else is a local file path
    pub fn parse(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Url(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(p) => Source::Path(p),
                Err(()) => Source::Path(PathBuf::from(s)),
            },
            _ => Source::Path(PathBuf::from(s)),
        }
    }

    fn read<F: Fetch + ?Sized>(&self, fetch: &F) -> Result<Vec<u8>, NetworkError> {
        match self {
            Source::Url(url) => fetch.fetch_bytes(url),
            Source::Path(path) => fs::read(path).map_err(|source| NetworkError::File {
                path: path.clone(),
                source,
            }),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(u) => write!(f, "{u}"),
            Source::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Natural Earth style GeoJSON: every `LineString` and `MultiLineString`
/// feature becomes one or more polylines
pub fn parse_coastlines(json: &str) -> Result<Vec<Vec<(f64, f64)>>, ParseFailure> {
    let v: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ParseFailure::Coastlines(e.to_string()))?;
    let features = v["features"]
        .as_array()
        .ok_or_else(|| ParseFailure::Coastlines("no features".to_owned()))?;
    let mut polylines = Vec::new();
    for feat in features {
        let geom = &feat["geometry"];
        match geom["type"].as_str() {
            Some("LineString") => polylines.extend(coord_line(&geom["coordinates"])),
            Some("MultiLineString") => {
                if let Some(lines) = geom["coordinates"].as_array() {
                    polylines.extend(lines.iter().filter_map(coord_line));
                }
            }
            _ => {}
        }
    }
    Ok(polylines)
}

fn coord_line(arr: &serde_json::Value) -> Option<Vec<(f64, f64)>> {
    let coords: Vec<(f64, f64)> = arr
        .as_array()?
        .iter()
        .filter_map(|p| {
            let a = p.as_array()?;
            Some((a.first()?.as_f64()?, a.get(1)?.as_f64()?))
        })
        .collect();
    if coords.len() < 2 {
        None
    } else {
        Some(coords)
    }
}

pub fn load_basemap<F: Fetch + ?Sized>(fetch: &F, cfg: &BasemapConfig) -> Result<Basemap, Error> {
    let mut basemap = Basemap::default();

    if let Some(src) = cfg.coastlines.as_deref().map(Source::parse) {
        info!("Reading coastlines from {src}");
        let bytes = src.read(fetch)?;
        let text = String::from_utf8_lossy(&bytes);
        basemap.coastlines = parse_coastlines(&text)?;
    }

    if let Some(src) = cfg.imagery.as_deref().map(Source::parse) {
        info!("Reading world imagery from {src}");
        let bytes = src.read(fetch)?;
        basemap.imagery = Some(EarthImage::from_bytes(&bytes).map_err(ParseFailure::Imagery)?);
    }

    Ok(basemap)
}
