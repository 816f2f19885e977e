//! Renderer-neutral chart description.
//!
//! The polar and ground track views build a [`Figure`] in data coordinates,
//! the backends in [`crate::render`] turn it into pixels or a window.

use derive_more::Display;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Display)]
#[display(fmt = "#{:02x}{:02x}{:02x}", "r", "g", "b")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(176, 176, 176);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From channel intensities in [0, 1]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(c(r), c(g), c(b))
    }

    /// Alpha-composite over `background`
    pub fn blend_over(self, background: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |f: u8, b: u8| (f as f64 * a + b as f64 * (1.0 - a)).round() as u8;
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

/// Axis aligned rectangle in data coordinates
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Marker {
    Plus,
}

/// Which corner or edge of a text label sits on its position
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Anchor {
    LeftBottom,
    Center,
}

/// RGB raster covering `bounds`, row 0 at `y_max`
#[derive(Clone, PartialEq, Debug)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 3]>,
    pub bounds: Bounds,
    pub alpha: f64,
}

impl Raster {
    /// Nearest pixel at a data coordinate, if it falls within the raster
    pub fn sample(&self, (x, y): (f64, f64)) -> Option<[u8; 3]> {
        if !self.bounds.contains((x, y)) || self.width == 0 || self.height == 0 {
            return None;
        }
        let col = ((x - self.bounds.x_min) / self.bounds.width() * self.width as f64) as usize;
        let row = ((self.bounds.y_max - y) / self.bounds.height() * self.height as f64) as usize;
        self.pixels
            .get(row.min(self.height - 1) * self.width + col.min(self.width - 1))
            .copied()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Layer {
    Raster(Raster),
    /// Region between an x-monotone curve and the horizontal line `y = baseline`
    Area {
        curve: Vec<(f64, f64)>,
        baseline: f64,
        fill: Rgb,
        alpha: f64,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        color: Rgb,
        /// [pt]
        width: f64,
    },
    Scatter {
        points: Vec<(f64, f64)>,
        color: Rgb,
        marker: Marker,
        /// Marker size [pt]
        size: f64,
        /// Legend label
        label: Option<String>,
    },
    Annotation {
        position: (f64, f64),
        text: String,
        color: Rgb,
        anchor: Anchor,
        /// [pt]
        font_size: f64,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub marker: Marker,
}

/// A complete chart: drawn bottom to top in layer order
#[derive(Clone, PartialEq, Debug)]
pub struct Figure {
    /// [in]
    pub width: f64,
    /// [in]
    pub height: f64,
    pub title: Option<String>,
    /// Visible data region, mapped with equal x and y scale
    pub bounds: Bounds,
    pub layers: Vec<Layer>,
    pub legend: Vec<LegendEntry>,
}

impl Figure {
    pub fn new(width: f64, height: f64, bounds: Bounds) -> Self {
        Self {
            width,
            height,
            title: None,
            bounds,
            layers: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = Some(title.into());
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Pixel dimensions at the given resolution
    pub fn pixel_size(&self, dpi: f64) -> (u32, u32) {
        (
            (self.width * dpi).round() as u32,
            (self.height * dpi).round() as u32,
        )
    }

    pub fn scatter_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(|l| matches!(l, Layer::Scatter { .. }))
    }

    pub fn annotations(&self) -> impl Iterator<Item = (&(f64, f64), &str)> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Annotation { position, text, .. } => Some((position, text.as_str())),
            _ => None,
        })
    }
}
