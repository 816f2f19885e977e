use super::POINTS_PER_INCH;
use crate::{
    error::RenderError,
    figure::{Anchor, Bounds, Figure, Layer, LegendEntry, Marker, Raster, Rgb},
};
use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::path::Path;

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type DrawResult =
    Result<(), DrawingAreaErrorKind<<BitMapBackend<'static> as DrawingBackend>::ErrorType>>;

const FONT_FAMILY: &str = "sans-serif";
const TITLE_FONT_SIZE: f64 = 14.0;
const TITLE_BAND: f64 = 0.08;
const MARGIN: f64 = 0.05;
const LEGEND_FONT_SIZE: f64 = 10.0;

/// Data to pixel mapping with equal x and y scale, centred in the plot area
#[derive(Copy, Clone, Debug)]
pub(crate) struct Transform {
    bounds: Bounds,
    scale: f64,
    origin: (f64, f64),
}

impl Transform {
    pub(crate) fn fit(bounds: Bounds, area: (f64, f64, f64, f64)) -> Self {
        let (x0, y0, w, h) = area;
        let scale = (w / bounds.width()).min(h / bounds.height());
        let origin = (
            x0 + (w - bounds.width() * scale) / 2.0,
            y0 + (h - bounds.height() * scale) / 2.0,
        );
        Self {
            bounds,
            scale,
            origin,
        }
    }

    pub(crate) fn to_px(&self, (x, y): (f64, f64)) -> (i32, i32) {
        (
            (self.origin.0 + (x - self.bounds.x_min) * self.scale).round() as i32,
            (self.origin.1 + (self.bounds.y_max - y) * self.scale).round() as i32,
        )
    }

    pub(crate) fn to_data(&self, (px, py): (i32, i32)) -> (f64, f64) {
        (
            self.bounds.x_min + (px as f64 + 0.5 - self.origin.0) / self.scale,
            self.bounds.y_max - (py as f64 + 0.5 - self.origin.1) / self.scale,
        )
    }

    /// Pixel rectangle covered by `bounds`, (x_min, y_min, x_max, y_max)
    fn pixel_rect(&self, bounds: &Bounds) -> (i32, i32, i32, i32) {
        let (x0, y0) = self.to_px((bounds.x_min, bounds.y_max));
        let (x1, y1) = self.to_px((bounds.x_max, bounds.y_min));
        (x0, y0, x1, y1)
    }
}

fn color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn bitmap_err<E: std::fmt::Display>(path: &Path, e: E) -> RenderError {
    RenderError::Bitmap {
        path: path.to_owned(),
        reason: e.to_string(),
    }
}

pub(crate) fn render(fig: &Figure, path: &Path, dpi: f64) -> Result<(), RenderError> {
    let (w, h) = fig.pixel_size(dpi);
    if w == 0 || h == 0 || !dpi.is_finite() {
        return Err(RenderError::Size {
            width: fig.width,
            height: fig.height,
            dpi,
        });
    }
    let pt = dpi / POINTS_PER_INCH;

    let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| bitmap_err(path, e))?;

    let (w, h) = (w as f64, h as f64);
    let top = if fig.title.is_some() { TITLE_BAND * h } else { 0.0 };
    let plot_area = (
        MARGIN * w,
        top + MARGIN * h,
        (1.0 - 2.0 * MARGIN) * w,
        h - top - 2.0 * MARGIN * h,
    );
    let t = Transform::fit(fig.bounds, plot_area);

    for layer in fig.layers.iter() {
        draw_layer(&root, &t, layer, pt).map_err(|e| bitmap_err(path, e))?;
    }

    if let Some(title) = fig.title.as_deref() {
        let style = (FONT_FAMILY, TITLE_FONT_SIZE * pt)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            title.to_owned(),
            ((w / 2.0) as i32, (top / 2.0) as i32),
            style,
        ))
        .map_err(|e| bitmap_err(path, e))?;
    }

    if !fig.legend.is_empty() {
        draw_legend(&root, &fig.legend, (w, top), pt).map_err(|e| bitmap_err(path, e))?;
    }

    root.present().map_err(|e| bitmap_err(path, e))
}

fn draw_layer(
    root: &Canvas<'_>,
    t: &Transform,
    layer: &Layer,
    pt: f64,
) -> DrawResult {
    match layer {
        Layer::Raster(r) => draw_raster(root, t, r)?,
        Layer::Area {
            curve,
            baseline,
            fill,
            alpha,
        } => {
            let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
                return Ok(());
            };
            let mut pts: Vec<(i32, i32)> = curve.iter().map(|p| t.to_px(*p)).collect();
            pts.push(t.to_px((last.0, *baseline)));
            pts.push(t.to_px((first.0, *baseline)));
            root.draw(&Polygon::new(pts, color(*fill).mix(*alpha).filled()))?;
        }
        Layer::Polyline {
            points,
            color: c,
            width,
        } => {
            let pts: Vec<(i32, i32)> = points.iter().map(|p| t.to_px(*p)).collect();
            let stroke = ((width * pt).round() as u32).max(1);
            root.draw(&PathElement::new(pts, color(*c).stroke_width(stroke)))?;
        }
        Layer::Scatter {
            points,
            color: c,
            marker,
            size,
            ..
        } => {
            for p in points.iter() {
                draw_marker(root, t.to_px(*p), *marker, *c, size * pt)?;
            }
        }
        Layer::Annotation {
            position,
            text,
            color: c,
            anchor,
            font_size,
        } => {
            let pos = match anchor {
                Anchor::LeftBottom => Pos::new(HPos::Left, VPos::Bottom),
                Anchor::Center => Pos::new(HPos::Center, VPos::Center),
            };
            let style = (FONT_FAMILY, font_size * pt)
                .into_font()
                .color(&color(*c))
                .pos(pos);
            root.draw(&Text::new(text.clone(), t.to_px(*position), style))?;
        }
    }
    Ok(())
}

fn draw_marker(
    root: &Canvas<'_>,
    (x, y): (i32, i32),
    marker: Marker,
    c: Rgb,
    size_px: f64,
) -> DrawResult {
    let half = (size_px / 2.0).round().max(1.0) as i32;
    let style = color(c).stroke_width(((size_px / 6.0).round() as u32).max(1));
    match marker {
        Marker::Plus => {
            root.draw(&PathElement::new(vec![(x - half, y), (x + half, y)], style))?;
            root.draw(&PathElement::new(vec![(x, y - half), (x, y + half)], style))?;
        }
    }
    Ok(())
}

/// Nearest-neighbour resampling, composited over the white background
fn draw_raster(
    root: &Canvas<'_>,
    t: &Transform,
    raster: &Raster,
) -> DrawResult {
    let (x0, y0, x1, y1) = t.pixel_rect(&raster.bounds);
    let (w, h) = root.dim_in_pixel();
    for py in y0.max(0)..y1.min(h as i32) {
        for px in x0.max(0)..x1.min(w as i32) {
            if let Some([r, g, b]) = raster.sample(t.to_data((px, py))) {
                let c = Rgb::new(r, g, b).blend_over(Rgb::WHITE, raster.alpha);
                root.draw_pixel((px, py), &color(c))?;
            }
        }
    }
    Ok(())
}

/// Upper right corner, below the title
fn draw_legend(
    root: &Canvas<'_>,
    entries: &[LegendEntry],
    (w, top): (f64, f64),
    pt: f64,
) -> DrawResult {
    let line_h = LEGEND_FONT_SIZE * pt * 1.6;
    let max_chars = entries.iter().map(|e| e.label.len()).max().unwrap_or(0) as f64;
    let box_w = line_h * 1.5 + max_chars * LEGEND_FONT_SIZE * pt * 0.65;
    let box_h = line_h * (entries.len() as f64 + 0.5);
    let x0 = w * (1.0 - MARGIN) - box_w;
    let y0 = top + line_h * 0.5;

    root.draw(&Rectangle::new(
        [(x0 as i32, y0 as i32), ((x0 + box_w) as i32, (y0 + box_h) as i32)],
        WHITE.mix(0.8).filled(),
    ))?;
    root.draw(&Rectangle::new(
        [(x0 as i32, y0 as i32), ((x0 + box_w) as i32, (y0 + box_h) as i32)],
        RGBColor(204, 204, 204).stroke_width(1),
    ))?;

    for (i, e) in entries.iter().enumerate() {
        let cy = y0 + line_h * (i as f64 + 0.75);
        let marker_x = x0 + line_h * 0.75;
        draw_marker(
            root,
            (marker_x as i32, cy as i32),
            e.marker,
            e.color,
            LEGEND_FONT_SIZE * pt * 0.8,
        )?;
        let style = (FONT_FAMILY, LEGEND_FONT_SIZE * pt)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(
            e.label.clone(),
            ((x0 + line_h * 1.5) as i32, cy as i32),
            style,
        ))?;
    }
    Ok(())
}
