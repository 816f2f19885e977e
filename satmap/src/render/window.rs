use crate::{
    error::RenderError,
    figure::{Anchor, Figure, Layer, Marker, Rgb},
};
use eframe::egui::{self, Align2, Color32, RichText, Stroke, TextureHandle, TextureOptions};
use egui_plot::{
    Legend, Line, MarkerShape, Plot, PlotImage, PlotPoint, PlotPoints, PlotUi, Points, Polygon,
    Text,
};
use std::collections::HashMap;

/// Screen resolution used to size the window from the figure's inches
const WINDOW_DPI: f32 = 80.0;

/// Logical pixels per typographic point
const PX_PER_PT: f32 = 1.3;

pub(crate) fn show(figure: Figure) -> Result<(), RenderError> {
    let title = figure
        .title
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                figure.width as f32 * WINDOW_DPI,
                figure.height as f32 * WINDOW_DPI,
            ])
            .with_title(title.clone()),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(FigureApp::new(figure)))),
    )?;
    Ok(())
}

struct FigureApp {
    figure: Figure,
    /// Raster textures, by layer index
    textures: HashMap<usize, TextureHandle>,
}

impl FigureApp {
    fn new(figure: Figure) -> Self {
        Self {
            figure,
            textures: HashMap::new(),
        }
    }

    fn load_textures(&mut self, ctx: &egui::Context) {
        for (idx, layer) in self.figure.layers.iter().enumerate() {
            if let Layer::Raster(r) = layer {
                self.textures.entry(idx).or_insert_with(|| {
                    let bytes: Vec<u8> = r.pixels.iter().flatten().copied().collect();
                    ctx.load_texture(
                        format!("satmap_raster_{idx}"),
                        egui::ColorImage::from_rgb([r.width, r.height], &bytes),
                        TextureOptions::LINEAR,
                    )
                });
            }
        }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());
        self.load_textures(ctx);

        if let Some(title) = self.figure.title.as_deref() {
            egui::TopBottomPanel::top("satmap_title").show(ctx, |ui| {
                ui.vertical_centered(|ui| ui.heading(title));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let b = self.figure.bounds;
            let plot = Plot::new("satmap_figure")
                .data_aspect(1.0)
                .show_axes(false)
                .show_grid(false)
                .include_x(b.x_min)
                .include_x(b.x_max)
                .include_y(b.y_min)
                .include_y(b.y_max);
            let plot = if self.figure.legend.is_empty() {
                plot
            } else {
                plot.legend(Legend::default())
            };

            let figure = &self.figure;
            let textures = &self.textures;
            plot.show(ui, |plot_ui| {
                for (idx, layer) in figure.layers.iter().enumerate() {
                    draw_layer(plot_ui, layer, textures.get(&idx));
                }
            });
        });
    }
}

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

fn color32_alpha(c: Rgb, alpha: f64) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn draw_layer(plot_ui: &mut PlotUi, layer: &Layer, texture: Option<&TextureHandle>) {
    match layer {
        Layer::Raster(r) => {
            if let Some(tex) = texture {
                let b = &r.bounds;
                plot_ui.image(
                    PlotImage::new(
                        "",
                        tex.id(),
                        PlotPoint::new((b.x_min + b.x_max) / 2.0, (b.y_min + b.y_max) / 2.0),
                        egui::vec2(b.width() as f32, b.height() as f32),
                    )
                    .tint(Color32::from_white_alpha((r.alpha * 255.0).round() as u8)),
                );
            }
        }
        Layer::Area {
            curve,
            baseline,
            fill,
            alpha,
        } => {
            // egui only fills convex polygons, split into vertical strips
            for w in curve.windows(2) {
                let (a, b) = (w[0], w[1]);
                plot_ui.polygon(
                    Polygon::new(
                        "",
                        PlotPoints::new(vec![
                            [a.0, a.1],
                            [b.0, b.1],
                            [b.0, *baseline],
                            [a.0, *baseline],
                        ]),
                    )
                    .fill_color(color32_alpha(*fill, *alpha))
                    .stroke(Stroke::NONE),
                );
            }
        }
        Layer::Polyline {
            points,
            color,
            width,
        } => {
            let pts: Vec<[f64; 2]> = points.iter().map(|(x, y)| [*x, *y]).collect();
            plot_ui.line(
                Line::new("", PlotPoints::new(pts))
                    .color(color32(*color))
                    .width(*width as f32),
            );
        }
        Layer::Scatter {
            points,
            color,
            marker,
            size,
            label,
        } => {
            let pts: Vec<[f64; 2]> = points.iter().map(|(x, y)| [*x, *y]).collect();
            let shape = match marker {
                Marker::Plus => MarkerShape::Plus,
            };
            plot_ui.points(
                Points::new(label.clone().unwrap_or_default(), PlotPoints::new(pts))
                    .shape(shape)
                    .radius(*size as f32 * PX_PER_PT / 2.0)
                    .color(color32(*color)),
            );
        }
        Layer::Annotation {
            position,
            text,
            color,
            anchor,
            font_size,
        } => {
            let anchor = match anchor {
                Anchor::LeftBottom => Align2::LEFT_BOTTOM,
                Anchor::Center => Align2::CENTER_CENTER,
            };
            plot_ui.text(
                Text::new(
                    "",
                    PlotPoint::new(position.0, position.1),
                    RichText::new(text).size(*font_size as f32 * PX_PER_PT),
                )
                .color(color32(*color))
                .anchor(anchor),
            );
        }
    }
}
