//! Figure output: a bitmap file or an interactive window.

use crate::{error::RenderError, figure::Figure};
use std::path::Path;
use tracing::info;

pub mod bitmap;
pub mod window;

/// Resolution used for text and marker sizes given in points
pub const POINTS_PER_INCH: f64 = 72.0;

/// Write `figure` to `path`, the image format follows the file extension.
/// The image is `figure` inches times `dpi` pixels in size.
pub fn save_figure<P: AsRef<Path>>(figure: &Figure, path: P, dpi: f64) -> Result<(), RenderError> {
    let path = path.as_ref();
    let (w, h) = figure.pixel_size(dpi);
    info!(path = %path.display(), width = w, height = h, "Saving figure");
    bitmap::render(figure, path, dpi)
}

/// Show `figure` in a window, blocks until the window is closed
pub fn show_figure(figure: Figure) -> Result<(), RenderError> {
    info!("Displaying figure");
    window::show(figure)
}
