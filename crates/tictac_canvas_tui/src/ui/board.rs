//! Blits the board's pixel surface into the terminal.

use crate::config::TerminalScale;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use tictac_canvas::{PixelCanvas, Rgb};

/// Upper half block: foreground paints the top half, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Widget that shows a [`PixelCanvas`] with two pixel blocks per terminal
/// cell.
///
/// Each block shows the first pixel in it that differs from the
/// background, so bars thinner than a block stay visible.
pub struct SurfaceView<'a> {
    canvas: &'a PixelCanvas,
    scale: TerminalScale,
    background: Rgb,
}

impl<'a> SurfaceView<'a> {
    /// Creates a view of `canvas`.
    pub fn new(canvas: &'a PixelCanvas, scale: TerminalScale, background: Rgb) -> Self {
        Self {
            canvas,
            scale,
            background,
        }
    }

    /// Representative color for the pixel block `[x0, x1) x [y0, y1)`.
    fn sample(&self, x0: u32, x1: u32, y0: u32, y1: u32) -> Rgb {
        let x1 = x1.min(self.canvas.width());
        let y1 = y1.min(self.canvas.height());
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter_map(|(x, y)| self.canvas.pixel(x, y))
            .find(|&p| p != self.background)
            .unwrap_or(self.background)
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.scale.surface_cells();
        let (w, h) = (*self.scale.cell_width(), *self.scale.cell_height());
        let half = h / 2;

        for ty in 0..rows.min(area.height) {
            for tx in 0..cols.min(area.width) {
                let x0 = u32::from(tx) * w;
                let y0 = u32::from(ty) * h;
                let upper = self.sample(x0, x0 + w, y0, y0 + half);
                let lower = self.sample(x0, x0 + w, y0 + half, y0 + h);

                if let Some(cell) = buf.cell_mut((area.x + tx, area.y + ty)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(color(upper))
                        .set_bg(color(lower));
                }
            }
        }
    }
}
