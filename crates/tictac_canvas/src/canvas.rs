//! Software raster surface.
//!
//! Pixels are stored row-major. Text uses built-in stroke glyphs for the
//! two mark letters; any other character takes up an advance but draws no
//! ink.

use crate::surface::{DrawingSurface, Rgb, TextBaseline};
use tracing::{instrument, trace};

/// Default glyph size, in pixels per em.
pub const DEFAULT_FONT_SIZE: u32 = 10;

/// An in-memory RGB framebuffer implementing [`DrawingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    fill: Rgb,
    font_size: u32,
    baseline: TextBaseline,
}

impl PixelCanvas {
    /// Creates a canvas with every pixel black and drawing state at its
    /// defaults: black fill, 10px glyphs, alphabetic baseline.
    #[instrument]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
            fill: Rgb::BLACK,
            font_size: DEFAULT_FONT_SIZE,
            baseline: TextBaseline::default(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at (x, y), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Number of pixels of exactly `color`.
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Current glyph size.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Current text baseline.
    pub fn text_baseline(&self) -> TextBaseline {
        self.baseline
    }

    fn put(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = self.fill;
    }

    fn draw_glyph(&mut self, ch: char, left: i64, em_top: i64) {
        let size = i64::from(self.font_size);
        let metrics = GlyphBox::new(left, em_top, size);
        let stroke = (size / 10).max(1) as f64;

        let paint: fn(&GlyphBox, f64, f64, f64) -> bool = match ch {
            'X' | 'x' => ink_cross,
            'O' | 'o' => ink_ring,
            _ => {
                trace!(%ch, "No glyph, advancing");
                return;
            }
        };

        // Ink outside the canvas is never visible
        let (x0, x1) = (metrics.left.max(0), metrics.right.min(i64::from(self.width)));
        let (y0, y1) = (metrics.top.max(0), metrics.bottom.min(i64::from(self.height)));
        for py in y0..y1 {
            for px in x0..x1 {
                if paint(&metrics, px as f64 + 0.5, py as f64 + 0.5, stroke) {
                    self.put(px, py);
                }
            }
        }
    }
}

/// Horizontal advance of one glyph.
pub fn advance(size: u32) -> u32 {
    scale(size, 3, 4)
}

/// Distance from the alphabetic baseline up to the em box top.
pub fn ascent(size: u32) -> u32 {
    scale(size, 4, 5)
}

/// `size * num / den` for `num <= den`, computed without overflow.
fn scale(size: u32, num: u64, den: u64) -> u32 {
    // Never larger than `size`
    (u64::from(size) * num / den) as u32
}

/// The ink rectangle of a glyph inside its em box.
struct GlyphBox {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl GlyphBox {
    fn new(x: i64, em_top: i64, size: i64) -> Self {
        let advance = size * 3 / 4;
        let side = size / 16;
        Self {
            left: x + side,
            top: em_top + size / 8,
            right: x + advance - side,
            bottom: em_top + size * 7 / 8,
        }
    }

    fn width(&self) -> f64 {
        (self.right - self.left) as f64
    }

    fn height(&self) -> f64 {
        (self.bottom - self.top) as f64
    }
}

fn ink_cross(g: &GlyphBox, x: f64, y: f64, stroke: f64) -> bool {
    let (w, h) = (g.width(), g.height());
    let len = (w * w + h * h).sqrt();
    let (dx, dy) = (x - g.left as f64, y - g.top as f64);
    // Top-left to bottom-right, then top-right to bottom-left.
    let falling = (w * dy - h * dx).abs() / len;
    let rising = (w * dy - h * (w - dx)).abs() / len;
    falling.min(rising) <= stroke / 2.0
}

fn ink_ring(g: &GlyphBox, x: f64, y: f64, stroke: f64) -> bool {
    let (rx, ry) = (g.width() / 2.0, g.height() / 2.0);
    let (cx, cy) = (g.left as f64 + rx, g.top as f64 + ry);
    let (dx, dy) = (x - cx, y - cy);
    let outer = (dx / rx).powi(2) + (dy / ry).powi(2);
    if outer > 1.0 {
        return false;
    }
    let (irx, iry) = (rx - stroke, ry - stroke);
    if irx <= 0.0 || iry <= 0.0 {
        return true;
    }
    (dx / irx).powi(2) + (dy / iry).powi(2) > 1.0
}

impl DrawingSurface for PixelCanvas {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize;
        for row in y0 as usize..y1 as usize {
            let start = row * stride;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(self.fill);
        }
    }

    fn set_font_size(&mut self, size: u32) {
        self.font_size = size;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32) {
        let em_top = match self.baseline {
            TextBaseline::Top => i64::from(y),
            TextBaseline::Alphabetic => i64::from(y) - i64::from(ascent(self.font_size)),
        };
        let step = i64::from(advance(self.font_size));
        let mut left = i64::from(x);
        for ch in text.chars() {
            self.draw_glyph(ch, left, em_top);
            left += step;
        }
    }
}
