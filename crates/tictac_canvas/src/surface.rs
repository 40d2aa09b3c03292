//! Drawing surface contract and the handle that injects a surface into the
//! render path.

use crate::error::{BoardError, BoardErrorKind};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("#{:02x}{:02x}{:02x}", r, g, b)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Error parsing a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
#[display("Invalid color {:?}: expected #rrggbb", input)]
pub struct ParseColorError {
    /// The rejected text.
    pub input: String,
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            input: s.to_string(),
        };
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Vertical anchor for text drawn with [`DrawingSurface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextBaseline {
    /// `y` is the top of the em box.
    Top,
    /// `y` is the alphabetic baseline.
    #[default]
    Alphabetic,
}

/// A 2D raster drawing context.
///
/// The board only needs immediate-mode primitives: a current fill color,
/// rectangle fill, and text with a size and baseline.
pub trait DrawingSurface {
    /// Sets the color used by subsequent fills and text.
    fn set_fill_color(&mut self, color: Rgb);

    /// Fills a rectangle in local surface pixels. Parts outside the surface
    /// are clipped.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Sets the glyph size, in pixels per em.
    fn set_font_size(&mut self, size: u32);

    /// Sets how `fill_text` interprets its `y` argument.
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Draws text with its left edge at `x`.
    fn fill_text(&mut self, text: &str, x: i32, y: i32);
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn set_fill_color(&mut self, color: Rgb) {
        (**self).set_fill_color(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        (**self).fill_rect(x, y, width, height);
    }

    fn set_font_size(&mut self, size: u32) {
        (**self).set_font_size(size);
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        (**self).set_text_baseline(baseline);
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32) {
        (**self).fill_text(text, x, y);
    }
}

/// Handle to the mounted drawing surface.
///
/// The host attaches the surface once when it is mounted and passes the
/// handle down to whoever renders. A detached handle means the surface was
/// never mounted or has been lost.
#[derive(Debug, Clone, Default)]
pub struct SurfaceHandle<S> {
    surface: Option<S>,
}

impl<S> SurfaceHandle<S> {
    /// A handle with no surface attached.
    pub fn detached() -> Self {
        Self { surface: None }
    }

    /// A handle with `surface` already attached.
    pub fn attached(surface: S) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// Attaches a surface, returning the one it replaces.
    #[instrument(skip_all)]
    pub fn attach(&mut self, surface: S) -> Option<S> {
        debug!("Surface attached");
        self.surface.replace(surface)
    }

    /// Drops the reference to the surface and returns it.
    #[instrument(skip_all)]
    pub fn detach(&mut self) -> Option<S> {
        debug!("Surface detached");
        self.surface.take()
    }

    /// True if a surface is attached.
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Borrows the attached surface.
    pub fn get(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Borrows the attached surface mutably.
    #[track_caller]
    pub fn get_mut(&mut self) -> Result<&mut S, BoardError> {
        self.surface.as_mut().ok_or_else(|| {
            BoardError::new(
                BoardErrorKind::SurfaceUnavailable,
                "no drawing surface is attached",
            )
        })
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// [`DrawingSurface::set_fill_color`].
    SetFillColor(Rgb),
    /// [`DrawingSurface::fill_rect`].
    FillRect {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Width.
        width: u32,
        /// Height.
        height: u32,
    },
    /// [`DrawingSurface::set_font_size`].
    SetFontSize(u32),
    /// [`DrawingSurface::set_text_baseline`].
    SetTextBaseline(TextBaseline),
    /// [`DrawingSurface::fill_text`].
    FillText {
        /// The drawn string.
        text: String,
        /// Left edge.
        x: i32,
        /// Anchor, per the current baseline.
        y: i32,
    },
}

/// A surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Creates an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forgets all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Texts drawn, with the position they were drawn at.
    pub fn texts(&self) -> Vec<(&str, i32, i32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, x, y } => Some((text.as_str(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Replays every command onto another surface.
    #[instrument(skip_all, fields(commands = self.commands.len()))]
    pub fn replay<S: DrawingSurface + ?Sized>(&self, target: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::SetFillColor(color) => target.set_fill_color(*color),
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                } => target.fill_rect(*x, *y, *width, *height),
                DrawCommand::SetFontSize(size) => target.set_font_size(*size),
                DrawCommand::SetTextBaseline(baseline) => target.set_text_baseline(*baseline),
                DrawCommand::FillText { text, x, y } => target.fill_text(text, *x, *y),
            }
        }
    }
}

impl DrawingSurface for DisplayList {
    fn set_fill_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_font_size(&mut self, size: u32) {
        self.commands.push(DrawCommand::SetFontSize(size));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(DrawCommand::SetTextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}
