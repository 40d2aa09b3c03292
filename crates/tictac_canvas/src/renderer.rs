//! Full-repaint board renderer.

use crate::geometry::{CELL_SIZE, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::surface::{DrawingSurface, Rgb, SurfaceHandle, TextBaseline};
use crate::types::{Board, Cell};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Local offsets of the divider bars, on both axes.
pub const DIVIDER_OFFSETS: [i32; 2] = [157, 317];
/// Thickness of a divider bar.
pub const DIVIDER_THICKNESS: u32 = 4;
/// Glyph size used for marks.
pub const MARK_FONT_SIZE: u32 = 160;
/// Horizontal inset of a mark from its cell's left edge.
pub const MARK_INSET_X: i32 = 20;
/// Vertical offset of a mark from its cell's top edge.
pub const MARK_OFFSET_Y: i32 = -10;

/// Colors used to paint the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Surface fill.
    background: Rgb,
    /// Divider bars and marks.
    foreground: Rgb,
}

impl Theme {
    /// Creates a theme.
    pub fn new(background: Rgb, foreground: Rgb) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::BLACK)
    }
}

/// Local position at which a cell's mark is drawn.
pub fn mark_origin(row: usize, col: usize) -> (i32, i32) {
    let size = CELL_SIZE as i32;
    (col as i32 * size + MARK_INSET_X, row as i32 * size + MARK_OFFSET_Y)
}

/// Paints a board onto a 480x480 surface.
///
/// Every paint starts from a full background fill, so the result depends
/// only on the board and the theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct BoardRenderer {
    theme: Theme,
}

impl BoardRenderer {
    /// Creates a renderer with the given theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Paints through a surface handle. Returns `false` without drawing
    /// when no surface is attached.
    #[instrument(skip_all, fields(marked = board.marked_count()))]
    pub fn draw<S: DrawingSurface>(&self, handle: &mut SurfaceHandle<S>, board: &Board) -> bool {
        match handle.get_mut() {
            Ok(surface) => {
                self.paint(surface, board);
                true
            }
            Err(e) => {
                debug!(error = %e, "Skipping repaint");
                false
            }
        }
    }

    /// Paints directly onto a surface.
    #[instrument(skip_all)]
    pub fn paint<S: DrawingSurface + ?Sized>(&self, surface: &mut S, board: &Board) {
        surface.set_fill_color(self.theme.background);
        surface.fill_rect(0, 0, SURFACE_WIDTH, SURFACE_HEIGHT);

        surface.set_fill_color(self.theme.foreground);
        for offset in DIVIDER_OFFSETS {
            surface.fill_rect(offset, 0, DIVIDER_THICKNESS, SURFACE_HEIGHT);
        }
        for offset in DIVIDER_OFFSETS {
            surface.fill_rect(0, offset, SURFACE_WIDTH, DIVIDER_THICKNESS);
        }

        surface.set_font_size(MARK_FONT_SIZE);
        surface.set_text_baseline(TextBaseline::Top);

        for (index, cell) in board.cells() {
            if let Cell::Marked(player) = cell {
                let (x, y) = mark_origin(index.row(), index.col());
                trace!(%index, %player, x, y, "Drawing mark");
                surface.fill_text(player.label(), x, y);
            }
        }
    }
}
