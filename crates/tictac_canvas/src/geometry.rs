//! Pointer-to-cell coordinate mapping.
//!
//! Screen coordinates are whatever the host reports for the pointer; the
//! surface origin is the screen position of the surface's top-left corner.
//! Subtracting one from the other gives local surface pixels, which divide
//! evenly into 160px cells.

use crate::error::BoardError;
use crate::types::CellIndex;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Surface width in pixels.
pub const SURFACE_WIDTH: u32 = 480;
/// Surface height in pixels.
pub const SURFACE_HEIGHT: u32 = 480;
/// Cell pitch in pixels.
pub const CELL_SIZE: u32 = 160;

/// Last known screen coordinates of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    /// Horizontal screen coordinate.
    pub x: f64,
    /// Vertical screen coordinate.
    pub y: f64,
}

impl PointerPosition {
    /// Creates a pointer position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen-space placement of the drawing surface, measured once at mount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    /// Screen x of the surface's left edge.
    pub left: f64,
    /// Screen y of the surface's top edge.
    pub top: f64,
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
}

impl SurfaceGeometry {
    /// Geometry of a standard 480x480 board surface at the given origin.
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            width: f64::from(SURFACE_WIDTH),
            height: f64::from(SURFACE_HEIGHT),
        }
    }

    /// Converts a screen position into local surface coordinates.
    pub fn to_local(&self, pointer: PointerPosition) -> (f64, f64) {
        (pointer.x - self.left, pointer.y - self.top)
    }

    /// Maps a pointer to the board cell beneath it.
    #[instrument(level = "trace")]
    pub fn cell_at(&self, pointer: PointerPosition) -> Result<CellIndex, BoardError> {
        map_pointer(pointer, *self)
    }
}

/// Maps a screen pointer to a board cell.
///
/// The result is valid only when the local point lies in
/// `0 <= x < width` and `0 <= y < height`. Anything else, including
/// non-finite coordinates, is `OutOfBounds`.
#[instrument(
    level = "debug",
    fields(px = pointer.x, py = pointer.y, ox = geometry.left, oy = geometry.top)
)]
pub fn map_pointer(
    pointer: PointerPosition,
    geometry: SurfaceGeometry,
) -> Result<CellIndex, BoardError> {
    let (lx, ly) = geometry.to_local(pointer);

    let inside = (0.0..geometry.width).contains(&lx) && (0.0..geometry.height).contains(&ly);
    if !inside {
        return Err(BoardError::out_of_bounds(format!(
            "local point ({lx}, {ly}) is outside the {}x{} surface",
            geometry.width, geometry.height
        )));
    }

    let size = f64::from(CELL_SIZE);
    let row = (ly / size).floor() as usize;
    let col = (lx / size).floor() as usize;
    CellIndex::checked(row, col)
}

impl CellIndex {
    /// Local surface coordinates of this cell's center.
    pub fn center(self) -> (f64, f64) {
        let size = f64::from(CELL_SIZE);
        (
            self.col() as f64 * size + size / 2.0,
            self.row() as f64 * size + size / 2.0,
        )
    }
}
