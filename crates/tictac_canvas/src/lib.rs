//! Tic-tac-toe on a drawing surface.
//!
//! The crate keeps the pieces that do real work apart from whatever hosts
//! them:
//!
//! - **Board model**: a 3x3 grid and a pure `place` transition
//! - **Coordinate mapping**: screen pointer + surface origin to a checked cell
//! - **Rendering**: a full repaint onto any [`DrawingSurface`]
//! - **Session**: the state a host tracks between input events
//!
//! # Example
//!
//! ```
//! use tictac_canvas::{
//!     BoardRenderer, InputEvent, PixelCanvas, Player, PointerPosition, Session,
//!     SurfaceGeometry, SurfaceHandle,
//! };
//!
//! let mut handle = SurfaceHandle::attached(PixelCanvas::new(480, 480));
//! let renderer = BoardRenderer::default();
//!
//! let session = Session::new(Player::X)
//!     .apply(InputEvent::SurfaceMounted(SurfaceGeometry::at(0.0, 0.0)))
//!     .session
//!     .apply(InputEvent::PointerMoved(PointerPosition::new(240.0, 240.0)))
//!     .session;
//! let transition = session.apply(InputEvent::Clicked);
//! assert!(renderer.draw(&mut handle, transition.session.board()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod canvas;
mod contracts;
mod error;
mod geometry;
mod renderer;
mod session;
mod surface;
mod types;

pub use canvas::{DEFAULT_FONT_SIZE, PixelCanvas, advance, ascent};
pub use contracts::{Contract, Invariant, OthersUnchanged, PlaceContract, TargetMarked};
pub use error::{BoardError, BoardErrorKind};
pub use geometry::{
    CELL_SIZE, PointerPosition, SURFACE_HEIGHT, SURFACE_WIDTH, SurfaceGeometry, map_pointer,
};
pub use renderer::{
    BoardRenderer, DIVIDER_OFFSETS, DIVIDER_THICKNESS, MARK_FONT_SIZE, MARK_INSET_X,
    MARK_OFFSET_Y, Theme, mark_origin,
};
pub use session::{Effect, InputEvent, Session, Transition};
pub use surface::{
    DisplayList, DrawCommand, DrawingSurface, ParseColorError, Rgb, SurfaceHandle, TextBaseline,
};
pub use types::{BOARD_SIZE, Board, Cell, CellIndex, Player};
