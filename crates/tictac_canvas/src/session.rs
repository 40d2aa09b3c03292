//! Session state and its transitions.
//!
//! A [`Session`] is a plain value. Input events go in through
//! [`Session::apply`], which returns the next session together with the
//! effect the host must perform. Nothing here touches a surface.

use crate::error::{BoardError, BoardErrorKind};
use crate::geometry::{PointerPosition, SurfaceGeometry, map_pointer};
use crate::types::{Board, CellIndex, Player};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// Input events consumed by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to a new screen position.
    PointerMoved(PointerPosition),
    /// The surface was clicked. The position comes from the last
    /// `PointerMoved`, not from the click.
    Clicked,
    /// The player selector changed.
    PlayerSelected(Player),
    /// The surface was mounted and measured.
    SurfaceMounted(SurfaceGeometry),
}

/// Work the host must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing visible changed.
    None,
    /// Repaint the board.
    Redraw,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The session after the event.
    pub session: Session,
    /// What the host must do next.
    pub effect: Effect,
}

impl Transition {
    fn unchanged(session: Session) -> Self {
        Self {
            session,
            effect: Effect::None,
        }
    }
}

/// Everything the board UI tracks between events.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Session {
    /// The board.
    board: Board,
    /// Mark written by the next accepted click.
    active_player: Player,
    /// Last known pointer position.
    pointer: PointerPosition,
    /// Surface placement, once measured.
    geometry: Option<SurfaceGeometry>,
}

impl Session {
    /// Creates a session with an empty board and no surface geometry.
    #[instrument]
    pub fn new(active_player: Player) -> Self {
        Self {
            board: Board::new(),
            active_player,
            pointer: PointerPosition::default(),
            geometry: None,
        }
    }

    /// Applies an input event.
    #[instrument(skip(self), fields(active = %self.active_player))]
    pub fn apply(self, event: InputEvent) -> Transition {
        match event {
            InputEvent::PointerMoved(pointer) => Transition::unchanged(Self { pointer, ..self }),
            InputEvent::PlayerSelected(active_player) => {
                debug!(%active_player, "Player selected");
                Transition::unchanged(Self {
                    active_player,
                    ..self
                })
            }
            InputEvent::SurfaceMounted(geometry) => self.mount(geometry),
            InputEvent::Clicked => self.click(),
        }
    }

    /// Cell under the last known pointer position.
    pub fn hovered_cell(&self) -> Result<CellIndex, BoardError> {
        let geometry = self.geometry.ok_or_else(|| {
            BoardError::new(
                BoardErrorKind::GeometryNotCaptured,
                "surface geometry has not been measured",
            )
        })?;
        map_pointer(self.pointer, geometry)
    }

    fn mount(self, geometry: SurfaceGeometry) -> Transition {
        if self.geometry.is_some() {
            debug!(?geometry, "Surface already measured, ignoring");
            return Transition::unchanged(self);
        }
        info!(?geometry, "Surface mounted");
        Transition {
            session: Self {
                geometry: Some(geometry),
                ..self
            },
            effect: Effect::Redraw,
        }
    }

    fn click(self) -> Transition {
        let index = match self.hovered_cell() {
            Ok(index) => index,
            Err(e) if e.is_discarded_click() => {
                debug!(error = %e, "Click discarded");
                return Transition::unchanged(self);
            }
            Err(e) => {
                warn!(error = %e, "Click could not be mapped");
                return Transition::unchanged(self);
            }
        };

        let board = self.board.place_at(index, self.active_player);
        info!(%index, player = %self.active_player, "Mark placed");
        Transition {
            session: Self { board, ..self },
            effect: Effect::Redraw,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Player::X)
    }
}
