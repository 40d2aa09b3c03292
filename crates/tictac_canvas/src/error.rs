//! Board error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Kinds of failure the board pipeline can report.
///
/// None of these are fatal. Callers absorb them and keep the session
/// interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BoardErrorKind {
    /// A row or column fell outside the 3x3 board.
    #[display("Out of bounds")]
    OutOfBounds,
    /// The drawing surface is not mounted, or its handle was dropped.
    #[display("Surface unavailable")]
    SurfaceUnavailable,
    /// A click arrived before the surface geometry was measured.
    #[display("Geometry not captured")]
    GeometryNotCaptured,
    /// A placement broke its postcondition.
    #[display("Invariant violation")]
    InvariantViolation,
}

/// Board error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{}: {} at {}:{}", kind, message, file, line)]
pub struct BoardError {
    /// What went wrong.
    pub kind: BoardErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: BoardErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an [`BoardErrorKind::OutOfBounds`] error.
    #[track_caller]
    pub fn out_of_bounds(message: impl Into<String>) -> Self {
        Self::new(BoardErrorKind::OutOfBounds, message)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> BoardErrorKind {
        self.kind
    }

    /// True when the error means "this click does not land on the board".
    ///
    /// Both out-of-range pointers and clicks before mount fall in this class.
    pub fn is_discarded_click(&self) -> bool {
        matches!(
            self.kind,
            BoardErrorKind::OutOfBounds | BoardErrorKind::GeometryNotCaptured
        )
    }
}
