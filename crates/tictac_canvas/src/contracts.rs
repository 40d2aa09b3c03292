//! Contract-based validation for board placements.
//!
//! A placement is a Hoare triple `{P} place {Q}`: the precondition is
//! carried by the type of [`CellIndex`], the postcondition is checked here.

use crate::error::{BoardError, BoardErrorKind};
use crate::types::{Board, Cell, CellIndex, Player};
use tracing::instrument;

/// A contract defines the postconditions of a state transition.
///
/// Preconditions live in the action's types: an action that reaches a
/// contract has already been checked.
pub trait Contract<S, A> {
    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S, action: &A) -> Result<(), BoardError>;
}

/// A logical property of a single transition.
pub trait Invariant<S, A> {
    /// Checks whether the property holds across the transition.
    fn holds(before: &S, after: &S, action: &A) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// The target cell holds the placed mark, whatever it held before.
pub struct TargetMarked;

impl Invariant<Board, (CellIndex, Player)> for TargetMarked {
    fn holds(_before: &Board, after: &Board, action: &(CellIndex, Player)) -> bool {
        let (index, player) = *action;
        after.cell(index) == Cell::Marked(player)
    }

    fn description() -> &'static str {
        "Target cell holds the placed mark"
    }
}

/// No cell other than the target changes.
pub struct OthersUnchanged;

impl Invariant<Board, (CellIndex, Player)> for OthersUnchanged {
    fn holds(before: &Board, after: &Board, action: &(CellIndex, Player)) -> bool {
        let (index, _) = *action;
        before.diff(after).iter().all(|&changed| changed == index)
    }

    fn description() -> &'static str {
        "Only the target cell changes"
    }
}

/// Contract for placing a mark.
///
/// Occupied cells may be overwritten, so the only precondition is an
/// on-board [`CellIndex`].
///
/// Postconditions:
/// - Target cell holds the mark
/// - Every other cell is unchanged
pub struct PlaceContract;

impl Contract<Board, (CellIndex, Player)> for PlaceContract {
    #[instrument(skip_all)]
    fn post(before: &Board, after: &Board, action: &(CellIndex, Player)) -> Result<(), BoardError> {
        let mut violations = Vec::new();
        if !TargetMarked::holds(before, after, action) {
            violations.push(TargetMarked::description());
        }
        if !OthersUnchanged::holds(before, after, action) {
            violations.push(OthersUnchanged::description());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(BoardError::new(
                BoardErrorKind::InvariantViolation,
                format!("Postcondition failed: {}", violations.join("; ")),
            ))
        }
    }
}
