//! Discrete move actions delivered by the remote game service.
//!
//! One player move expands into an ordered list of actions. Sources are
//! implicit: an action acts on wherever the piece currently rests on the board.
use strum::{Display, EnumIter};
use thiserror::Error;

use crate::layout::{ContainerId, Point};
use crate::piece::{PieceId, PieceType};

/// Action variant, which also selects the animation played for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "UPPERCASE")]
pub enum ActionKind {
    /// Piece moves from one point to another.
    Move,
    /// Piece re-enters the board from the bar.
    Recover,
    /// Opponent piece is sent to its bar.
    Hit,
    /// Piece leaves the board for good.
    Bear,
}

/// A single action of a player move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ActionKind,
    pub piece: PieceId,
    /// Destination point for MOVE and RECOVER.
    #[cfg_attr(feature = "serde", serde(default))]
    pub to: Option<Point>,
}

impl Action {
    pub const fn move_to(piece: PieceId, to: Point) -> Self {
        Self {
            kind: ActionKind::Move,
            piece,
            to: Some(to),
        }
    }

    pub const fn recover(piece: PieceId, to: Point) -> Self {
        Self {
            kind: ActionKind::Recover,
            piece,
            to: Some(to),
        }
    }

    pub const fn hit(piece: PieceId) -> Self {
        Self {
            kind: ActionKind::Hit,
            piece,
            to: None,
        }
    }

    pub const fn bear(piece: PieceId) -> Self {
        Self {
            kind: ActionKind::Bear,
            piece,
            to: None,
        }
    }

    /// Resolves where the piece ends up. `None` means off-board.
    ///
    /// `kind` is the color of the acting piece, needed to pick the bar a hit
    /// piece is sent to.
    pub fn destination(&self, kind: PieceType) -> Result<Option<ContainerId>, InvalidActionReason> {
        match self.kind {
            ActionKind::Move | ActionKind::Recover => self
                .to
                .map(|point| Some(ContainerId::Point(point)))
                .ok_or(InvalidActionReason::MissingDestination),
            ActionKind::Hit => Ok(Some(ContainerId::Bar(kind))),
            ActionKind::Bear => Ok(None),
        }
    }
}

/// Why a single action could not be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidActionReason {
    #[error("piece is not on the board")]
    UnknownPiece,

    #[error("action has no destination point")]
    MissingDestination,
}

/// Failure of one action inside a playback call.
///
/// Actions before `index` in the same list were already applied and stay
/// applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid {kind} action #{index} for {piece}: {reason}")]
pub struct InvalidActionError {
    pub index: usize,
    pub piece: PieceId,
    pub kind: ActionKind,
    pub reason: InvalidActionReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_destination_is_bar_of_hit_piece() {
        let action = Action::hit(PieceId(9));
        assert_eq!(
            action.destination(PieceType::Black),
            Ok(Some(ContainerId::Bar(PieceType::Black)))
        );
    }

    #[test]
    fn move_without_target_is_rejected() {
        let action = Action {
            kind: ActionKind::Move,
            piece: PieceId(1),
            to: None,
        };
        assert_eq!(
            action.destination(PieceType::White),
            Err(InvalidActionReason::MissingDestination)
        );
        assert_eq!(Action::bear(PieceId(1)).destination(PieceType::White), Ok(None));
    }

    #[test]
    fn error_message_names_action() {
        let err = InvalidActionError {
            index: 2,
            piece: PieceId(4),
            kind: ActionKind::Hit,
            reason: InvalidActionReason::UnknownPiece,
        };
        assert_eq!(
            err.to_string(),
            "invalid HIT action #2 for piece#4: piece is not on the board"
        );
    }
}
