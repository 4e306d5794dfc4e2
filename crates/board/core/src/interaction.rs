//! Pointer gestures over board containers turned into move requests.
//!
//! The controller only reads the board. A resolved request goes to the remote
//! authority; the board changes only once the resulting actions come back.
use crate::dice::{PointerButton, TurnDice};
use crate::layout::{BoardLayout, VisualSlot};
use crate::piece::PieceId;
use crate::registry::PieceRegistry;

/// Request to move `piece` by `steps` pips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRequest {
    pub piece: PieceId,
    pub steps: u8,
}

/// Result of a pointer press on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    pub request: Option<MoveRequest>,
    /// The platform's default secondary-action menu must be suppressed.
    pub consume_default: bool,
}

impl PointerOutcome {
    pub const fn ignored() -> Self {
        Self {
            request: None,
            consume_default: false,
        }
    }
}

/// Resolves a pointer press on `slot`.
///
/// Nothing is requested when no dice are available, no moves are left, or the
/// slot is empty. Presses on any board container consume the default menu.
pub fn resolve_pointer(
    registry: &PieceRegistry,
    layout: &BoardLayout,
    dice: Option<&TurnDice>,
    slot: VisualSlot,
    button: PointerButton,
) -> PointerOutcome {
    let Some(container) = layout.unproject(slot) else {
        return PointerOutcome::ignored();
    };

    let request = dice
        .and_then(|dice| dice.steps_for(button))
        .and_then(|steps| {
            registry.top_of(container).map(|element| MoveRequest {
                piece: element.piece.id,
                steps,
            })
        });

    PointerOutcome {
        request,
        consume_default: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ContainerId, Point};
    use crate::piece::{Piece, PieceType};

    fn board() -> (PieceRegistry, BoardLayout) {
        let mut registry = PieceRegistry::new();
        let p5 = ContainerId::Point(Point::new(5).unwrap());
        registry.create(Piece::new(10, PieceType::White), p5).unwrap();
        registry.create(Piece::new(11, PieceType::White), p5).unwrap();
        registry
            .create(Piece::new(20, PieceType::Black), ContainerId::Bar(PieceType::Black))
            .unwrap();
        (registry, BoardLayout::new(PieceType::White))
    }

    #[test]
    fn gestures_select_first_or_last_move() {
        let (registry, layout) = board();
        let dice = TurnDice::rolled(&[3, 5]);

        let primary = resolve_pointer(
            &registry,
            &layout,
            Some(&dice),
            VisualSlot::Point(5),
            PointerButton::Primary,
        );
        assert_eq!(
            primary.request,
            Some(MoveRequest {
                piece: PieceId(11),
                steps: 3
            })
        );

        let secondary = resolve_pointer(
            &registry,
            &layout,
            Some(&dice),
            VisualSlot::Point(5),
            PointerButton::Secondary,
        );
        assert_eq!(secondary.request.map(|r| r.steps), Some(5));
        assert!(secondary.consume_default);
    }

    #[test]
    fn empty_slot_is_a_noop_that_still_blocks_menu() {
        let (registry, layout) = board();
        let dice = TurnDice::rolled(&[1, 2]);
        let outcome = resolve_pointer(
            &registry,
            &layout,
            Some(&dice),
            VisualSlot::Point(6),
            PointerButton::Secondary,
        );
        assert_eq!(outcome.request, None);
        assert!(outcome.consume_default);
    }

    #[test]
    fn no_moves_left_suppresses_requests() {
        let (registry, layout) = board();
        let spent = TurnDice::rolled(&[1, 2]).with_moves_left(&[]);
        for dice in [None, Some(&spent)] {
            let outcome = resolve_pointer(
                &registry,
                &layout,
                dice,
                VisualSlot::Point(5),
                PointerButton::Primary,
            );
            assert_eq!(outcome.request, None);
        }
    }

    #[test]
    fn bar_press_acts_on_bar_top() {
        let (registry, layout) = board();
        let dice = TurnDice::rolled(&[4, 4]);
        let outcome = resolve_pointer(
            &registry,
            &layout,
            Some(&dice),
            VisualSlot::BottomBar,
            PointerButton::Primary,
        );
        assert_eq!(outcome.request.map(|r| r.piece), Some(PieceId(20)));
    }
}
