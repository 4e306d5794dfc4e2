//! Control and dice visibility derived from the authoritative game state.
//!
//! Visibility is a pure function of six booleans. The worker recomputes it
//! after every authoritative change and after a local dice order swap.
use bitflags::bitflags;

use crate::piece::PieceType;
use crate::snapshot::{GameSnapshot, MatchSnapshot};

bitflags! {
    /// Visible controls.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Controls: u8 {
        /// Roll button.
        const ROLL      = 0b0000_0001;
        /// Confirm button.
        const CONFIRM   = 0b0000_0010;
        /// Undo button, shown together with confirm.
        const UNDO      = 0b0000_0100;
        /// Resign menu entry.
        const RESIGN    = 0b0000_1000;
        /// Dice panel.
        const DICE      = 0b0001_0000;
        /// Undo menu entry, available while moves are still being played.
        const MENU_UNDO = 0b0010_0000;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::empty()
    }
}

/// The six inputs visibility depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControlInputs {
    pub has_started: bool,
    pub is_over: bool,
    pub is_local_turn: bool,
    pub dice_rolled: bool,
    pub has_more_moves: bool,
    pub turn_confirmed: bool,
}

impl ControlInputs {
    pub fn from_game(game: &GameSnapshot, local: PieceType) -> Self {
        Self {
            has_started: game.has_started,
            is_over: game.is_over,
            is_local_turn: game.is_player_turn(local),
            dice_rolled: game.dice_was_rolled(),
            has_more_moves: game.has_more_moves(),
            turn_confirmed: game.turn_confirmed,
        }
    }
}

impl Controls {
    /// Visibility for an active game.
    pub fn derive(inputs: ControlInputs) -> Self {
        let ControlInputs {
            has_started,
            is_over,
            is_local_turn,
            dice_rolled,
            has_more_moves,
            turn_confirmed,
        } = inputs;

        let live = has_started && !is_over;
        let own_turn = live && is_local_turn && !turn_confirmed;

        let mut controls = Controls::empty();
        controls.set(Controls::ROLL, own_turn && !dice_rolled);
        controls.set(
            Controls::CONFIRM | Controls::UNDO,
            own_turn && dice_rolled && !has_more_moves,
        );
        controls.set(Controls::MENU_UNDO, own_turn && dice_rolled);
        controls.set(Controls::RESIGN, live);
        controls.set(Controls::DICE, live && dice_rolled && !turn_confirmed);
        controls
    }

    /// Visibility for the current game of `current`, empty when there is none.
    pub fn for_match(current: Option<&MatchSnapshot>, local: PieceType) -> Self {
        current
            .and_then(|m| m.current_game.as_ref())
            .map(|game| Self::derive(ControlInputs::from_game(game, local)))
            .unwrap_or_default()
    }
}
