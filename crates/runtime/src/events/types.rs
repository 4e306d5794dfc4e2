use board_core::{
    BoardView, Controls, DiceDisplay, Flight, GameResult, Geometry, InvalidActionError, Landing,
    Notice, PieceType, Scoreboard,
};

/// Changes to piece placement.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// Board rebuilt from a full snapshot. `view` is the rebuilt board, so
    /// subscribers can mirror it and apply later landings themselves.
    Reset {
        pieces: usize,
        local: PieceType,
        view: Box<BoardView>,
    },

    /// A piece started its animation. Renderers sample
    /// [`board_core::AnimationPlan::for_kind`] from the moment they receive it.
    FlightStarted { flight: Flight },

    /// A piece reached its end state and the affected stacks were repacked.
    FlightLanded {
        flight: Flight,
        landing: Landing,
        /// `false` when the landing was fast-forwarded.
        animated: bool,
    },

    /// An action list finished playing.
    PlaybackFinished { applied: usize, fast_forwarded: bool },

    /// An action list stopped at an invalid action. Earlier actions stay
    /// applied.
    PlaybackFailed { error: InvalidActionError },

    /// Extents changed and every container was repacked.
    Resized { geometry: Geometry },
}

/// Changes to controls and the panels around the board.
#[derive(Debug, Clone)]
pub enum ControlsEvent {
    Changed {
        controls: Controls,
        dice: Option<DiceDisplay>,
    },
    Scoreboard(Scoreboard),
}

/// Messages for the player.
#[derive(Debug, Clone)]
pub enum NoticeEvent {
    Notice(Notice),
    GameResult(GameResult),
}
