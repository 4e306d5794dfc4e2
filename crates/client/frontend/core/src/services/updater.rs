//! ViewModelUpdater service layer for incremental updates.
//!
//! This service interprets Events from the runtime and applies them to the
//! ViewModel, avoiding a round trip to the worker for every landing.
//!
//! # Architecture
//!
//! - `UpdateScope`: Bitflags tracking which parts of ViewModel changed (for selective rendering)
//! - `ViewModelUpdater`: Stateless service for applying runtime Events to ViewModel

use std::time::Instant;

use bitflags::bitflags;
use board_runtime::{BoardEvent, ControlsEvent, Event, NoticeEvent};
use tracing::warn;

use crate::view_model::{ActiveFlight, Banner, ViewModel};

// ============================================================================
// UpdateScope - Fine-grained change tracking
// ============================================================================

bitflags! {
    /// Tracks which parts of ViewModel have been updated.
    ///
    /// This enables widgets to skip rendering unchanged areas.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UpdateScope: u32 {
        /// Piece placement or packing changed.
        const BOARD      = 0b0000_0001;

        /// A flight started or ended.
        const FLIGHT     = 0b0000_0010;

        /// Control visibility changed.
        const CONTROLS   = 0b0000_0100;

        /// Dice panel changed.
        const DICE       = 0b0000_1000;

        /// Scoreboard text changed.
        const SCOREBOARD = 0b0001_0000;

        /// Notice banner changed.
        const MESSAGES   = 0b0010_0000;

        /// Game result banner changed.
        const RESULT     = 0b0100_0000;

        /// Everything changed (full rebuild).
        const ALL = Self::BOARD.bits()
                  | Self::FLIGHT.bits()
                  | Self::CONTROLS.bits()
                  | Self::DICE.bits()
                  | Self::SCOREBOARD.bits()
                  | Self::MESSAGES.bits()
                  | Self::RESULT.bits();
    }
}

impl Default for UpdateScope {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// ViewModelUpdater - Event-driven ViewModel updates
// ============================================================================

/// Service layer for interpreting runtime Events and updating ViewModel incrementally.
///
/// Landings are replayed on the mirrored board. A landing the mirror cannot
/// apply marks the view model stale; the owner re-queries the worker once the
/// list has finished.
pub struct ViewModelUpdater;

impl ViewModelUpdater {
    /// Update ViewModel based on runtime Event received at `now`.
    ///
    /// Returns UpdateScope flags indicating which ViewModel fields were updated.
    pub fn update(view_model: &mut ViewModel, event: &Event, now: Instant) -> UpdateScope {
        match event {
            Event::Board(board_event) => Self::update_board(view_model, board_event, now),
            Event::Controls(controls_event) => Self::update_controls(view_model, controls_event),
            Event::Notice(notice_event) => Self::update_notice(view_model, notice_event, now),
        }
    }

    fn update_board(view_model: &mut ViewModel, event: &BoardEvent, now: Instant) -> UpdateScope {
        match event {
            BoardEvent::Reset { view, .. } => {
                view_model.replace_board(view.as_ref().clone());
                view_model.result = None;
                view_model.result_banner = None;
                UpdateScope::ALL
            }
            BoardEvent::FlightStarted { flight } => {
                view_model.flight = Some(ActiveFlight::new(*flight, now));
                UpdateScope::FLIGHT
            }
            BoardEvent::FlightLanded { flight, .. } => {
                view_model.flight = None;
                if let Err(error) = view_model.board.land(*flight) {
                    warn!(%error, piece = %flight.piece, "mirrored board out of step");
                    view_model.stale = true;
                }
                UpdateScope::BOARD | UpdateScope::FLIGHT
            }
            BoardEvent::PlaybackFinished { .. } | BoardEvent::PlaybackFailed { .. } => {
                if view_model.flight.take().is_some() {
                    UpdateScope::FLIGHT
                } else {
                    UpdateScope::empty()
                }
            }
            BoardEvent::Resized { geometry } => {
                view_model.board.resize(*geometry);
                UpdateScope::BOARD
            }
        }
    }

    fn update_controls(view_model: &mut ViewModel, event: &ControlsEvent) -> UpdateScope {
        match event {
            ControlsEvent::Changed { controls, dice } => {
                view_model.controls = *controls;
                view_model.dice = dice.clone();
                UpdateScope::CONTROLS | UpdateScope::DICE
            }
            ControlsEvent::Scoreboard(scoreboard) => {
                view_model.scoreboard = Some(scoreboard.clone());
                UpdateScope::SCOREBOARD
            }
        }
    }

    fn update_notice(view_model: &mut ViewModel, event: &NoticeEvent, now: Instant) -> UpdateScope {
        match event {
            NoticeEvent::Notice(notice) => {
                view_model.notice = Some(Banner::from_notice(notice, now));
                UpdateScope::MESSAGES
            }
            NoticeEvent::GameResult(result) => {
                view_model.show_result(result.clone(), now);
                UpdateScope::RESULT
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::{
        ActionKind, BoardView, ContainerId, Controls, DiceJitter, Flight, GameSnapshot, Geometry,
        Landing, MatchSnapshot, Notice, Piece, PieceId, PieceType, Point, Rule, Seats, VisualSlot,
    };

    fn point(index: u8) -> ContainerId {
        ContainerId::Point(Point::new(index).unwrap())
    }

    fn reset_event() -> Event {
        let seats = Seats::new(PieceType::Black);
        let current = MatchSnapshot {
            length: 1,
            current_game: Some(GameSnapshot {
                state: board_core::BoardSnapshot::default()
                    .with_point(Point::new(23).unwrap(), &[Piece::new(5, PieceType::Black)]),
                has_started: true,
                ..GameSnapshot::default()
            }),
            ..MatchSnapshot::default()
        };
        let mut view = BoardView::new(seats, Geometry::default());
        view.reset(current, Rule::default(), seats, DiceJitter::default())
            .unwrap();

        Event::Board(BoardEvent::Reset {
            pieces: 1,
            local: PieceType::Black,
            view: Box::new(view),
        })
    }

    fn bear_off(piece: u32) -> Flight {
        Flight {
            index: 0,
            piece: PieceId(piece),
            kind: ActionKind::Bear,
            source: point(23),
            destination: None,
        }
    }

    #[test]
    fn reset_then_landing_updates_mirror() {
        let now = Instant::now();
        let mut model = ViewModel::new(Seats::new(PieceType::White), Geometry::default());

        let scope = ViewModelUpdater::update(&mut model, &reset_event(), now);
        assert_eq!(scope, UpdateScope::ALL);
        // Black at the bottom: canonical 23 is drawn at visual 11.
        assert_eq!(model.stack(VisualSlot::Point(11)).len(), 1);

        let flight = bear_off(5);
        let started = Event::Board(BoardEvent::FlightStarted { flight });
        assert_eq!(
            ViewModelUpdater::update(&mut model, &started, now),
            UpdateScope::FLIGHT
        );
        assert!(model.stack(VisualSlot::Point(11))[0].in_flight);

        let landed = Event::Board(BoardEvent::FlightLanded {
            flight,
            landing: Landing {
                source: point(23),
                destination: None,
            },
            animated: true,
        });
        ViewModelUpdater::update(&mut model, &landed, now);
        assert!(model.flight.is_none());
        assert!(model.board.registry().is_empty());
        assert!(!model.stale);
    }

    #[test]
    fn unknown_landing_marks_model_stale() {
        let now = Instant::now();
        let mut model = ViewModel::new(Seats::new(PieceType::White), Geometry::default());
        let landed = Event::Board(BoardEvent::FlightLanded {
            flight: bear_off(9),
            landing: Landing {
                source: point(23),
                destination: None,
            },
            animated: false,
        });

        ViewModelUpdater::update(&mut model, &landed, now);
        assert!(model.stale);
    }

    #[test]
    fn notices_and_controls_update_their_scopes() {
        let now = Instant::now();
        let mut model = ViewModel::new(Seats::new(PieceType::White), Geometry::default());

        let changed = Event::Controls(ControlsEvent::Changed {
            controls: Controls::ROLL | Controls::RESIGN,
            dice: None,
        });
        assert_eq!(
            ViewModelUpdater::update(&mut model, &changed, now),
            UpdateScope::CONTROLS | UpdateScope::DICE
        );
        assert!(model.controls.contains(Controls::ROLL));

        let notice = Event::Notice(NoticeEvent::Notice(Notice::undo()));
        assert_eq!(
            ViewModelUpdater::update(&mut model, &notice, now),
            UpdateScope::MESSAGES
        );
        assert_eq!(
            model.notice.as_ref().map(|banner| banner.text.as_str()),
            Some("Player undid last move.")
        );
    }
}
