//! Presentation state mirrored from runtime events.
//!
//! The view model keeps its own copy of the board. A reset event carries the
//! rebuilt board; every later landing is applied locally, so rendering never
//! waits on the worker while a list is playing.
use std::time::Instant;

use board_core::{
    Alignment, AnimationPlan, BoardView, Controls, DiceDisplay, Flight, FlightFrame, GameResult,
    Geometry, Notice, NoticeTone, PieceId, PieceType, RESULT_TIMEOUT, Scoreboard, Seats,
    VisualSlot,
};

/// A flight being drawn, sampled against the instant it started.
#[derive(Clone, Copy, Debug)]
pub struct ActiveFlight {
    pub flight: Flight,
    pub started: Instant,
    pub plan: AnimationPlan,
}

impl ActiveFlight {
    pub fn new(flight: Flight, started: Instant) -> Self {
        Self {
            flight,
            started,
            plan: AnimationPlan::for_kind(flight.kind),
        }
    }

    pub fn frame_at(&self, now: Instant) -> FlightFrame {
        self.plan.sample(now.saturating_duration_since(self.started))
    }
}

/// Timed text shown over the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub tone: NoticeTone,
    pub until: Instant,
}

impl Banner {
    pub fn from_notice(notice: &Notice, now: Instant) -> Self {
        Self::new(notice.text.clone(), notice.tone, now + notice.timeout)
    }

    pub fn new(text: impl Into<String>, tone: NoticeTone, until: Instant) -> Self {
        Self {
            text: text.into(),
            tone,
            until,
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.until
    }
}

/// One piece of a stack as it should be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedPiece {
    pub id: PieceId,
    pub kind: PieceType,
    pub alignment: Alignment,
    /// Offset from the stack's edge, in percent of one piece.
    pub offset_percent: f64,
    /// Drawn by the flight overlay instead of in its stack.
    pub in_flight: bool,
}

/// Presentation state owned by a frontend.
#[derive(Clone, Debug)]
pub struct ViewModel {
    pub board: BoardView,
    pub controls: Controls,
    pub dice: Option<DiceDisplay>,
    pub scoreboard: Option<Scoreboard>,
    pub result: Option<GameResult>,
    /// Result banner shown until it expires.
    pub result_banner: Option<Banner>,
    pub notice: Option<Banner>,
    pub flight: Option<ActiveFlight>,
    /// The local board diverged from the worker's and must be re-queried.
    pub stale: bool,
}

impl ViewModel {
    pub fn new(seats: Seats, geometry: Geometry) -> Self {
        Self::from_view(BoardView::new(seats, geometry))
    }

    pub fn from_view(board: BoardView) -> Self {
        Self {
            controls: board.controls(),
            dice: board.dice_display(),
            scoreboard: board.scoreboard(),
            board,
            result: None,
            result_banner: None,
            notice: None,
            flight: None,
            stale: false,
        }
    }

    /// Replaces the mirrored board with a fresh copy from the worker.
    pub fn replace_board(&mut self, board: BoardView) {
        self.controls = board.controls();
        self.dice = board.dice_display();
        self.scoreboard = board.scoreboard();
        self.board = board;
        self.flight = None;
        self.stale = false;
    }

    /// Pieces stacked in `slot`, edge first.
    pub fn stack(&self, slot: VisualSlot) -> Vec<StackedPiece> {
        let Some(container) = self.board.layout().unproject(slot) else {
            return Vec::new();
        };
        let flying = self.flight.map(|active| active.flight.piece);
        let registry = self.board.registry();

        registry
            .pieces_in(container)
            .iter()
            .filter_map(|id| registry.by_id(*id))
            .map(|element| StackedPiece {
                id: element.piece.id,
                kind: element.piece.kind,
                alignment: element.style.alignment,
                offset_percent: element.style.offset_percent,
                in_flight: flying == Some(element.piece.id),
            })
            .collect()
    }

    /// Stack ratio of `slot`, 100 when pieces do not overlap.
    pub fn ratio(&self, slot: VisualSlot) -> f64 {
        self.board
            .layout()
            .unproject(slot)
            .and_then(|container| self.board.packing(container))
            .map_or(board_core::FULL_RATIO, |packing| packing.ratio)
    }

    /// Drops banners whose display time is over. Returns whether any did.
    pub fn expire(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self.notice.as_ref().is_some_and(|banner| banner.expired(now)) {
            self.notice = None;
            changed = true;
        }
        if self
            .result_banner
            .as_ref()
            .is_some_and(|banner| banner.expired(now))
        {
            self.result_banner = None;
            changed = true;
        }
        changed
    }

    /// Whether a frame must be drawn at `now` even without new events.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.flight
            .is_some_and(|active| now.saturating_duration_since(active.started) <= active.plan.total())
    }

    pub(crate) fn show_result(&mut self, result: GameResult, now: Instant) {
        let tone = if result.won {
            NoticeTone::Positive
        } else {
            NoticeTone::Negative
        };
        let text = format!(
            "{} {}: You {} / {} Opponent",
            result.message, result.heading, result.your_score, result.opponent_score
        );
        self.result_banner = Some(Banner::new(text, tone, now + RESULT_TIMEOUT));
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use board_core::{
        ActionKind, ContainerId, DiceJitter, GameSnapshot, MatchSnapshot, Piece, Point, Rule,
        TurnDice,
    };

    fn point(index: u8) -> ContainerId {
        ContainerId::Point(Point::new(index).unwrap())
    }

    fn board_with_stack() -> BoardView {
        let pieces: Vec<_> = (1..=3).map(|id| Piece::new(id, PieceType::White)).collect();
        let current = MatchSnapshot {
            length: 3,
            current_game: Some(GameSnapshot {
                state: board_core::BoardSnapshot::default()
                    .with_point(Point::new(0).unwrap(), &pieces),
                has_started: true,
                turn_player: Some(PieceType::White),
                turn_dice: Some(TurnDice::rolled(&[4, 2])),
                ..GameSnapshot::default()
            }),
            ..MatchSnapshot::default()
        };
        let mut board = BoardView::new(Seats::new(PieceType::White), Geometry::default());
        board
            .reset(current, Rule::default(), Seats::new(PieceType::White), DiceJitter::default())
            .unwrap();
        board
    }

    #[test]
    fn stack_marks_flying_piece() {
        let mut model = ViewModel::from_view(board_with_stack());
        model.flight = Some(ActiveFlight::new(
            Flight {
                index: 0,
                piece: PieceId(3),
                kind: ActionKind::Move,
                source: point(0),
                destination: Some(point(4)),
            },
            Instant::now(),
        ));

        let stack = model.stack(VisualSlot::Point(0));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack[0].offset_percent, 0.0);
        assert_eq!(stack[0].alignment, Alignment::Bottom);
        assert!(!stack[0].in_flight);
        assert!(stack[2].in_flight);
        assert!(model.stack(VisualSlot::Point(4)).is_empty());
        assert!(model.controls.contains(Controls::DICE));
    }

    #[test]
    fn banners_expire_after_their_timeout() {
        let now = Instant::now();
        let mut model = ViewModel::new(Seats::new(PieceType::Black), Geometry::default());
        model.notice = Some(Banner::from_notice(&Notice::undo(), now));

        assert!(!model.expire(now + Duration::from_millis(2999)));
        assert!(model.expire(now + Duration::from_millis(3000)));
        assert!(model.notice.is_none());
    }

    #[test]
    fn animation_stops_after_plan_total() {
        let now = Instant::now();
        let mut model = ViewModel::new(Seats::new(PieceType::White), Geometry::default());
        model.flight = Some(ActiveFlight::new(
            Flight {
                index: 0,
                piece: PieceId(1),
                kind: ActionKind::Bear,
                source: point(23),
                destination: None,
            },
            now,
        ));

        assert!(model.is_animating(now + Duration::from_millis(250)));
        assert!(!model.is_animating(now + Duration::from_millis(501)));
        let frame = model.flight.unwrap().frame_at(now + Duration::from_millis(500));
        assert!(frame.opacity.abs() < 1e-9);
    }
}
