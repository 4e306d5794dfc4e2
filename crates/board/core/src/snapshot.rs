//! Authoritative state pushed by the remote game service.
//!
//! These mirror the server model closely enough to rebuild the board on reset
//! and to derive control visibility. The board never mutates them locally
//! except for the dice order swap.
use crate::dice::TurnDice;
use crate::layout::{ContainerId, POINT_COUNT, Point};
use crate::piece::{Piece, PieceType};

/// Piece placement of a full board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    /// Ordered piece sequence per canonical point, bottom of the stack first.
    pub points: Vec<Vec<Piece>>,
    /// Bar contents indexed by [`PieceType::index`].
    pub bar: Vec<Vec<Piece>>,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            points: vec![Vec::new(); POINT_COUNT],
            bar: vec![Vec::new(), Vec::new()],
        }
    }
}

impl BoardSnapshot {
    /// Iterates `(container, piece)` in placement order.
    ///
    /// Points beyond the 24th are ignored. Bar pieces are placed in the bar of
    /// their own color regardless of which bar list carried them.
    pub fn placements(&self) -> impl Iterator<Item = (ContainerId, Piece)> + '_ {
        let points = self
            .points
            .iter()
            .take(POINT_COUNT)
            .enumerate()
            .flat_map(|(index, pieces)| {
                let point = Point::new(index as u8).map(ContainerId::Point);
                pieces
                    .iter()
                    .filter_map(move |piece| point.map(|container| (container, *piece)))
            });
        let bars = self
            .bar
            .iter()
            .flatten()
            .map(|piece| (ContainerId::Bar(piece.kind), *piece));
        points.chain(bars)
    }

    /// Places `pieces` on `point`, bottom first.
    pub fn with_point(mut self, point: Point, pieces: &[Piece]) -> Self {
        self.points[point.index()] = pieces.to_vec();
        self
    }

    pub fn with_bar(mut self, kind: PieceType, pieces: &[Piece]) -> Self {
        self.bar[kind.index()] = pieces.to_vec();
        self
    }

    pub fn piece_count(&self) -> usize {
        self.placements().count()
    }
}

/// State of the game currently played inside a match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GameSnapshot {
    pub state: BoardSnapshot,
    pub has_started: bool,
    pub is_over: bool,
    /// Color whose turn it is; `None` before the first turn.
    pub turn_player: Option<PieceType>,
    pub turn_dice: Option<TurnDice>,
    pub turn_confirmed: bool,
}

impl GameSnapshot {
    pub fn is_player_turn(&self, local: PieceType) -> bool {
        self.turn_player == Some(local)
    }

    pub fn dice_was_rolled(&self) -> bool {
        self.turn_dice.as_ref().is_some_and(TurnDice::was_rolled)
    }

    pub fn has_more_moves(&self) -> bool {
        self.turn_dice.as_ref().is_some_and(TurnDice::has_more_moves)
    }
}

/// A match of several games between the same two players.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct MatchSnapshot {
    pub id: u64,
    /// Number of games the match is played to.
    pub length: u32,
    /// Score indexed by [`PieceType::index`].
    pub score: [u32; 2],
    pub is_over: bool,
    pub current_game: Option<GameSnapshot>,
}

impl MatchSnapshot {
    pub fn score_of(&self, kind: PieceType) -> u32 {
        self.score[kind.index()]
    }
}

/// Rule variant the match is played with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub name: String,
    pub title: String,
}

impl Rule {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

/// The two seats as seen from this client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Seats {
    pub local: PieceType,
    /// `false` while waiting for an opponent to join.
    #[cfg_attr(feature = "serde", serde(default = "opponent_default"))]
    pub has_opponent: bool,
}

#[cfg(feature = "serde")]
fn opponent_default() -> bool {
    true
}

impl Seats {
    pub const fn new(local: PieceType) -> Self {
        Self {
            local,
            has_opponent: true,
        }
    }

    pub const fn opponent(&self) -> Option<PieceType> {
        if self.has_opponent {
            Some(self.local.opponent())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placements_follow_point_then_bar_order() {
        let p0 = Point::new(0).unwrap();
        let board = BoardSnapshot::default()
            .with_point(p0, &[Piece::new(1, PieceType::White), Piece::new(2, PieceType::White)])
            .with_bar(PieceType::Black, &[Piece::new(3, PieceType::Black)]);

        let placed: Vec<_> = board.placements().collect();
        assert_eq!(
            placed,
            vec![
                (ContainerId::Point(p0), Piece::new(1, PieceType::White)),
                (ContainerId::Point(p0), Piece::new(2, PieceType::White)),
                (ContainerId::Bar(PieceType::Black), Piece::new(3, PieceType::Black)),
            ]
        );
    }

    #[test]
    fn game_queries_dice() {
        let game = GameSnapshot {
            turn_player: Some(PieceType::Black),
            turn_dice: Some(TurnDice::rolled(&[1, 2])),
            ..GameSnapshot::default()
        };
        assert!(game.is_player_turn(PieceType::Black));
        assert!(!game.is_player_turn(PieceType::White));
        assert!(game.dice_was_rolled());
        assert!(game.has_more_moves());
    }
}
