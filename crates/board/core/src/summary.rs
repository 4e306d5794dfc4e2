//! Scoreboard text and score notices.
use std::time::Duration;

use crate::piece::PieceType;
use crate::snapshot::{MatchSnapshot, Rule, Seats};

/// Default display time of a notice.
pub const NOTICE_TIMEOUT: Duration = Duration::from_millis(3000);
/// Display time of the match result shown on game restart.
pub const RESULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Tone of a notice, used to color it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeTone {
    Info,
    Positive,
    Negative,
}

/// A short message for the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: NoticeTone,
    pub timeout: Duration,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: NoticeTone::Info,
            timeout: NOTICE_TIMEOUT,
        }
    }

    /// Announces that the other player took back their last move.
    pub fn undo() -> Self {
        Self::info("Player undid last move.")
    }

    /// Match standing announced when a new game of the match starts.
    pub fn match_result(current: &MatchSnapshot, seats: Seats) -> Self {
        let yours = current.score_of(seats.local);
        let theirs = current.score_of(seats.local.opponent());
        let tone = match yours.cmp(&theirs) {
            std::cmp::Ordering::Greater => NoticeTone::Positive,
            std::cmp::Ordering::Less => NoticeTone::Negative,
            std::cmp::Ordering::Equal => NoticeTone::Info,
        };
        Self {
            text: format!("Match result: You {yours} / {theirs} Opponent"),
            tone,
            timeout: RESULT_TIMEOUT,
        }
    }
}

/// Scoreboard fields shown above the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub match_text: String,
    pub match_title: String,
    pub your_score: String,
    /// Empty while there is no opponent.
    pub opponent_score: String,
}

impl Scoreboard {
    /// Builds the scoreboard, or `None` when no game is active.
    pub fn build(current: &MatchSnapshot, rule: &Rule, seats: Seats) -> Option<Self> {
        current.current_game.as_ref()?;

        Some(Self {
            match_text: format!("Match \"{}\", {}/{}", rule.title, current.length, current.length),
            match_title: format!(
                "Playing match with length of {} games and rule \"{}\"",
                current.length, rule.title
            ),
            your_score: current.score_of(seats.local).to_string(),
            opponent_score: seats
                .opponent()
                .map(|kind| current.score_of(kind).to_string())
                .unwrap_or_default(),
        })
    }
}

/// Outcome banner shown when a game ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub won: bool,
    pub message: String,
    /// "Match standing" or "Match result" once the match is over.
    pub heading: &'static str,
    pub your_score: u32,
    pub opponent_score: u32,
    /// Extra notice when the other player resigned.
    pub notice: Option<Notice>,
}

impl GameResult {
    pub fn new(current: &MatchSnapshot, local: PieceType, winner: PieceType, resigned: bool) -> Self {
        let won = winner == local;
        let mut message = match (resigned, won) {
            (true, true) => "Other player resigned!",
            (true, false) => "You resigned.",
            (false, true) => "You WON!",
            (false, false) => "You lost.",
        }
        .to_string();

        let heading = if current.is_over {
            message.push_str(" Match is over.");
            "Match result"
        } else {
            "Match standing"
        };

        Self {
            won,
            message,
            heading,
            your_score: current.score_of(local),
            opponent_score: current.score_of(local.opponent()),
            notice: (resigned && won).then(|| Notice::info("Other player resigned from game")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::GameSnapshot;

    fn live_match(score: [u32; 2]) -> MatchSnapshot {
        MatchSnapshot {
            id: 7,
            length: 5,
            score,
            is_over: false,
            current_game: Some(GameSnapshot::default()),
        }
    }

    #[test]
    fn scoreboard_uses_local_perspective() {
        let rule = Rule::new("RuleBgCasual", "Casual");
        let board = Scoreboard::build(&live_match([1, 3]), &rule, Seats::new(PieceType::Black)).unwrap();
        assert_eq!(board.match_text, "Match \"Casual\", 5/5");
        assert_eq!(board.your_score, "3");
        assert_eq!(board.opponent_score, "1");

        let waiting = Seats {
            local: PieceType::White,
            has_opponent: false,
        };
        let board = Scoreboard::build(&live_match([1, 3]), &rule, waiting).unwrap();
        assert_eq!(board.opponent_score, "");
    }

    #[test]
    fn scoreboard_requires_active_game() {
        let idle = MatchSnapshot::default();
        assert!(Scoreboard::build(&idle, &Rule::default(), Seats::new(PieceType::White)).is_none());
    }

    #[test]
    fn match_result_tone_compares_scores() {
        let seats = Seats::new(PieceType::White);
        assert_eq!(Notice::match_result(&live_match([2, 1]), seats).tone, NoticeTone::Positive);
        assert_eq!(Notice::match_result(&live_match([0, 1]), seats).tone, NoticeTone::Negative);
        let even = Notice::match_result(&live_match([1, 1]), seats);
        assert_eq!(even.tone, NoticeTone::Info);
        assert_eq!(even.text, "Match result: You 1 / 1 Opponent");
        assert_eq!(even.timeout, RESULT_TIMEOUT);
    }

    #[test]
    fn game_result_describes_resignation_and_match_end() {
        let mut finished = live_match([3, 1]);
        finished.is_over = true;
        let result = GameResult::new(&finished, PieceType::White, PieceType::White, true);
        assert_eq!(result.message, "Other player resigned! Match is over.");
        assert_eq!(result.heading, "Match result");
        assert!(result.notice.is_some());

        let result = GameResult::new(&live_match([0, 1]), PieceType::White, PieceType::Black, false);
        assert_eq!(result.message, "You lost.");
        assert_eq!(result.heading, "Match standing");
        assert!(!result.won);

        let result = GameResult::new(&live_match([0, 1]), PieceType::White, PieceType::Black, true);
        assert_eq!(result.message, "You resigned.");
        assert!(result.notice.is_none());
    }
}
