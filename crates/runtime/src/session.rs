//! Recorded sessions of remote events.
//!
//! A session file is a JSON document listing what the game service pushed to
//! a client: resets, action lists, turn and game notifications. Replaying it
//! through a [`BoardHandle`] drives the board exactly like a live connection.
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use board_core::{Action, MatchSnapshot, PieceType, Rule, Seats};

use crate::api::{BoardHandle, Result, RuntimeError};

/// One message from the game service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RemoteEvent {
    /// Full-state snapshot.
    Reset {
        #[serde(rename = "match")]
        snapshot: MatchSnapshot,
        #[serde(default)]
        rule: Rule,
        seats: Seats,
    },
    /// One player move, optionally followed by the resulting match state.
    Actions {
        actions: Vec<Action>,
        #[serde(default, rename = "match")]
        after: Option<MatchSnapshot>,
    },
    /// Turn, dice or score change without piece movement.
    Sync {
        #[serde(rename = "match")]
        snapshot: MatchSnapshot,
    },
    TurnStarted,
    GameRestarted,
    GameEnded {
        winner: PieceType,
        #[serde(default)]
        resigned: bool,
    },
    Undo,
    /// Idle time between events, in milliseconds.
    Pause { ms: u64 },
}

/// A recorded session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub title: String,
    pub events: Vec<RemoteEvent>,
}

/// Counts gathered while replaying a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub actions: usize,
    /// Action lists that stopped at an invalid action.
    pub rejected: usize,
}

impl Session {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads and parses a session file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RuntimeError::SessionIo {
            path: path.to_path_buf(),
            source,
        })?;
        let session = Self::from_json(&json).map_err(|source| RuntimeError::SessionFormat {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), events = session.events.len(), "session loaded");
        Ok(session)
    }

    /// Feeds every event to `handle` in order.
    ///
    /// A rejected action list is logged and skipped, the way a live client
    /// waits for the next snapshot. Channel failures abort the replay.
    pub async fn replay(&self, handle: &BoardHandle) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for event in &self.events {
            debug!(?event, "replaying");
            summary.events += 1;

            match event {
                RemoteEvent::Reset {
                    snapshot,
                    rule,
                    seats,
                } => {
                    handle
                        .reset_board(snapshot.clone(), rule.clone(), *seats)
                        .await?;
                }
                RemoteEvent::Actions { actions, after } => {
                    match handle.play_actions(actions.clone()).await {
                        Ok(report) => summary.actions += report.applied,
                        Err(RuntimeError::InvalidAction(error)) => {
                            warn!(%error, "session action list rejected");
                            summary.actions += error.index;
                            summary.rejected += 1;
                        }
                        Err(other) => return Err(other),
                    }
                    if let Some(after) = after {
                        handle.sync_match(after.clone()).await?;
                        handle.update_scoreboard().await?;
                    }
                }
                RemoteEvent::Sync { snapshot } => {
                    handle.sync_match(snapshot.clone()).await?;
                    handle.update_scoreboard().await?;
                }
                RemoteEvent::TurnStarted => handle.turn_started().await?,
                RemoteEvent::GameRestarted => {
                    handle.game_restarted().await?;
                }
                RemoteEvent::GameEnded { winner, resigned } => {
                    handle.game_ended(*winner, *resigned).await?;
                }
                RemoteEvent::Undo => handle.undo_announced().await?,
                RemoteEvent::Pause { ms } => {
                    tokio::time::sleep(Duration::from_millis(*ms)).await;
                }
            }
        }

        info!(
            events = summary.events,
            actions = summary.actions,
            rejected = summary.rejected,
            "session replay finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::{ActionKind, PieceId};

    #[test]
    fn parses_tagged_events() {
        let session = Session::from_json(
            r#"{
                "title": "opening",
                "events": [
                    {"event": "reset", "match": {"length": 3}, "seats": {"local": "black"}},
                    {"event": "actions", "actions": [{"type": "move", "piece": 4, "to": 7}]},
                    {"event": "game_ended", "winner": "white"},
                    {"event": "pause", "ms": 250}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(session.events.len(), 4);
        let RemoteEvent::Reset { snapshot, seats, .. } = &session.events[0] else {
            panic!("expected reset");
        };
        assert_eq!(snapshot.length, 3);
        assert!(seats.has_opponent);
        assert_eq!(seats.local, PieceType::Black);

        let RemoteEvent::Actions { actions, after } = &session.events[1] else {
            panic!("expected actions");
        };
        assert_eq!(actions[0].kind, ActionKind::Move);
        assert_eq!(actions[0].piece, PieceId(4));
        assert!(after.is_none());

        assert_eq!(
            session.events[2],
            RemoteEvent::GameEnded {
                winner: PieceType::White,
                resigned: false
            }
        );
    }

    #[test]
    fn rejects_unknown_event() {
        assert!(Session::from_json(r#"{"events": [{"event": "teleport"}]}"#).is_err());
    }
}
