//! Cloneable façade for issuing commands to the board worker.
//!
//! [`BoardHandle`] hides channel plumbing and offers async helpers for every
//! board operation. All of them are queued on one command channel, so they
//! take effect in the order they were issued.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use board_core::{
    Action, BoardView, Controls, GameResult, Geometry, MatchSnapshot, Notice, PieceType,
    PointerButton, PointerOutcome, Rule, Scoreboard, Seats, VisualSlot,
};

use super::errors::{Result, RuntimeError};
use super::intents::ControlButton;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Summary of one played action list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Actions whose end state was applied.
    pub applied: usize,
    /// A newer list preempted this one and the rest was applied instantly.
    pub fast_forwarded: bool,
}

/// Client-facing handle to interact with the board
#[derive(Clone)]
pub struct BoardHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    /// Present under the snap playback policy.
    generation: Option<Arc<watch::Sender<u64>>>,
}

impl BoardHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        generation: Option<Arc<watch::Sender<u64>>>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            generation,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Destroys every piece and rebuilds the board from a full snapshot.
    pub async fn reset_board(&self, snapshot: MatchSnapshot, rule: Rule, seats: Seats) -> Result<()> {
        self.request(|reply| Command::ResetBoard {
            snapshot: Box::new(snapshot),
            rule,
            seats,
            reply,
        })
        .await?
    }

    /// Replaces the authoritative match (turn, dice, score) without moving
    /// pieces, then recomputes controls.
    pub async fn sync_match(&self, snapshot: MatchSnapshot) -> Result<Controls> {
        self.request(|reply| Command::SyncMatch {
            snapshot: Box::new(snapshot),
            reply,
        })
        .await
    }

    /// Plays one move's actions and resolves once the last one has landed.
    ///
    /// Under the snap policy, issuing a new list fast-forwards any list still
    /// playing or queued.
    pub async fn play_actions(&self, actions: Vec<Action>) -> Result<PlaybackReport> {
        let mut generation = 0;
        if let Some(tx) = &self.generation {
            tx.send_modify(|current| {
                *current += 1;
                generation = *current;
            });
        }

        self.request(|reply| Command::PlayActions {
            actions,
            generation,
            reply,
        })
        .await?
    }

    pub async fn update_controls(&self) -> Result<Controls> {
        self.request(|reply| Command::UpdateControls { reply }).await
    }

    /// Publishes the scoreboard. `None` while no game is active.
    pub async fn update_scoreboard(&self) -> Result<Option<Scoreboard>> {
        self.request(|reply| Command::UpdateScoreboard { reply })
            .await
    }

    pub async fn resize_ui(&self, geometry: Geometry) -> Result<()> {
        self.request(|reply| Command::Resize { geometry, reply })
            .await
    }

    /// Resolves a pointer press and forwards any move request to the intent
    /// sink.
    pub async fn pointer(&self, slot: VisualSlot, button: PointerButton) -> Result<PointerOutcome> {
        self.request(|reply| Command::Pointer {
            slot,
            button,
            reply,
        })
        .await?
    }

    /// Swaps dice order. Returns `false` when no moves are left.
    pub async fn click_dice(&self) -> Result<bool> {
        self.request(|reply| Command::ClickDice { reply }).await
    }

    /// Forwards a control button press. Returns `false` when the button is
    /// hidden.
    pub async fn press(&self, button: ControlButton) -> Result<bool> {
        self.request(|reply| Command::Control { button, reply })
            .await?
    }

    /// Re-randomizes the dice jitter for a new turn.
    pub async fn turn_started(&self) -> Result<()> {
        self.request(|reply| Command::TurnStarted { reply }).await
    }

    /// Announces the match standing when a new game starts.
    pub async fn game_restarted(&self) -> Result<Option<Notice>> {
        self.request(|reply| Command::GameRestarted { reply })
            .await
    }

    pub async fn game_ended(&self, winner: PieceType, resigned: bool) -> Result<Option<GameResult>> {
        self.request(|reply| Command::GameEnded {
            winner,
            resigned,
            reply,
        })
        .await
    }

    /// Announces that the other player took back their last move.
    pub async fn undo_announced(&self) -> Result<()> {
        self.request(|reply| Command::UndoAnnounced { reply })
            .await
    }

    /// Query the current view state (read-only snapshot)
    pub async fn query_view(&self) -> Result<BoardView> {
        self.request(|reply| Command::QueryView { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Board` - Resets, flights and landings
    /// - `Topic::Controls` - Control visibility, dice and scoreboard
    /// - `Topic::Notice` - Notices and game results
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
