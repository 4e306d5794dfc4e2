//! Board worker that owns the [`board_core::BoardView`].
//!
//! Receives commands from [`crate::BoardHandle`], applies them one at a time
//! and publishes events to the EventBus. A playback command is drained fully
//! before the next command is read, so pointer input arriving mid-playback
//! only ever sees a settled board.
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use board_core::{
    Action, BoardView, Controls, DiceJitter, GameResult, Geometry, JITTER_SLOTS, MatchSnapshot,
    Notice, PieceType, PointerButton, PointerOutcome, Rule, Scoreboard, Seats, VisualSlot,
};

use super::playback::PlaybackEngine;
use crate::api::{ControlButton, Intent, IntentSink, PlaybackReport, Result};
use crate::events::{BoardEvent, ControlsEvent, Event, EventBus, NoticeEvent};

/// Commands that can be sent to the board worker
pub enum Command {
    ResetBoard {
        snapshot: Box<MatchSnapshot>,
        rule: Rule,
        seats: Seats,
        reply: oneshot::Sender<Result<()>>,
    },
    SyncMatch {
        snapshot: Box<MatchSnapshot>,
        reply: oneshot::Sender<Controls>,
    },
    PlayActions {
        actions: Vec<Action>,
        generation: u64,
        reply: oneshot::Sender<Result<PlaybackReport>>,
    },
    UpdateControls {
        reply: oneshot::Sender<Controls>,
    },
    UpdateScoreboard {
        reply: oneshot::Sender<Option<Scoreboard>>,
    },
    Resize {
        geometry: Geometry,
        reply: oneshot::Sender<()>,
    },
    Pointer {
        slot: VisualSlot,
        button: PointerButton,
        reply: oneshot::Sender<Result<PointerOutcome>>,
    },
    ClickDice {
        reply: oneshot::Sender<bool>,
    },
    Control {
        button: ControlButton,
        reply: oneshot::Sender<Result<bool>>,
    },
    TurnStarted {
        reply: oneshot::Sender<()>,
    },
    GameRestarted {
        reply: oneshot::Sender<Option<Notice>>,
    },
    GameEnded {
        winner: PieceType,
        resigned: bool,
        reply: oneshot::Sender<Option<GameResult>>,
    },
    UndoAnnounced {
        reply: oneshot::Sender<()>,
    },
    QueryView {
        reply: oneshot::Sender<BoardView>,
    },
}

/// Background task that processes board commands.
pub struct BoardWorker {
    view: BoardView,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    playback: PlaybackEngine,
    intents: Arc<dyn IntentSink>,
    rng: StdRng,
}

impl BoardWorker {
    pub(crate) fn new(
        view: BoardView,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        playback: PlaybackEngine,
        intents: Arc<dyn IntentSink>,
        rng: StdRng,
    ) -> Self {
        info!(local = %view.seats().local, "BoardWorker initialized");

        Self {
            view,
            command_rx,
            event_bus,
            playback,
            intents,
            rng,
        }
    }

    /// Seeds the jitter generator from OS entropy or a fixed seed.
    pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
        debug!("BoardWorker stopped: command channel closed");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::ResetBoard {
                snapshot,
                rule,
                seats,
                reply,
            } => {
                let result = self.handle_reset(*snapshot, rule, seats);
                Self::send(reply, result, "ResetBoard");
            }
            Command::SyncMatch { snapshot, reply } => {
                self.view.sync_match(*snapshot);
                Self::send(reply, self.publish_controls(), "SyncMatch");
            }
            Command::PlayActions {
                actions,
                generation,
                reply,
            } => {
                let result = self
                    .playback
                    .play(&mut self.view, &self.event_bus, &actions, generation)
                    .await;
                Self::send(reply, result, "PlayActions");
            }
            Command::UpdateControls { reply } => {
                self.view.update_controls();
                Self::send(reply, self.publish_controls(), "UpdateControls");
            }
            Command::UpdateScoreboard { reply } => {
                Self::send(reply, self.publish_scoreboard(), "UpdateScoreboard");
            }
            Command::Resize { geometry, reply } => {
                self.view.resize(geometry);
                self.event_bus
                    .publish(Event::Board(BoardEvent::Resized { geometry }));
                Self::send(reply, (), "Resize");
            }
            Command::Pointer {
                slot,
                button,
                reply,
            } => {
                let result = self.handle_pointer(slot, button).await;
                Self::send(reply, result, "Pointer");
            }
            Command::ClickDice { reply } => {
                let rotated = self.view.rotate_dice();
                self.publish_controls();
                Self::send(reply, rotated, "ClickDice");
            }
            Command::Control { button, reply } => {
                let result = self.handle_control(button).await;
                Self::send(reply, result, "Control");
            }
            Command::TurnStarted { reply } => {
                let jitter = self.roll_jitter();
                self.view.set_jitter(jitter);
                self.publish_controls();
                Self::send(reply, (), "TurnStarted");
            }
            Command::GameRestarted { reply } => {
                let notice = self
                    .view
                    .current_match()
                    .map(|current| Notice::match_result(current, self.view.seats()));
                if let Some(notice) = &notice {
                    self.publish_notice(notice.clone());
                }
                Self::send(reply, notice, "GameRestarted");
            }
            Command::GameEnded {
                winner,
                resigned,
                reply,
            } => {
                let result = self.handle_game_end(winner, resigned);
                Self::send(reply, result, "GameEnded");
            }
            Command::UndoAnnounced { reply } => {
                self.publish_notice(Notice::undo());
                Self::send(reply, (), "UndoAnnounced");
            }
            Command::QueryView { reply } => {
                Self::send(reply, self.view.clone(), "QueryView");
            }
        }
    }

    fn send<T>(reply: oneshot::Sender<T>, value: T, command: &str) {
        if reply.send(value).is_err() {
            debug!("{command} reply channel closed (caller dropped)");
        }
    }

    fn roll_jitter(&mut self) -> DiceJitter {
        let samples: [f64; JITTER_SLOTS] = std::array::from_fn(|_| self.rng.gen_range(0.0..1.0));
        DiceJitter::from_unit_samples(samples)
    }

    fn handle_reset(&mut self, snapshot: MatchSnapshot, rule: Rule, seats: Seats) -> Result<()> {
        let jitter = self.roll_jitter();
        let result = self.view.reset(snapshot, rule, seats, jitter);

        let pieces = self.view.registry().len();
        self.event_bus.publish(Event::Board(BoardEvent::Reset {
            pieces,
            local: seats.local,
            view: Box::new(self.view.clone()),
        }));
        self.publish_controls();

        match result {
            Ok(()) => {
                info!(pieces, local = %seats.local, "board reset");
                self.publish_scoreboard();
                Ok(())
            }
            Err(error) => {
                warn!(%error, "board reset failed, board left empty");
                Err(error.into())
            }
        }
    }

    async fn handle_pointer(
        &mut self,
        slot: VisualSlot,
        button: PointerButton,
    ) -> Result<PointerOutcome> {
        let outcome = self.view.pointer(slot, button);
        if let Some(request) = outcome.request {
            debug!(piece = %request.piece, steps = request.steps, "move requested");
            self.intents.submit(Intent::from(request)).await?;
        }
        Ok(outcome)
    }

    async fn handle_control(&mut self, button: ControlButton) -> Result<bool> {
        if !self.view.controls().contains(button.required()) {
            debug!(?button, "ignoring press on hidden control");
            return Ok(false);
        }
        self.intents.submit(button.intent()).await?;
        Ok(true)
    }

    fn handle_game_end(&mut self, winner: PieceType, resigned: bool) -> Option<GameResult> {
        let current = self.view.current_match()?;
        let result = GameResult::new(current, self.view.seats().local, winner, resigned);
        info!(won = result.won, resigned, "game ended");

        self.event_bus
            .publish(Event::Notice(NoticeEvent::GameResult(result.clone())));
        if let Some(notice) = &result.notice {
            self.publish_notice(notice.clone());
        }
        Some(result)
    }

    fn publish_controls(&self) -> Controls {
        let controls = self.view.controls();
        self.event_bus
            .publish(Event::Controls(ControlsEvent::Changed {
                controls,
                dice: self.view.dice_display(),
            }));
        controls
    }

    fn publish_scoreboard(&self) -> Option<Scoreboard> {
        let scoreboard = self.view.scoreboard()?;
        self.event_bus
            .publish(Event::Controls(ControlsEvent::Scoreboard(scoreboard.clone())));
        Some(scoreboard)
    }

    fn publish_notice(&self, notice: Notice) {
        self.event_bus
            .publish(Event::Notice(NoticeEvent::Notice(notice)));
    }
}
