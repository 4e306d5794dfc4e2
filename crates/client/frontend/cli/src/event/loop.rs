//! Event loop orchestrating runtime events, user input, and rendering.
//!
//! This module coordinates three main concerns:
//! - Runtime event consumption and ViewModel updates (via ViewModelUpdater)
//! - Mouse and keyboard input, forwarded to the board without waiting
//! - Rendering at the frame interval while a piece is in flight

use std::{collections::HashMap, time::Instant};

use anyhow::{Context, Result};
use board_core::BoardView;
use board_runtime::{BoardEvent, Event as RuntimeEvent, Topic};
use tokio::{
    sync::{broadcast, broadcast::error::RecvError, mpsc},
    time,
};
use tracing::{debug, warn};

use crate::{
    config::CliConfig,
    input::{InputHandler, UiRequest},
    presentation::terminal::Tui,
    state::AppState,
};
use client_frontend_core::{EventConsumer, services::ViewModelUpdater, view_model::ViewModel};

/// Event loop managing ViewModel state and coordinating UI updates.
///
/// The loop owns the ViewModel and never awaits the board worker. Requests go
/// to a [`crate::input::RequestForwarder`] through `requests`; re-queried
/// boards come back through `refreshed`.
pub struct EventLoop<C>
where
    C: EventConsumer,
{
    pub(crate) subscriptions: HashMap<Topic, broadcast::Receiver<RuntimeEvent>>,
    pub(crate) requests: mpsc::Sender<UiRequest>,
    pub(crate) refreshed: mpsc::Receiver<BoardView>,
    pub(crate) input: InputHandler,
    pub(crate) consumer: C,
    pub(crate) app_state: AppState,
    /// Owned ViewModel - incrementally updated via ViewModelUpdater
    pub(crate) view_model: ViewModel,
    /// Set once a refresh has been requested and not yet answered.
    pub(crate) refresh_pending: bool,
    pub(crate) cli_config: CliConfig,
}

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    pub fn new(
        subscriptions: HashMap<Topic, broadcast::Receiver<RuntimeEvent>>,
        requests: mpsc::Sender<UiRequest>,
        refreshed: mpsc::Receiver<BoardView>,
        consumer: C,
        view_model: ViewModel,
        cli_config: CliConfig,
    ) -> Self {
        Self {
            subscriptions,
            requests,
            refreshed,
            input: InputHandler::new(),
            consumer,
            app_state: AppState::new(),
            view_model,
            refresh_pending: false,
            cli_config,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<C> {
        self.render(terminal)?;

        let mut board_rx = self
            .subscriptions
            .remove(&Topic::Board)
            .context("Board topic subscription is required")?;
        let mut controls_rx = self
            .subscriptions
            .remove(&Topic::Controls)
            .context("Controls topic subscription is required")?;
        let mut notice_rx = self
            .subscriptions
            .remove(&Topic::Notice)
            .context("Notice topic subscription is required")?;

        let frame_interval = self.cli_config.ui.frame_interval;

        loop {
            tokio::select! {
                result = board_rx.recv() => {
                    if self.handle_runtime_event(result, terminal)? {
                        break;
                    }
                }
                result = controls_rx.recv() => {
                    if self.handle_runtime_event(result, terminal)? {
                        break;
                    }
                }
                result = notice_rx.recv() => {
                    if self.handle_runtime_event(result, terminal)? {
                        break;
                    }
                }
                Some(view) = self.refreshed.recv() => {
                    debug!("board re-queried after losing step");
                    self.view_model.replace_board(view);
                    self.refresh_pending = false;
                    self.render(terminal)?;
                }
                _ = time::sleep(frame_interval) => {
                    if self.handle_input_tick(terminal)? {
                        break;
                    }
                }
            }
        }

        Ok(self.consumer)
    }

    /// Handle runtime event and update ViewModel incrementally.
    fn handle_runtime_event(
        &mut self,
        result: Result<RuntimeEvent, RecvError>,
        terminal: &mut Tui,
    ) -> Result<bool> {
        match result {
            Ok(event) => {
                let impact = self.consumer.on_event(&event);
                let scope = ViewModelUpdater::update(&mut self.view_model, &event, Instant::now());

                let list_done = matches!(
                    event,
                    RuntimeEvent::Board(
                        BoardEvent::PlaybackFinished { .. } | BoardEvent::PlaybackFailed { .. }
                    )
                );
                if list_done && self.view_model.stale {
                    self.request_refresh();
                }

                if impact.requires_redraw || !scope.is_empty() {
                    self.render(terminal)?;
                }
                Ok(false)
            }
            Err(RecvError::Closed) => {
                warn!("Event stream closed");
                Ok(true)
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Dropped board events, re-querying the board");
                self.view_model.stale = true;
                self.request_refresh();
                Ok(false)
            }
        }
    }

    fn request_refresh(&mut self) {
        if self.refresh_pending {
            return;
        }
        // Queued behind any list still playing, so the answer is the settled board.
        self.refresh_pending = self.submit(UiRequest::Refresh);
    }

    /// Hands a request to the forwarder without waiting. Returns whether it
    /// was queued.
    pub(in crate::event) fn submit(&mut self, request: UiRequest) -> bool {
        match self.requests.try_send(request) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(request)) => {
                self.app_state.dropped_inputs += 1;
                debug!(?request, "board busy, dropping input");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("request forwarder stopped");
                false
            }
        }
    }
}
