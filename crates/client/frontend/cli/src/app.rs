//! Glue code tying the board handle and terminal UI together.
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use board_runtime::{BoardHandle, Topic};

use crate::config::CliConfig;
use crate::event::{CliEventConsumer, EventLoop};
use crate::input::{RequestForwarder, UiRequest};
use crate::presentation::terminal;
use client_frontend_core::{Frontend, FrontendConfig, message::MessageLog, view_model::ViewModel};

/// Terminal frontend drawing the board and forwarding mouse and key input.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
        }
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: BoardHandle) -> Result<()> {
        tracing::info!("CLI frontend starting...");

        // Subscribe before the first query so no event falls between the two.
        let subscriptions =
            handle.subscribe_multiple(&[Topic::Board, Topic::Controls, Topic::Notice]);
        let initial = handle.query_view().await?;

        let mut messages = MessageLog::new(self.frontend_config.messages.capacity);
        messages.push_text(format!("Welcome. You play {}.", initial.seats().local));
        let consumer = CliEventConsumer::new(messages, self.frontend_config.messages.clone());

        let (request_tx, request_rx) =
            mpsc::channel::<UiRequest>(self.cli_config.ui.request_buffer);
        let (refreshed_tx, refreshed_rx) = mpsc::channel(1);
        let forwarder = RequestForwarder::new(handle, request_rx, refreshed_tx);
        let forwarder_task = tokio::spawn(forwarder.run());

        let event_loop = EventLoop::new(
            subscriptions,
            request_tx,
            refreshed_rx,
            consumer,
            ViewModel::from_view(initial),
            self.cli_config.clone(),
        );

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let result = event_loop.run(&mut terminal).await;

        forwarder_task.abort();
        let _ = forwarder_task.await;

        terminal::restore()?;
        tracing::info!("CLI frontend exiting");

        result.map(|_consumer| ())
    }
}
