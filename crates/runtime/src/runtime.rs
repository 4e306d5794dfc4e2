//! High-level runtime orchestrator.
//!
//! The runtime owns the board worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the board.

use std::env;
use std::sync::Arc;

use strum::{Display, EnumString};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use board_core::{BoardView, Geometry, PieceType, Seats};

use crate::api::{BoardHandle, IntentSink, LogIntentSink, Result, RuntimeError};
use crate::events::EventBus;
use crate::workers::{BoardWorker, Command, PlaybackEngine};

/// What happens to a list still playing when a newer one is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlaybackPolicy {
    /// Every list plays fully, in request order.
    #[default]
    Queue,
    /// A newer list snaps the current one to its end state.
    Snap,
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub playback: PlaybackPolicy,
    /// Color shown at the bottom of the board until the first reset.
    pub local_color: PieceType,
    pub geometry: Geometry,
    /// Fixed seed for dice jitter. Random when unset.
    pub jitter_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            playback: PlaybackPolicy::default(),
            local_color: PieceType::White,
            geometry: Geometry::default(),
            jitter_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `BOARD_EVENT_BUFFER` - Event capacity per topic (default: 100)
    /// - `BOARD_PLAYBACK_POLICY` - `queue` or `snap` (default: queue)
    /// - `BOARD_LOCAL_COLOR` - `white` or `black` (default: white)
    /// - `BOARD_JITTER_SEED` - Fixed dice jitter seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<usize>("BOARD_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("BOARD_EVENT_BUFFER") {
            config.event_buffer_size = size.max(1);
        }
        if let Some(policy) = read_env::<PlaybackPolicy>("BOARD_PLAYBACK_POLICY") {
            config.playback = policy;
        }
        if let Some(color) = read_env::<PieceType>("BOARD_LOCAL_COLOR") {
            config.local_color = color;
        }
        config.jitter_seed = read_env::<u64>("BOARD_JITTER_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that owns the board worker
///
/// Design: Runtime owns the worker task.
/// [`BoardHandle`] provides a cloneable façade for clients.
pub struct BoardRuntime {
    handle: BoardHandle,
    worker_handle: JoinHandle<()>,
}

impl BoardRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Starts a runtime with `config` and no intent sink attached.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> BoardHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain its queue. Every cloned handle must be
    /// dropped first, otherwise the command channel stays open.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`BoardRuntime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    intents: Option<Arc<dyn IntentSink>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            intents: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the destination of move requests and control presses.
    ///
    /// Defaults to [`LogIntentSink`].
    pub fn intent_sink(mut self, sink: impl IntentSink + 'static) -> Self {
        self.intents = Some(Arc::new(sink));
        self
    }

    pub fn playback(mut self, policy: PlaybackPolicy) -> Self {
        self.config.playback = policy;
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<BoardRuntime> {
        let config = self.config;

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let (generation_tx, generation_rx) = match config.playback {
            PlaybackPolicy::Queue => (None, None),
            PlaybackPolicy::Snap => {
                let (tx, rx) = watch::channel(0u64);
                (Some(Arc::new(tx)), Some(rx))
            }
        };

        let handle = BoardHandle::new(command_tx, event_bus.clone(), generation_tx);

        let view = BoardView::new(Seats::new(config.local_color), config.geometry);
        let intents = self
            .intents
            .unwrap_or_else(|| Arc::new(LogIntentSink) as Arc<dyn IntentSink>);

        let worker = BoardWorker::new(
            view,
            command_rx,
            event_bus,
            PlaybackEngine::new(generation_rx),
            intents,
            BoardWorker::rng_from_seed(config.jitter_seed),
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        tracing::info!(policy = %config.playback, "board runtime started");

        Ok(BoardRuntime {
            handle,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_policy_parses_case_insensitively() {
        assert_eq!("snap".parse::<PlaybackPolicy>(), Ok(PlaybackPolicy::Snap));
        assert_eq!("Queue".parse::<PlaybackPolicy>(), Ok(PlaybackPolicy::Queue));
        assert!("later".parse::<PlaybackPolicy>().is_err());
        assert_eq!(PlaybackPolicy::Snap.to_string(), "snap");
    }
}
