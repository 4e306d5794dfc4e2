//! Outbound requests to the remote game authority.
//!
//! The board never changes its own state in response to input. Pointer
//! presses and control buttons become [`Intent`]s handed to an
//! [`IntentSink`]; the authority answers later with actions or a new snapshot.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use board_core::{Controls, MoveRequest, PieceId};

use super::errors::{Result, RuntimeError};

/// A request sent to the remote authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Move { piece: PieceId, steps: u8 },
    Roll,
    Confirm,
    Undo,
    ResignGame,
    ResignMatch,
}

impl From<MoveRequest> for Intent {
    fn from(request: MoveRequest) -> Self {
        Intent::Move {
            piece: request.piece,
            steps: request.steps,
        }
    }
}

/// Buttons and menu entries of the control bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Roll,
    Confirm,
    Undo,
    /// Undo entry of the game menu, usable mid-turn.
    MenuUndo,
    ResignGame,
    ResignMatch,
}

impl ControlButton {
    /// Visibility flag that must be set for the button to be usable.
    pub fn required(self) -> Controls {
        match self {
            ControlButton::Roll => Controls::ROLL,
            ControlButton::Confirm => Controls::CONFIRM,
            ControlButton::Undo => Controls::UNDO,
            ControlButton::MenuUndo => Controls::MENU_UNDO,
            ControlButton::ResignGame | ControlButton::ResignMatch => Controls::RESIGN,
        }
    }

    pub fn intent(self) -> Intent {
        match self {
            ControlButton::Roll => Intent::Roll,
            ControlButton::Confirm => Intent::Confirm,
            ControlButton::Undo | ControlButton::MenuUndo => Intent::Undo,
            ControlButton::ResignGame => Intent::ResignGame,
            ControlButton::ResignMatch => Intent::ResignMatch,
        }
    }
}

/// Destination for intents.
///
/// Different implementations can handle:
/// - A live connection to the game service
/// - A channel drained by the embedding application
/// - Logging only, for replays and tests
#[async_trait]
pub trait IntentSink: Send + Sync {
    /// Hands `intent` to the authority. Delivery is fire-and-forget: the
    /// board does not wait for the authority's answer.
    async fn submit(&self, intent: Intent) -> Result<()>;
}

/// Forwards intents into a tokio channel.
///
/// The board worker never waits on the receiver. When the buffer is full the
/// intent is dropped and logged.
#[derive(Clone)]
pub struct ChannelIntentSink {
    tx: mpsc::Sender<Intent>,
}

impl ChannelIntentSink {
    pub fn new(tx: mpsc::Sender<Intent>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiver that drains it.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Intent>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl IntentSink for ChannelIntentSink {
    async fn submit(&self, intent: Intent) -> Result<()> {
        match self.tx.try_send(intent) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(intent)) => {
                warn!(?intent, "intent channel full, dropping intent");
                Ok(())
            }
            Err(TrySendError::Closed(_)) => Err(RuntimeError::IntentSinkClosed),
        }
    }
}

/// Sink that only records intents in the log.
/// Useful for session replays where no authority is listening.
pub struct LogIntentSink;

#[async_trait]
impl IntentSink for LogIntentSink {
    async fn submit(&self, intent: Intent) -> Result<()> {
        tracing::info!(?intent, "intent dropped: no authority attached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_undo_and_undo_share_intent() {
        assert_eq!(ControlButton::Undo.intent(), Intent::Undo);
        assert_eq!(ControlButton::MenuUndo.intent(), Intent::Undo);
        assert_eq!(ControlButton::MenuUndo.required(), Controls::MENU_UNDO);
        assert_eq!(ControlButton::ResignMatch.required(), Controls::RESIGN);
    }

    #[test]
    fn intents_serialize_with_type_tag() {
        let json = serde_json::to_string(&Intent::Move {
            piece: PieceId(7),
            steps: 5,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"move","piece":7,"steps":5}"#);
    }

    #[tokio::test]
    async fn channel_sink_reports_closed_receiver() {
        let (sink, rx) = ChannelIntentSink::channel(1);
        drop(rx);
        assert!(matches!(
            sink.submit(Intent::Roll).await,
            Err(RuntimeError::IntentSinkClosed)
        ));
    }

    #[tokio::test]
    async fn full_channel_drops_instead_of_waiting() {
        let (sink, mut rx) = ChannelIntentSink::channel(1);
        sink.submit(Intent::Roll).await.unwrap();
        sink.submit(Intent::Confirm).await.unwrap();

        assert_eq!(rx.recv().await, Some(Intent::Roll));
        assert!(rx.try_recv().is_err());
    }
}
