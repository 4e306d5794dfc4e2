//! Background task forwarding UI requests to the board in order.
//!
//! Board commands wait behind any list still playing. Forwarding them from a
//! separate task keeps the render loop drawing frames meanwhile, and a single
//! task keeps the player's requests in the order they were made.
use board_core::{BoardView, Geometry, PointerButton, VisualSlot};
use board_runtime::{BoardHandle, ControlButton, RuntimeError};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A request from the terminal UI to the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiRequest {
    Pointer {
        slot: VisualSlot,
        button: PointerButton,
    },
    ClickDice,
    Press(ControlButton),
    Resize(Geometry),
    /// Re-query the board after the mirrored copy fell out of step.
    Refresh,
}

pub struct RequestForwarder {
    handle: BoardHandle,
    requests: mpsc::Receiver<UiRequest>,
    refreshed: mpsc::Sender<BoardView>,
}

impl RequestForwarder {
    pub fn new(
        handle: BoardHandle,
        requests: mpsc::Receiver<UiRequest>,
        refreshed: mpsc::Sender<BoardView>,
    ) -> Self {
        Self {
            handle,
            requests,
            refreshed,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            match self.forward(request).await {
                Ok(()) => {}
                Err(RuntimeError::CommandChannelClosed) => {
                    debug!("board closed, request forwarder stopping");
                    break;
                }
                Err(error) => warn!(%error, ?request, "board request failed"),
            }
        }
    }

    async fn forward(&self, request: UiRequest) -> board_runtime::Result<()> {
        match request {
            UiRequest::Pointer { slot, button } => {
                let outcome = self.handle.pointer(slot, button).await?;
                debug!(?slot, ?button, request = ?outcome.request, "pointer resolved");
            }
            UiRequest::ClickDice => {
                let rotated = self.handle.click_dice().await?;
                debug!(rotated, "dice clicked");
            }
            UiRequest::Press(button) => {
                if !self.handle.press(button).await? {
                    debug!(?button, "control not available");
                }
            }
            UiRequest::Resize(geometry) => self.handle.resize_ui(geometry).await?,
            UiRequest::Refresh => {
                let view = self.handle.query_view().await?;
                if self.refreshed.send(view).await.is_err() {
                    debug!("event loop gone, dropping refreshed board");
                }
            }
        }
        Ok(())
    }
}
