//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, playback and reset so clients can
//! bubble them up with consistent context.
use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::oneshot;

use board_core::{InvalidActionError, RegistryError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("board worker command channel closed")]
    CommandChannelClosed,

    #[error("board worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("board worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("intent sink closed")]
    IntentSinkClosed,

    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to read session file {path}")]
    SessionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse session file {path}")]
    SessionFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
