//! Worker tasks that back the runtime orchestration.
//!
//! The board worker serializes every command against the view; the playback
//! engine runs inside it so action lists never interleave with other input.

mod board;
mod playback;

pub use board::{BoardWorker, Command};
pub(crate) use playback::PlaybackEngine;
