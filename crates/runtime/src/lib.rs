//! Runtime orchestration for the board view.
//!
//! This crate wires the pure [`board_core::BoardView`] to a single worker task,
//! a command queue and a topic-based event bus. Consumers embed
//! [`BoardRuntime`] to feed remote updates, forward pointer input and
//! subscribe to board events through [`BoardHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`session`] replays recorded remote events
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{
    BoardHandle, ChannelIntentSink, ControlButton, Intent, IntentSink, LogIntentSink,
    PlaybackReport, Result, RuntimeError,
};
pub use events::{BoardEvent, ControlsEvent, Event, EventBus, NoticeEvent, Topic};
pub use runtime::{BoardRuntime, PlaybackPolicy, RuntimeBuilder, RuntimeConfig};
pub use session::{RemoteEvent, ReplaySummary, Session};
