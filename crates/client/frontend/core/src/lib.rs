//! Cross-frontend primitives for presenting the board.
//!
//! Houses message logging, event handling, and the view model that both the
//! terminal client and future graphical clients can reuse.
pub mod config;
pub mod event;
pub mod frontend;
pub mod message;
pub mod services;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig};
pub use event::{EventConsumer, EventImpact};
pub use frontend::Frontend;
pub use services::{UpdateScope, ViewModelUpdater};
pub use view_model::{ActiveFlight, Banner, StackedPiece, ViewModel};
