//! Services that keep the view model in step with the runtime.
mod updater;

pub use updater::{UpdateScope, ViewModelUpdater};
