//! Widget modules for UI rendering.
//!
//! Each widget is a function that reads the ViewModel and renders to a
//! terminal frame without mutating anything.
pub mod board;
pub mod controls;
pub mod dice;
pub mod footer;
pub mod header;
pub mod messages;
