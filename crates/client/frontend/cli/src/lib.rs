//! Terminal UI frontend for the backgammon board.
//!
//! This crate implements the `client_frontend_core::Frontend` trait with
//! `ratatui` and `crossterm`.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Receives a BoardHandle for communication
//! - Does NOT own the runtime
//! - Mirrors the board from events and forwards input through the handle

mod app;
mod config;
mod event;
mod input;
pub mod logging;
pub mod presentation;
mod state;

pub use app::CliFrontend;
pub use config::CliConfig;

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
