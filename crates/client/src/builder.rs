//! Client builder with dependency injection pattern.

use crate::{Client, Frontend};
use anyhow::{Context, Result};
use board_runtime::{BoardRuntime, Session};

/// Builder for constructing a Client with proper validation.
///
/// Runtime and frontend are required; the session feed is optional.
#[derive(Default)]
pub struct ClientBuilder {
    runtime: Option<BoardRuntime>,
    frontend: Option<Box<dyn Frontend>>,
    session: Option<Session>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime (required).
    pub fn runtime(mut self, runtime: BoardRuntime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Set the frontend (required).
    ///
    /// The frontend handles UI rendering and user input. It receives a
    /// BoardHandle for communication with the board.
    pub fn frontend(mut self, frontend: impl Frontend + 'static) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// Set a recorded session to replay as the game service (optional).
    ///
    /// Without one the board stays empty until something else drives the
    /// handle.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or the frontend is not set.
    pub fn build(self) -> Result<Client> {
        let runtime = self
            .runtime
            .context("Runtime is required. Use .runtime() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client {
            runtime,
            frontend,
            session: self.session,
        })
    }
}
