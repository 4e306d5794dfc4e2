//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;
use board_runtime::BoardHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends communicate with the board via [`BoardHandle`]:
/// - Subscribe to events (Board, Controls, Notice)
/// - Forward pointer input and control presses
/// - Query the current board
///
/// Frontends do NOT own the runtime - they receive a handle for communication only.
///
/// # Example Implementation
///
/// ```no_run
/// use async_trait::async_trait;
/// use client_frontend_core::Frontend;
/// use board_runtime::{BoardHandle, Topic};
/// use anyhow::Result;
///
/// struct MyFrontend;
///
/// #[async_trait]
/// impl Frontend for MyFrontend {
///     async fn run(&mut self, handle: BoardHandle) -> Result<()> {
///         let mut events = handle.subscribe(Topic::Board);
///
///         while let Ok(event) = events.recv().await {
///             // Render UI, handle input, etc.
///         }
///
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop.
    ///
    /// It should block until the user quits the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, handle: BoardHandle) -> Result<()>;
}
