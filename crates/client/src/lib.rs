//! Top-level client orchestrating the board runtime, a frontend and the
//! remote event feed.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ BoardRuntime (board worker, command queue, event bus)
//!   ├─→ Frontend (UI layer - CLI, GUI, etc.)
//!   └─→ Session (Optional - recorded remote events replayed as the game service)
//! ```
//!
//! # Separation of Concerns
//!
//! - **Client**: Composition root, lifecycle management, layer coordination
//! - **Runtime**: Board state, playback, event emission
//! - **Frontend**: User interaction, event consumption, rendering (via BoardHandle only)
//! - **Session**: Stand-in for the game service (via BoardHandle only)

mod builder;

pub use builder::ClientBuilder;

// Re-export Frontend trait from client-frontend-core
pub use client_frontend_core::Frontend;

use anyhow::Result;
use board_runtime::{BoardRuntime, Session};

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. Client::builder() collects the layers
/// 2. Client::run() starts replaying the session in the background
/// 3. Client::run() transfers control to the frontend until the user quits
/// 4. On frontend exit, the replay is stopped and the runtime shut down
pub struct Client {
    runtime: BoardRuntime,
    frontend: Box<dyn Frontend>,
    session: Option<Session>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the client until the frontend returns.
    ///
    /// # Errors
    ///
    /// Returns the frontend's error, or a runtime shutdown failure.
    pub async fn run(self) -> Result<()> {
        let handle = self.runtime.handle();

        let feed_task = self.session.map(|session| {
            let feed_handle = handle.clone();
            tokio::spawn(async move {
                tracing::info!(title = %session.title, "replaying session");
                match session.replay(&feed_handle).await {
                    Ok(summary) => tracing::info!(
                        events = summary.events,
                        actions = summary.actions,
                        rejected = summary.rejected,
                        "session replay finished"
                    ),
                    Err(e) => tracing::error!("Session replay error: {}", e),
                }
            })
        });

        // Run frontend (blocks until user quits)
        let mut frontend = self.frontend;
        let frontend_result = frontend.run(handle).await;

        // Cleanup
        if let Some(task) = feed_task {
            task.abort();
            let _ = task.await;
        }
        drop(frontend);
        self.runtime.shutdown().await?;

        frontend_result
    }
}
