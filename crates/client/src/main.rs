//! Backgammon board client binary.
//!
//! This binary is the composition root that assembles:
//! 1. The board runtime via RuntimeBuilder
//! 2. The terminal frontend
//! 3. Optionally, a recorded session standing in for the game service
//!
//! ```bash
//! BOARD_SESSION=demos/opening.json cargo run -p board-client
//! ```

use anyhow::{Context, Result};
use board_client::Client;
use board_runtime::{BoardRuntime, RuntimeConfig, Session};
use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let runtime_config = RuntimeConfig::from_env();
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();
    let session_path = std::env::var_os("BOARD_SESSION");

    // 2. Setup logging
    let _log_guard = logging::setup_logging()?;

    tracing::info!("Starting board client");
    tracing::info!("Playback policy: {}", runtime_config.playback);

    // 3. Load the session before touching the terminal so errors stay readable
    let session = session_path
        .map(|path| {
            Session::load(&path)
                .with_context(|| format!("Failed to load session {}", path.to_string_lossy()))
        })
        .transpose()?;
    if session.is_none() {
        tracing::warn!("BOARD_SESSION not set, the board will stay empty");
    }

    // 4. Build Runtime (independent layer)
    let runtime = BoardRuntime::builder().config(runtime_config).build().await?;

    // 5. Build Frontend (independent layer)
    let frontend = CliFrontend::new(frontend_config, cli_config);

    // 6. Build Client (composition layer)
    let mut builder = Client::builder().runtime(runtime).frontend(frontend);
    if let Some(session) = session {
        builder = builder.session(session);
    }
    let client = builder.build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
