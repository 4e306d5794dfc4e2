//! CLI-specific configuration for terminal UI.
use std::env;
use std::time::Duration;

/// CLI terminal UI configuration.
///
/// This contains settings specific to the terminal interface,
/// separate from cross-frontend client configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub ui: UiConfig,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLI_MESSAGE_PANEL_HEIGHT` - Message panel height in lines (default: 6)
    /// - `CLI_FRAME_INTERVAL_MS` - Input poll and animation frame interval (default: 16)
    /// - `CLI_REQUEST_BUFFER` - Pending board requests before input is dropped (default: 16)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(height) = read_env::<u16>("CLI_MESSAGE_PANEL_HEIGHT") {
            config.ui.message_panel_height = height.max(3);
        }
        if let Some(ms) = read_env::<u64>("CLI_FRAME_INTERVAL_MS") {
            config.ui.frame_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(size) = read_env::<usize>("CLI_REQUEST_BUFFER") {
            config.ui.request_buffer = size.max(1);
        }

        config
    }
}

/// UI layout and display configuration.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Height of message panel in lines (including borders).
    pub message_panel_height: u16,
    pub frame_interval: Duration,
    pub request_buffer: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_panel_height: 6,
            frame_interval: Duration::from_millis(16),
            request_buffer: 16,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
