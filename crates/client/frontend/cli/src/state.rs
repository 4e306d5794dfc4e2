//! Application state for UI context that is not part of the board.

use board_core::Geometry;

use crate::presentation::layout::BoardRects;

/// Mutable application state tracking layout and overlays.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Board rectangles from the last render, used for mouse hit-testing.
    pub board: Option<BoardRects>,
    /// Geometry last sent to the runtime.
    pub geometry: Option<Geometry>,
    /// Key help overlay.
    pub show_help: bool,
    /// Input requests dropped because the board was busy.
    pub dropped_inputs: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores freshly computed rectangles. Returns the geometry to send to
    /// the runtime when it differs from the last one sent.
    pub fn update_layout(&mut self, rects: BoardRects) -> Option<Geometry> {
        self.board = Some(rects);
        let geometry = rects.geometry();
        if self.geometry == Some(geometry) {
            return None;
        }
        self.geometry = Some(geometry);
        Some(geometry)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
