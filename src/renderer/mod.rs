//! Frame output
//!
//! Renderers are stateless with respect to the simulation: they get one
//! [`Snapshot`] per tick and paint it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use text::TextRenderer;

use crate::sim::Snapshot;

/// Anything that can paint a frame
pub trait Renderer {
    fn draw(&mut self, frame: &Snapshot);
}

/// Score line shown above the court
pub fn score_line(frame: &Snapshot) -> String {
    format!("Player: {} | AI: {}", frame.score.player, frame.score.ai)
}

/// Overlay text while waiting for a key
pub const START_PROMPT: &str = "PRESS ANY KEY";
