//! Terminal presentation adapter.
//!
//! Translates engine snapshots into a styled framebuffer and flushes it
//! with crossterm. The engine knows nothing about any of this.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
