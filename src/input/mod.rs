//! Input module - keyboard handling for the terminal front end.

pub mod handler;

pub use handler::{map_key, should_quit, InputHandler};
