//! Core module - pure game logic with no I/O dependencies
//!
//! Board representation, piece shapes and rotation, collision, locking,
//! line clears, scoring, and the session state machine live here.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use board::{Board, SizeError};
pub use game_state::{FallingPiece, GameState, LockEvent};
pub use pieces::{base_shape, Shape};
pub use rng::{PieceGenerator, SimpleRng};
pub use snapshot::GameSnapshot;
