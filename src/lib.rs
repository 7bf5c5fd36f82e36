//! blockfall: a terminal falling-block puzzle.
//!
//! The crate is split into a pure engine and a terminal adapter:
//!
//! - [`core`]: board, pieces, collision, locking, line clears, scoring,
//!   and the session state machine. Deterministic under a seeded RNG,
//!   no I/O.
//! - [`engine`]: the drop timer and the [`engine::Session`] wrapper that
//!   drives the core over time.
//! - [`input`] / [`term`]: keyboard handling and framebuffer rendering
//!   for the terminal front end.
//! - [`trace`]: optional JSON-lines export of engine snapshots.

pub mod core;
pub mod engine;
pub mod input;
pub mod share;
pub mod term;
pub mod trace;
pub mod types;
