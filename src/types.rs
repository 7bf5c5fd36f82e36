//! Core types shared across the application
//! This module contains pure data types with no heavy dependencies

use serde::Serialize;

/// Default board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity timing (milliseconds): the drop interval starts at
/// `BASE_DROP_MS` and shrinks by `DROP_STEP_MS` per level, never
/// below `DROP_INTERVAL_MIN_MS`.
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_STEP_MS: u32 = 100;
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Input pump cadence for the terminal front end (~60 FPS)
pub const TICK_MS: u32 = 16;

/// DAS/ARR timing for held keys (milliseconds)
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Points awarded per simultaneous line clear, before the level
/// multiplier. Index is the number of lines (1-4).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Tetromino piece kinds
///
/// The kind doubles as the opaque color identifier stored in board
/// cells; the presentation layer owns the kind-to-color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in base-shape table order. The generator indexes
    /// into this array, so the order is part of seed determinism.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Commands accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    /// Soft drop and the gravity tick are the same operation.
    MoveDown,
    HardDrop,
    RotateCw,
    TogglePause,
    Reset,
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;
