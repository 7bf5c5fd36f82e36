//! Engine state snapshot handed to presentation layers.
//!
//! A snapshot is everything a renderer needs after a mutating command,
//! with no reference back into the engine. It also serializes as one
//! JSON record per mutation for the session trace.

use serde::Serialize;

use crate::core::game_state::{FallingPiece, GameState};
use crate::core::pieces::Shape;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<FallingPiece> for PieceSnapshot {
    fn from(value: FallingPiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board_width: u8,
    pub board_height: u8,
    /// Row-major cells: 0 = empty, 1-7 = piece kinds in table order.
    pub board: Vec<u8>,
    pub active: PieceSnapshot,
    pub next: PieceSnapshot,
    pub ghost_y: i8,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
}

fn cell_code(cell: Option<PieceKind>) -> u8 {
    match cell {
        None => 0,
        Some(PieceKind::I) => 1,
        Some(PieceKind::J) => 2,
        Some(PieceKind::L) => 3,
        Some(PieceKind::O) => 4,
        Some(PieceKind::S) => 5,
        Some(PieceKind::T) => 6,
        Some(PieceKind::Z) => 7,
    }
}

impl GameSnapshot {
    /// Refill from the engine, reusing the board allocation.
    pub fn fill_from(&mut self, state: &GameState) {
        let board = state.board();
        self.board_width = board.width();
        self.board_height = board.height();
        self.board.clear();
        self.board.extend(board.cells().iter().map(|c| cell_code(*c)));

        self.active = state.active().into();
        self.next = state.next_piece().into();
        self.ghost_y = state.ghost_y();
        self.score = state.score();
        self.level = state.level();
        self.lines = state.lines();
        self.drop_interval_ms = state.drop_interval_ms();
        self.paused = state.paused();
        self.game_over = state.game_over();
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder: PieceSnapshot = FallingPiece::spawn(PieceKind::I, BOARD_WIDTH).into();
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            board: Vec::new(),
            active: placeholder,
            next: placeholder,
            ghost_y: 0,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            paused: false,
            game_over: false,
        }
    }
}
