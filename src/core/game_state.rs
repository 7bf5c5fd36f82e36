//! Game state module - manages the complete game state
//!
//! Ties together board, pieces, RNG, and scoring, and owns the session
//! lifecycle: falling, paused, game over. All commands are silent no-ops
//! when they cannot apply (collision, paused, game over) - that is the
//! rule set, not an error. Game over is likewise a state transition, not
//! an error value.

use crate::core::pieces::{base_shape, spawn_x, try_rotate_cw, Shape};
use crate::core::rng::PieceGenerator;
use crate::core::scoring::{drop_interval_ms, level_for_lines, line_clear_score};
use crate::core::snapshot::GameSnapshot;
use crate::core::{Board, SizeError};
use crate::types::{GameAction, PieceKind};

/// Active falling piece: a kind, its current (possibly rotated) matrix,
/// and a board-relative origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl FallingPiece {
    /// Create a piece in spawn position: base matrix, horizontally
    /// centered, origin row 0.
    pub fn spawn(kind: PieceKind, cols: u8) -> Self {
        let shape = base_shape(kind);
        Self {
            kind,
            x: spawn_x(cols, &shape),
            y: 0,
            shape,
        }
    }
}

/// What a lock did to the session (consumed by the driving layer, which
/// uses `level_up` to reschedule the drop timer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_added: u32,
    pub level_up: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: FallingPiece,
    next: FallingPiece,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    lines: u32,
    paused: bool,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// New session on a default 10x20 board.
    pub fn new(seed: u32) -> Self {
        Self::from_parts(Board::new(), PieceGenerator::new(seed))
    }

    /// New session on a board with explicit dimensions.
    pub fn with_size(width: u8, height: u8, seed: u32) -> Result<Self, SizeError> {
        Ok(Self::from_parts(
            Board::with_size(width, height)?,
            PieceGenerator::new(seed),
        ))
    }

    fn from_parts(board: Board, mut generator: PieceGenerator) -> Self {
        let cols = board.width();
        let active = generator.generate(cols);
        let next = generator.generate(cols);
        Self {
            board,
            active,
            next,
            generator,
            score: 0,
            level: 1,
            lines: 0,
            paused: false,
            game_over: false,
            last_event: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> FallingPiece {
        self.active
    }

    pub fn next_piece(&self) -> FallingPiece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether gameplay commands currently apply.
    pub fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Current gravity interval, derived from the level.
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Shift the active piece one column left. No-op on collision.
    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    /// Shift the active piece one column right. No-op on collision.
    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let piece = self.active;
        if self.board.collides(piece.x + dx, piece.y, &piece.shape) {
            return false;
        }
        self.active.x += dx;
        true
    }

    /// Advance the active piece one row (gravity tick and soft drop are
    /// the same operation). Locks the piece when it cannot descend.
    ///
    /// Returns true when the session changed at all: a descent, a lock,
    /// or a lock that ended the game.
    pub fn move_down(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let piece = self.active;
        if self.board.collides(piece.x, piece.y + 1, &piece.shape) {
            self.lock_active();
        } else {
            self.active.y += 1;
        }
        true
    }

    /// Drop the active piece straight to its resting row and lock it.
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let resting_y = self.ghost_y();
        self.active.y = resting_y;
        self.lock_active();
        true
    }

    /// Rotate the active piece 90 degrees clockwise, kicking one or two
    /// columns sideways if the turned matrix collides in place. Discards
    /// the rotation when every kick fails.
    pub fn rotate_cw(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let piece = self.active;
        let result = try_rotate_cw(&piece.shape, piece.x, piece.y, |x, y, shape| {
            self.board.collides(x, y, shape)
        });
        match result {
            Some((shape, x)) => {
                self.active.shape = shape;
                self.active.x = x;
                true
            }
            None => false,
        }
    }

    /// Toggle pause. Ineffective after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Start a fresh session on the same board dimensions, threading the
    /// RNG state forward so the piece sequence does not repeat.
    pub fn reset(&mut self) {
        let mut board = std::mem::take(&mut self.board);
        board.clear();
        *self = Self::from_parts(board, PieceGenerator::new(self.generator.state()));
    }

    /// Apply a command, returning whether it changed the session.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Lowest y the active piece could occupy at its current x and shape
    /// without colliding (the ghost position).
    pub fn ghost_y(&self) -> i8 {
        let piece = self.active;
        let mut y = piece.y;
        while !self.board.collides(piece.x, y + 1, &piece.shape) {
            y += 1;
        }
        y
    }

    /// Commit the active piece to the board, clear lines, score, and
    /// promote the preview piece.
    ///
    /// Two distinct game-over paths: a cell above row 0 at lock time
    /// (top overflow - the board is left untouched), and the promoted
    /// piece colliding at spawn (the board stays committed).
    fn lock_active(&mut self) {
        let piece = self.active;

        if !self
            .board
            .lock_piece(&piece.shape, piece.x, piece.y, piece.kind)
        {
            self.game_over = true;
            self.last_event = Some(LockEvent {
                lines_cleared: 0,
                score_added: 0,
                level_up: false,
            });
            return;
        }

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len();

        let mut score_added = 0;
        let mut level_up = false;
        if lines_cleared > 0 {
            // Score uses the level in force before the clear; the level
            // is recomputed only afterwards.
            score_added = line_clear_score(lines_cleared, self.level);
            self.score += score_added;
            self.lines += lines_cleared as u32;

            let new_level = level_for_lines(self.lines);
            if new_level > self.level {
                self.level = new_level;
                level_up = true;
            }
        }

        self.active = self.next;
        self.next = self.generator.generate(self.board.width());

        if self
            .board
            .collides(self.active.x, self.active.y, &self.active.shape)
        {
            self.game_over = true;
        }

        self.last_event = Some(LockEvent {
            lines_cleared: lines_cleared as u32,
            score_added,
            level_up,
        });
    }

    /// Fill a reusable snapshot with the current state.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.fill_from(self);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn force_active(&mut self, kind: PieceKind, x: i8, y: i8) {
        self.active = FallingPiece {
            kind,
            shape: base_shape(kind),
            x,
            y,
        };
    }

    #[cfg(test)]
    pub fn force_progress(&mut self, lines: u32, score: u32) {
        self.lines = lines;
        self.level = level_for_lines(lines);
        self.score = score;
    }
}
