//! GameView: maps engine state into a terminal framebuffer.
//!
//! This module is pure (no I/O). The layout mirrors the original web
//! arrangement: bordered playfield, ghost under the active piece, and a
//! side panel with score, level, lines, and a 4x4 next-piece preview.

use crate::core::{FallingPiece, GameState};
use crate::term::fb::{FrameBuffer, Rgb, Style};
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders a game state into a framebuffer.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

const PREVIEW_SIZE: u16 = 4;

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current game state into a fresh framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Style::default());

        let cols = state.board().width() as u16;
        let rows = state.board().height() as u16;
        let board_px_w = cols * self.cell_w;
        let board_px_h = rows * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + SIDE_PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well = Style::plain(Rgb::new(70, 70, 82), Rgb::new(24, 24, 32));
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', well);
        draw_border(&mut fb, start_x, start_y, frame_w, frame_h);

        // Locked cells and grid dots.
        for y in 0..rows {
            for x in 0..cols {
                match state.board().get(x as i8, y as i8).unwrap_or(None) {
                    Some(kind) => {
                        self.fill_cell(&mut fb, start_x, start_y, x, y, '█', kind_style(kind))
                    }
                    None => self.fill_cell(&mut fb, start_x, start_y, x, y, '·', well.dim()),
                }
            }
        }

        // Ghost below, active on top, both clipped to the field.
        let active = state.active();
        let ghost = Style::plain(Rgb::new(130, 130, 140), Rgb::new(24, 24, 32)).dim();
        self.draw_piece_at(
            &mut fb,
            start_x,
            start_y,
            cols,
            rows,
            &active,
            state.ghost_y(),
            Some(ghost),
        );
        self.draw_piece_at(&mut fb, start_x, start_y, cols, rows, &active, active.y, None);

        self.draw_side_panel(&mut fb, state, start_x + frame_w + 2, start_y);

        if state.paused() {
            draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if state.game_over() {
            draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            draw_overlay_below(&mut fb, start_x, start_y, frame_w, frame_h, "r: restart  q: quit");
        }

        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: Style,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_piece_at(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cols: u16,
        rows: u16,
        piece: &FallingPiece,
        at_y: i8,
        style_override: Option<Style>,
    ) {
        let style = style_override.unwrap_or_else(|| kind_style(piece.kind));
        let ch = if style_override.is_some() { '░' } else { '█' };
        for (row, col) in piece.shape.occupied() {
            let x = piece.x + col;
            let y = at_y + row;
            if x >= 0 && (x as u16) < cols && y >= 0 && (y as u16) < rows {
                self.fill_cell(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, state: &GameState, panel_x: u16, start_y: u16) {
        if panel_x >= fb.width() {
            return;
        }
        let label = Style::default().bold();
        let value = Style::default();

        let mut y = start_y;
        for (name, amount) in [
            ("SCORE", state.score()),
            ("LEVEL", state.level()),
            ("LINES", state.lines()),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &amount.to_string(), value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(panel_x + 5, y, state.next_piece().kind.as_str(), value);
        y += 1;
        self.draw_preview(fb, state.next_piece(), panel_x, y);
    }

    /// 4x4 preview box with the shape centered, as on the original
    /// next-piece display.
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: FallingPiece, x: u16, y: u16) {
        let well = Style::plain(Rgb::new(70, 70, 82), Rgb::new(24, 24, 32)).dim();
        fb.fill_rect(x, y, PREVIEW_SIZE * self.cell_w, PREVIEW_SIZE * self.cell_h, '·', well);

        let size = piece.shape.size() as u16;
        let off_x = (PREVIEW_SIZE - size) / 2;
        let off_y = (PREVIEW_SIZE - size) / 2;
        let style = kind_style(piece.kind);
        for (row, col) in piece.shape.occupied() {
            let px = x + (off_x + col as u16) * self.cell_w;
            let py = y + (off_y + row as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }
}

const SIDE_PANEL_W: u16 = 14;

fn kind_style(kind: PieceKind) -> Style {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 215, 215),
        PieceKind::J => Rgb::new(90, 120, 230),
        PieceKind::L => Rgb::new(235, 160, 50),
        PieceKind::O => Rgb::new(235, 215, 80),
        PieceKind::S => Rgb::new(110, 215, 120),
        PieceKind::T => Rgb::new(190, 110, 220),
        PieceKind::Z => Rgb::new(225, 85, 85),
    };
    Style::plain(fg, Rgb::new(24, 24, 32)).bold()
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let style = Style::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    let text_w = text.chars().count() as u16;
    let tx = x + w.saturating_sub(text_w) / 2;
    fb.put_str(tx, y + h / 2, text, style);
}

fn draw_overlay_below(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let style = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
    let text_w = text.chars().count() as u16;
    let tx = x + w.saturating_sub(text_w) / 2;
    fb.put_str(tx, y + h / 2 + 1, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_str(fb: &FrameBuffer, needle: &str) -> bool {
        for y in 0..fb.height() {
            let row: String = (0..fb.width())
                .map(|x| fb.get(x, y).unwrap_or_default().ch)
                .collect();
            if row.contains(needle) {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_render_shows_panel_labels() {
        let state = GameState::new(7);
        let fb = GameView::default().render(&state, Viewport::new(80, 24));
        assert!(find_str(&fb, "SCORE"));
        assert!(find_str(&fb, "LEVEL"));
        assert!(find_str(&fb, "LINES"));
        assert!(find_str(&fb, "NEXT"));
    }

    #[test]
    fn test_render_shows_pause_overlay() {
        let mut state = GameState::new(7);
        state.toggle_pause();
        let fb = GameView::default().render(&state, Viewport::new(80, 24));
        assert!(find_str(&fb, "PAUSED"));
    }

    #[test]
    fn test_render_survives_tiny_viewport() {
        let state = GameState::new(7);
        let fb = GameView::default().render(&state, Viewport::new(8, 4));
        assert_eq!(fb.width(), 8);
        assert_eq!(fb.height(), 4);
    }
}
