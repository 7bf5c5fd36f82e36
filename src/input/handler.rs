//! Keyboard input for terminal environments.
//!
//! Browsers auto-repeat a held key; terminals do not, and many never
//! emit key-release events at all. Held horizontal movement and soft
//! drop are therefore synthesized here with a DAS/ARR scheme (initial
//! delay, then a fixed repeat rate), with a release timeout so a single
//! tap does not turn into a phantom hold.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS};

/// Direction of a held horizontal key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Held {
    Left,
    Right,
    None,
}

// Terminals without key-release events: drop the held state when no
// press has arrived for this long.
const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// One-shot actions that do not repeat while held.
pub fn map_key(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::RotateCw),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),
        _ => None,
    }
}

/// Quit on q, Esc, or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Tracks held movement keys and synthesizes repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Held,
    down_held: bool,
    last_key_time: std::time::Instant,
    horizontal_das_ms: u32,
    horizontal_arr_ms: u32,
    down_arr_ms: u32,
    das_delay: u32,
    arr_rate: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: Held::None,
            down_held: false,
            last_key_time: std::time::Instant::now(),
            horizontal_das_ms: 0,
            horizontal_arr_ms: 0,
            down_arr_ms: 0,
            das_delay,
            arr_rate,
        }
    }

    /// Register a key press. Movement keys return their action
    /// immediately and arm the repeat; everything else maps one-shot.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == Held::Left {
                    None
                } else {
                    self.horizontal = Held::Left;
                    self.horizontal_das_ms = 0;
                    self.horizontal_arr_ms = 0;
                    Some(GameAction::MoveLeft)
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == Held::Right {
                    None
                } else {
                    self.horizontal = Held::Right;
                    self.horizontal_das_ms = 0;
                    self.horizontal_arr_ms = 0;
                    Some(GameAction::MoveRight)
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.last_key_time = std::time::Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_arr_ms = 0;
                    Some(GameAction::MoveDown)
                }
            }
            other => map_key(other),
        }
    }

    /// Register a key release (terminals that support it).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                if self.horizontal == Held::Left {
                    self.release_horizontal();
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                if self.horizontal == Held::Right {
                    self.release_horizontal();
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.down_held = false;
                self.down_arr_ms = 0;
            }
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = Held::None;
        self.horizontal_das_ms = 0;
        self.horizontal_arr_ms = 0;
    }

    /// Advance held-key timers by `elapsed_ms` and collect synthesized
    /// repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::new();

        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > KEY_RELEASE_TIMEOUT_MS {
            self.release_horizontal();
            self.down_held = false;
            self.down_arr_ms = 0;
        }

        if self.horizontal != Held::None {
            let prev = self.horizontal_das_ms;
            self.horizontal_das_ms += elapsed_ms;

            if self.horizontal_das_ms >= self.das_delay {
                let excess = if prev < self.das_delay {
                    self.horizontal_das_ms - self.das_delay
                } else {
                    elapsed_ms
                };
                self.horizontal_arr_ms += excess;

                while self.horizontal_arr_ms >= self.arr_rate {
                    let action = match self.horizontal {
                        Held::Left => GameAction::MoveLeft,
                        Held::Right => GameAction::MoveRight,
                        Held::None => break,
                    };
                    let _ = actions.try_push(action);
                    self.horizontal_arr_ms -= self.arr_rate;
                }
            }
        }

        if self.down_held {
            // Soft drop repeats without an initial delay.
            self.down_arr_ms += elapsed_ms;
            while self.down_arr_ms >= SOFT_DROP_ARR_MS {
                let _ = actions.try_push(GameAction::MoveDown);
                self.down_arr_ms -= SOFT_DROP_ARR_MS;
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_held = false;
        self.down_arr_ms = 0;
        self.last_key_time = std::time::Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin_held(ih: &mut InputHandler) {
        // Keep the release timeout from firing during timer-only tests.
        ih.last_key_time = std::time::Instant::now();
    }

    #[test]
    fn test_first_press_moves_immediately() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(KeyCode::Left),
            Some(GameAction::MoveLeft)
        );
        // Re-press of the same direction while held is swallowed.
        assert_eq!(ih.handle_key_press(KeyCode::Left), None);
    }

    #[test]
    fn test_horizontal_repeat_after_das() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.handle_key_press(KeyCode::Right);

        assert!(ih.update(99).is_empty());
        pin_held(&mut ih);
        assert!(ih.update(1).is_empty());
        pin_held(&mut ih);
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveRight]);
        pin_held(&mut ih);
        assert_eq!(
            ih.update(50).as_slice(),
            &[GameAction::MoveRight, GameAction::MoveRight]
        );
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_release(KeyCode::Left);
        assert!(ih.update(500).is_empty());
    }

    #[test]
    fn test_soft_drop_repeats_without_das() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(KeyCode::Down),
            Some(GameAction::MoveDown)
        );
        assert!(ih.update(49).is_empty());
        pin_held(&mut ih);
        assert_eq!(ih.update(1).as_slice(), &[GameAction::MoveDown]);
    }

    #[test]
    fn test_stale_hold_auto_releases() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.handle_key_press(KeyCode::Left);
        ih.last_key_time =
            std::time::Instant::now() - std::time::Duration::from_millis(200);

        assert!(ih.update(500).is_empty());
        assert_eq!(ih.horizontal, Held::None);
    }

    #[test]
    fn test_one_shot_keys_map_through_press_handler() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(KeyCode::Up),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Char(' ')),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('p')),
            Some(GameAction::TogglePause)
        );
        assert_eq!(ih.handle_key_press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        use crossterm::event::{KeyEventKind, KeyEventState};

        let plain = |code| KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(should_quit(plain(KeyCode::Char('q'))));
        assert!(should_quit(plain(KeyCode::Esc)));
        assert!(!should_quit(plain(KeyCode::Char('c'))));

        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(should_quit(ctrl_c));
    }
}
