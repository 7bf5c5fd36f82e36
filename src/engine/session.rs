//! Session - a game state driven by the drop timer.
//!
//! This is the layer the presentation adapter talks to. It routes input
//! commands into the state, fires gravity when the timer comes due, and
//! keeps the timer schedule consistent with the session lifecycle:
//! level-up reschedules at the faster interval, pause and game over
//! cancel, resume and reset start exactly one fresh schedule.

use std::time::{Duration, Instant};

use crate::core::{GameState, SizeError};
use crate::engine::timer::DropTimer;
use crate::types::GameAction;

#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    timer: DropTimer,
}

impl Session {
    /// New session on a default board, with gravity scheduled from `now`.
    pub fn new(seed: u32, now: Instant) -> Self {
        Self::from_state(GameState::new(seed), now)
    }

    /// New session on a board with explicit dimensions.
    pub fn with_size(width: u8, height: u8, seed: u32, now: Instant) -> Result<Self, SizeError> {
        Ok(Self::from_state(
            GameState::with_size(width, height, seed)?,
            now,
        ))
    }

    fn from_state(state: GameState, now: Instant) -> Self {
        let mut timer = DropTimer::new(state.drop_interval_ms());
        timer.start(now);
        Self { state, timer }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply an input command, then bring the timer in line with
    /// whatever the command did. Returns whether the session changed.
    pub fn handle_action(&mut self, action: GameAction, now: Instant) -> bool {
        let changed = self.state.apply_action(action);
        if changed {
            if action == GameAction::Reset {
                // A reset replaces the schedule outright, even when the
                // old timer was still running.
                self.timer.restart(self.state.drop_interval_ms(), now);
            }
            self.sync_timer(now);
        }
        changed
    }

    /// Fire gravity if the drop deadline has passed. Returns whether the
    /// session changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.timer.fire(now) {
            return false;
        }
        let changed = self.state.move_down();
        self.sync_timer(now);
        changed
    }

    /// How long the event loop may sleep before the next gravity step.
    /// None while the timer is cancelled (paused or game over).
    pub fn poll_timeout(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    /// Reconcile the timer with the state after any mutation.
    fn sync_timer(&mut self, now: Instant) {
        if let Some(event) = self.state.take_last_event() {
            if event.level_up {
                self.timer.restart(self.state.drop_interval_ms(), now);
            }
        }

        if !self.state.playable() {
            self.timer.cancel();
        } else if !self.timer.is_running() {
            // Resume or reset: exactly one fresh schedule at the
            // session's current interval.
            self.timer.restart(self.state.drop_interval_ms(), now);
        }
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    #[test]
    fn test_gravity_fires_at_interval() {
        let now = Instant::now();
        let mut session = Session::new(7, now);
        let y0 = session.state().active().y;

        assert!(!session.poll(now + MS(999)));
        assert!(session.poll(now + MS(1000)));
        assert_eq!(session.state().active().y, y0 + 1);
    }

    #[test]
    fn test_pause_cancels_and_resume_restarts_schedule() {
        let now = Instant::now();
        let mut session = Session::new(7, now);

        assert!(session.handle_action(GameAction::TogglePause, now));
        assert_eq!(session.poll_timeout(now), None);
        assert!(!session.poll(now + MS(10_000)));

        let resume_at = now + MS(5000);
        assert!(session.handle_action(GameAction::TogglePause, resume_at));
        // The schedule restarts from the resume instant, a full interval
        // out - the paused time does not count against it.
        assert_eq!(session.poll_timeout(resume_at), Some(MS(1000)));
    }

    #[test]
    fn test_level_up_reschedules_at_faster_interval() {
        let now = Instant::now();
        let mut session = Session::new(7, now);
        session.state_mut().force_progress(9, 0);
        for x in 0..10 {
            if x != 4 && x != 5 {
                session.state_mut().board_mut().set(x, 19, Some(PieceKind::I));
            }
        }

        // Seed 7's active piece is the O; dropping it completes row 19
        // and tips the session into level 2.
        let drop_at = now + MS(10);
        assert!(session.handle_action(GameAction::HardDrop, drop_at));
        assert_eq!(session.state().level(), 2);
        assert_eq!(session.poll_timeout(drop_at), Some(MS(900)));
    }

    #[test]
    fn test_game_over_cancels_schedule() {
        let now = Instant::now();
        let mut session = Session::new(7, now);
        for x in 0..10 {
            session.state_mut().board_mut().set(x, 0, Some(PieceKind::J));
        }
        session.state_mut().force_active(PieceKind::I, 3, -2);

        assert!(session.poll(now + MS(1000)));
        assert!(session.state().game_over());
        assert_eq!(session.poll_timeout(now + MS(1000)), None);
    }

    #[test]
    fn test_reset_starts_one_fresh_schedule() {
        let now = Instant::now();
        let mut session = Session::new(7, now);
        session.handle_action(GameAction::TogglePause, now);
        assert_eq!(session.poll_timeout(now), None);

        let reset_at = now + MS(42);
        assert!(session.handle_action(GameAction::Reset, reset_at));
        assert!(session.state().playable());
        assert_eq!(session.poll_timeout(reset_at), Some(MS(1000)));
    }

    #[test]
    fn test_lock_without_level_up_keeps_cadence() {
        let now = Instant::now();
        let mut session = Session::new(7, now);

        let drop_at = now + MS(400);
        assert!(session.handle_action(GameAction::HardDrop, drop_at));
        // No level change: the original schedule (due at +1000) stands.
        assert_eq!(session.poll_timeout(drop_at), Some(MS(600)));
    }
}
