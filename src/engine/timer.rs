//! Drop timer - the single autonomous driver of the session.
//!
//! Models "schedule a callback after an interval, cancel the active
//! schedule" as a deadline polled by the event loop. At most one
//! deadline is ever live, so cancelling before rescheduling can never
//! leave two schedules racing. All methods take the current `Instant`
//! from the caller, which keeps the scheduling rules testable without
//! sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct DropTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl DropTimer {
    /// A cancelled timer with the given interval.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms as u64),
            deadline: None,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval.as_millis() as u32
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedule the next fire one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Drop the pending schedule.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Cancel, change the interval, and schedule afresh from `now`.
    pub fn restart(&mut self, interval_ms: u32, now: Instant) {
        self.interval = Duration::from_millis(interval_ms as u64);
        self.start(now);
    }

    /// Whether the deadline has passed. Firing reschedules one interval
    /// from `now`, so a stalled loop fires once per poll rather than
    /// replaying a backlog.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the deadline (zero if already due), or None
    /// when cancelled. Event loops use this as their poll timeout.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_only_after_deadline() {
        let now = Instant::now();
        let mut timer = DropTimer::new(1000);
        timer.start(now);

        assert!(!timer.fire(now));
        assert!(!timer.fire(now + Duration::from_millis(999)));
        assert!(timer.fire(now + Duration::from_millis(1000)));
    }

    #[test]
    fn test_fire_reschedules_from_fire_time() {
        let now = Instant::now();
        let mut timer = DropTimer::new(100);
        timer.start(now);

        let late = now + Duration::from_millis(250);
        assert!(timer.fire(late));
        // Next deadline is one interval past the late fire, not the
        // original schedule.
        assert!(!timer.fire(late + Duration::from_millis(99)));
        assert!(timer.fire(late + Duration::from_millis(100)));
    }

    #[test]
    fn test_cancel_stops_firing() {
        let now = Instant::now();
        let mut timer = DropTimer::new(100);
        timer.start(now);
        timer.cancel();

        assert!(!timer.is_running());
        assert!(!timer.fire(now + Duration::from_secs(10)));
        assert_eq!(timer.time_until_due(now), None);
    }

    #[test]
    fn test_restart_applies_new_interval() {
        let now = Instant::now();
        let mut timer = DropTimer::new(1000);
        timer.start(now);

        timer.restart(100, now);
        assert_eq!(timer.interval_ms(), 100);
        assert!(!timer.fire(now + Duration::from_millis(99)));
        assert!(timer.fire(now + Duration::from_millis(100)));
    }

    #[test]
    fn test_time_until_due_clamps_at_zero() {
        let now = Instant::now();
        let mut timer = DropTimer::new(50);
        timer.start(now);

        let later = now + Duration::from_millis(200);
        assert_eq!(timer.time_until_due(later), Some(Duration::ZERO));
    }
}
