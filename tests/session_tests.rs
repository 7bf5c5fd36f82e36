//! Session tests - gravity scheduling against the game lifecycle

use std::time::{Duration, Instant};

use blockfall::engine::Session;
use blockfall::types::GameAction;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn test_gravity_descends_one_row_per_interval() {
    let now = Instant::now();
    let mut session = Session::new(7, now);
    let y0 = session.state().active().y;

    assert!(!session.poll(now));
    assert!(!session.poll(now + ms(500)));
    assert!(session.poll(now + ms(1000)));
    assert_eq!(session.state().active().y, y0 + 1);

    // The next deadline runs from the fire time.
    assert!(!session.poll(now + ms(1500)));
    assert!(session.poll(now + ms(2000)));
    assert_eq!(session.state().active().y, y0 + 2);
}

#[test]
fn test_poll_timeout_counts_down() {
    let now = Instant::now();
    let session = Session::new(7, now);

    assert_eq!(session.poll_timeout(now), Some(ms(1000)));
    assert_eq!(session.poll_timeout(now + ms(400)), Some(ms(600)));
    assert_eq!(session.poll_timeout(now + ms(2000)), Some(ms(0)));
}

#[test]
fn test_pause_suspends_gravity() {
    let now = Instant::now();
    let mut session = Session::new(7, now);
    let y0 = session.state().active().y;

    assert!(session.handle_action(GameAction::TogglePause, now));
    assert_eq!(session.poll_timeout(now), None);
    assert!(!session.poll(now + ms(60_000)));
    assert_eq!(session.state().active().y, y0);
}

#[test]
fn test_resume_schedules_full_interval() {
    let now = Instant::now();
    let mut session = Session::new(7, now);
    session.handle_action(GameAction::TogglePause, now + ms(700));

    let resume_at = now + ms(9000);
    session.handle_action(GameAction::TogglePause, resume_at);
    assert_eq!(session.poll_timeout(resume_at), Some(ms(1000)));
    assert!(!session.poll(resume_at + ms(999)));
    assert!(session.poll(resume_at + ms(1000)));
}

#[test]
fn test_reset_mid_game_replaces_pending_deadline() {
    let now = Instant::now();
    let mut session = Session::new(7, now);

    // 600ms into the first interval, a reset reschedules a full interval
    // from the reset instant rather than keeping the old deadline.
    let reset_at = now + ms(600);
    assert!(session.handle_action(GameAction::Reset, reset_at));
    assert_eq!(session.poll_timeout(reset_at), Some(ms(1000)));
}

#[test]
fn test_reset_reschedules_gravity() {
    let now = Instant::now();
    let mut session = Session::new(7, now);
    session.handle_action(GameAction::TogglePause, now);

    let reset_at = now + ms(5000);
    assert!(session.handle_action(GameAction::Reset, reset_at));
    assert_eq!(session.poll_timeout(reset_at), Some(ms(1000)));
    assert!(session.state().playable());
}

#[test]
fn test_input_commands_flow_through_session() {
    let now = Instant::now();
    let mut session = Session::new(7, now);
    let x0 = session.state().active().x;

    assert!(session.handle_action(GameAction::MoveLeft, now));
    assert!(session.handle_action(GameAction::MoveRight, now));
    assert!(session.handle_action(GameAction::RotateCw, now));
    assert_eq!(session.state().active().x, x0);
}

#[test]
fn test_rejected_command_does_not_disturb_schedule() {
    let now = Instant::now();
    let mut session = Session::new(7, now);

    // Walk the piece to the wall; the rejected move leaves the gravity
    // deadline exactly where it was.
    for _ in 0..4 {
        session.handle_action(GameAction::MoveLeft, now);
    }
    assert!(!session.handle_action(GameAction::MoveLeft, now + ms(100)));
    assert_eq!(session.poll_timeout(now + ms(100)), Some(ms(900)));
}

#[test]
fn test_custom_board_session() {
    let now = Instant::now();
    assert!(Session::with_size(0, 20, 1, now).is_err());

    let session = Session::with_size(8, 16, 7, now).unwrap();
    assert_eq!(session.state().board().width(), 8);
    assert_eq!(session.state().board().height(), 16);
    // O centered on 8 columns: 4 - 1 = 3.
    assert_eq!(session.state().active().x, 3);
}
