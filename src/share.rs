//! End-of-session share message.
//!
//! The engine never sees this; the front end prints it after the
//! terminal is restored, so the text lands on the normal screen where
//! it can be copied.

/// Plain-text score message for sharing.
pub fn share_message(score: u32) -> String {
    format!("I scored {score} points in blockfall! Can you beat that?")
}
