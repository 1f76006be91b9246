use crate::core::window::{NightWindow, UtcClock};

/// Outcome of one decision cycle. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverheadDecision {
    pub triggered: bool,
}

impl OverheadDecision {
    pub fn evaluate(window: &NightWindow, now: UtcClock, near: bool) -> Self {
        Self {
            triggered: should_notify(window, now, near),
        }
    }
}

/// True iff `now` falls inside the night window and the spacecraft is near.
pub fn should_notify(window: &NightWindow, now: UtcClock, near: bool) -> bool {
    near && window.contains(now)
}
