//! Player-programmed action queues.
//!
//! A queue hands out at most one action per interval of simulated time,
//! so a long script plays out over several seconds instead of one frame.

use std::collections::VecDeque;

use astroduel_core::commands::ScriptAction;

/// Slack for accumulated floating-point error in the cooldown.
const COOLDOWN_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default)]
pub struct ScriptQueue {
    pending: VecDeque<ScriptAction>,
    cooldown_secs: f64,
}

impl ScriptQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = ScriptAction>) {
        self.pending.extend(actions);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.cooldown_secs = 0.0;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the cooldown by `dt` and release the next action if it has expired.
    pub fn poll(&mut self, dt: f64, interval_secs: f64) -> Option<ScriptAction> {
        self.cooldown_secs = (self.cooldown_secs - dt).max(0.0);
        if self.cooldown_secs > COOLDOWN_EPSILON {
            return None;
        }
        let action = self.pending.pop_front()?;
        self.cooldown_secs = interval_secs;
        Some(action)
    }
}
