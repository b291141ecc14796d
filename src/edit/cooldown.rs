//! Player action rate limiting against the session's host clock

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCooldown {
    duration_ms: u64,
    ready_at_ms: u64,
}

impl ActionCooldown {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ready_at_ms: 0,
        }
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        now_ms >= self.ready_at_ms
    }

    /// Start the cooldown after an accepted action
    pub fn trigger(&mut self, now_ms: u64) {
        self.ready_at_ms = now_ms.saturating_add(self.duration_ms);
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.ready_at_ms.saturating_sub(now_ms)
    }
}
