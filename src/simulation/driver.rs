//! Fixed-step tick driver
//!
//! The host reports elapsed time; the driver runs one tick per whole
//! interval, catching up with several back-to-back ticks when needed and
//! carrying the remainder. Partial ticks never run.

use crate::simulation::session::Session;
use crate::simulation::tick::TickReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDriver {
    interval_ms: u64,
    accumulator_ms: u64,
}

impl TickDriver {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulator_ms: 0,
        }
    }

    /// Driver using the session's configured tick interval
    pub fn for_session(session: &Session) -> Self {
        Self::new(session.config().tick_interval_ms)
    }

    /// Time carried toward the next tick
    pub fn pending_ms(&self) -> u64 {
        self.accumulator_ms
    }

    /// Advance host time by `dt_ms`, running every tick that is now due.
    ///
    /// Also advances the session's action clock. Stops early once the
    /// session is over and drops the leftover time.
    pub fn advance(&mut self, session: &mut Session, dt_ms: u64) -> Vec<TickReport> {
        session.advance_clock(dt_ms);
        self.accumulator_ms = self.accumulator_ms.saturating_add(dt_ms);

        let mut reports = Vec::new();
        while self.accumulator_ms >= self.interval_ms {
            if session.is_game_over() {
                self.accumulator_ms = 0;
                break;
            }
            self.accumulator_ms -= self.interval_ms;
            reports.push(session.tick());
        }
        reports
    }
}
