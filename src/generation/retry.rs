//! Bounded-retry sampling
//!
//! "Sample up to N times, else skip" is the placement policy for map
//! generation and generator relocation. Running out of attempts is a
//! normal outcome, reported as `None`, never an error.

/// A pool of sampling attempts that may be shared across several placements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    remaining: u32,
}

impl RetryBudget {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            remaining: max_attempts,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Draw candidates until one is accepted or the budget runs out.
    ///
    /// Every draw costs one attempt, including the accepted one.
    pub fn attempt<T>(
        &mut self,
        mut sample: impl FnMut() -> T,
        mut accept: impl FnMut(&T) -> bool,
    ) -> Option<T> {
        while self.remaining > 0 {
            self.remaining -= 1;
            let candidate = sample();
            if accept(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// One placement with its own budget of `max_attempts`
pub fn try_place<T>(
    max_attempts: u32,
    sample: impl FnMut() -> T,
    accept: impl FnMut(&T) -> bool,
) -> Option<T> {
    RetryBudget::new(max_attempts).attempt(sample, accept)
}
