//! Seeded deterministic randomness
//!
//! Every random decision in a session (map layout, generator relocation)
//! draws from one `RandomSource`, so a seed fully determines the session.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Session seed, either numeric or a player-facing string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Numeric value fed to the generator. Text is hashed with 32-bit FNV-1a.
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Number(n) => *n,
            Seed::Text(text) => fnv1a_32(text) as u64,
        }
    }

    /// Parse a command-line seed: digits are a number, anything else is text
    pub fn parse(raw: &str) -> Self {
        raw.parse::<u64>()
            .map(Seed::Number)
            .unwrap_or_else(|_| Seed::Text(raw.to_string()))
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

fn fnv1a_32(text: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in text.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Deterministic [0, 1) stream
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: impl Into<Seed>) -> Self {
        let seed = seed.into();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.to_u64()),
        }
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform index in 0..n. Returns 0 when n is 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    /// Uniform value in lo..=hi, including the full `u32` range
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = u64::from(hi - lo) + 1;
        let offset = ((self.next_f64() * span as f64) as u64).min(span - 1);
        lo + offset as u32
    }
}
