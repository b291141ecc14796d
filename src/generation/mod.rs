//! Procedural board generation

pub mod map;
pub mod retry;

pub use map::{generate_map, pillar_positions, safe_zones};
pub use retry::{try_place, RetryBudget};
