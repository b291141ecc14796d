pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::{CapacityTable, SimulationConfig, SpawnRange};
pub use error::{Result, SimError};
pub use random::{RandomSource, Seed};
pub use types::{Direction, GridPos, Power, Rotation, Tick};
