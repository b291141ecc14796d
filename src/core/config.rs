//! Simulation configuration with documented constants
//!
//! All tuning numbers are collected here. The defaults reproduce the
//! standard board: a 12x8 grid ticking every 200ms for 900 ticks.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, SimError};

/// Inclusive integer range sampled by the map generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: u32,
    pub max: u32,
}

impl SpawnRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Base capacities per tile type, before fortification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityTable {
    pub wire: u32,
    pub breaker: u32,
    pub switch: u32,
    /// Generators and sinks never overload, this only feeds display
    pub infrastructure: u32,
    /// Multiplier applied to tiles built on fortified cells
    pub fortified_multiplier: u32,
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self {
            wire: 15,
            breaker: 50,
            switch: 15,
            infrastructure: 15,
            fortified_multiplier: 2,
        }
    }
}

/// Configuration for a simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === BOARD ===
    pub width: usize,
    pub height: usize,

    // === TIMING ===
    /// Host time per simulation tick (ms)
    pub tick_interval_ms: u64,

    /// Session length in ticks. The tick that reaches this ends the session.
    ///
    /// At 200ms per tick, 900 ticks is three minutes of play. 0 disables the limit.
    pub max_ticks: u64,

    /// Host time that must pass after an accepted edit before the next one (ms)
    pub action_cooldown_ms: u64,

    // === PROPAGATION ===
    /// Wavefront rounds per tick before propagation is cut off
    ///
    /// Guarantees termination on cyclic layouts. 50 rounds covers any
    /// acyclic path on the standard board several times over.
    pub max_propagation_rounds: u32,

    // === OVERLOAD ===
    pub max_health: u8,
    /// Health lost per tick spent above capacity
    pub overload_damage: u8,
    pub capacities: CapacityTable,

    // === MAP GENERATION ===
    pub generator_count: SpawnRange,
    pub sink_count: SpawnRange,
    pub generator_output: SpawnRange,
    pub sink_demand: SpawnRange,
    /// Row samples per generator/sink before that entity is skipped
    pub placement_attempts: u32,
    pub fortified_count: SpawnRange,
    /// Coordinate samples shared by all fortified tiles
    pub fortified_attempts: u32,

    // === PERTURBATION ===
    /// Ticks between generator relocations
    pub relocation_interval: u64,
    /// Row samples per relocation before it is skipped for the cycle
    pub relocation_attempts: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 8,

            tick_interval_ms: 200,
            max_ticks: 900,
            action_cooldown_ms: 120,

            max_propagation_rounds: 50,

            max_health: 100,
            overload_damage: 10,
            capacities: CapacityTable::default(),

            generator_count: SpawnRange::new(2, 3),
            sink_count: SpawnRange::new(2, 3),
            generator_output: SpawnRange::new(10, 19),
            sink_demand: SpawnRange::new(5, 14),
            placement_attempts: 20,
            fortified_count: SpawnRange::new(8, 12),
            fortified_attempts: 100,

            relocation_interval: 100,
            relocation_attempts: 10,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config on a board of the given size
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "board must be at least 1x1 (got {}x{})",
                self.width, self.height
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(SimError::InvalidConfig(
                "tick_interval_ms must be positive".into(),
            ));
        }

        if self.max_propagation_rounds == 0 {
            return Err(SimError::InvalidConfig(
                "max_propagation_rounds must be positive".into(),
            ));
        }

        if self.relocation_interval == 0 {
            return Err(SimError::InvalidConfig(
                "relocation_interval must be positive".into(),
            ));
        }

        if self.max_health == 0 {
            return Err(SimError::InvalidConfig("max_health must be positive".into()));
        }

        let ranges = [
            ("generator_count", self.generator_count),
            ("sink_count", self.sink_count),
            ("generator_output", self.generator_output),
            ("sink_demand", self.sink_demand),
            ("fortified_count", self.fortified_count),
        ];
        for (name, range) in ranges {
            if !range.is_valid() {
                return Err(SimError::InvalidConfig(format!(
                    "{} min ({}) should be <= max ({})",
                    name, range.min, range.max
                )));
            }
        }

        if self.capacities.fortified_multiplier == 0 {
            return Err(SimError::InvalidConfig(
                "fortified_multiplier must be positive".into(),
            ));
        }

        Ok(())
    }
}
