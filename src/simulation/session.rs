//! Session state - the owned handle the host drives
//!
//! A `Session` holds everything one game needs: the board, its random
//! stream, the tick counter, the action clock and the score. There is no
//! module-level state, so any number of sessions can run side by side.

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::random::{RandomSource, Seed};
use crate::core::types::{GridPos, Rotation, Tick};
use crate::edit::{self, ActionCooldown, Component, EditCommand, EditError};
use crate::generation::generate_map;
use crate::grid::{Grid, WireShape};
use crate::simulation::tick::{run_simulation_tick, TickReport};

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) config: SimulationConfig,
    pub(crate) grid: Grid,
    pub(crate) rng: RandomSource,
    seed: Seed,
    pub(crate) tick: Tick,
    /// Host time in ms, advanced by the caller
    clock_ms: u64,
    cooldown: ActionCooldown,
    pub(crate) last_consumed: u64,
    pub(crate) score: u64,
    pub(crate) game_over: bool,
}

impl Session {
    /// New session on a `width` x `height` board with default tuning
    pub fn initialize(seed: impl Into<Seed>, width: usize, height: usize) -> Result<Self> {
        Self::with_config(seed, SimulationConfig::with_size(width, height))
    }

    pub fn with_config(seed: impl Into<Seed>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = seed.into();
        let mut rng = RandomSource::new(seed.clone());
        let grid = generate_map(&config, &mut rng);

        tracing::info!(
            "Session created: seed {:?}, {}x{} board, {} generators, {} sinks",
            seed,
            grid.width,
            grid.height,
            grid.generators().len(),
            grid.sinks().len()
        );

        Ok(Self::assemble(grid, config, seed, rng))
    }

    /// Wrap a hand-built board. The seed only feeds relocation draws.
    ///
    /// The board must have the config's size, capacities and max health.
    pub fn from_grid(
        grid: Grid,
        config: SimulationConfig,
        seed: impl Into<Seed>,
    ) -> Result<Self> {
        config.validate()?;
        if grid.width != config.width || grid.height != config.height {
            return Err(SimError::InvalidConfig(format!(
                "board is {}x{} but config expects {}x{}",
                grid.width, grid.height, config.width, config.height
            )));
        }
        if *grid.capacities() != config.capacities || grid.max_health() != config.max_health {
            return Err(SimError::InvalidConfig(
                "board capacities or max_health differ from config".into(),
            ));
        }

        let seed = seed.into();
        let rng = RandomSource::new(seed.clone());
        Ok(Self::assemble(grid, config, seed, rng))
    }

    fn assemble(grid: Grid, config: SimulationConfig, seed: Seed, rng: RandomSource) -> Self {
        let cooldown = ActionCooldown::new(config.action_cooldown_ms);
        Self {
            config,
            grid,
            rng,
            seed,
            tick: 0,
            clock_ms: 0,
            cooldown,
            last_consumed: 0,
            score: 0,
            game_over: false,
        }
    }

    /// Advance one simulation step
    pub fn tick(&mut self) -> TickReport {
        run_simulation_tick(self)
    }

    /// Move the action clock forward by `ms` of host time
    pub fn advance_clock(&mut self, ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(ms);
    }

    // === EDITS ===

    pub fn place_wire(&mut self, pos: GridPos, shape: WireShape, rotation: Rotation) -> bool {
        self.apply_edit(|grid| edit::place_wire(grid, pos, shape, rotation)).is_ok()
    }

    pub fn place_component(
        &mut self,
        pos: GridPos,
        component: Component,
        rotation: Rotation,
    ) -> bool {
        self.apply_edit(|grid| edit::place_component(grid, pos, component, rotation))
            .is_ok()
    }

    pub fn remove_tile(&mut self, pos: GridPos) -> bool {
        self.apply_edit(|grid| edit::remove_tile(grid, pos)).is_ok()
    }

    pub fn rotate_tile(&mut self, pos: GridPos) -> bool {
        self.apply_edit(|grid| edit::rotate_tile(grid, pos)).is_ok()
    }

    pub fn toggle_switch(&mut self, pos: GridPos) -> bool {
        self.apply_edit(|grid| edit::toggle_switch(grid, pos)).is_ok()
    }

    /// Apply a parsed edit command
    pub fn execute(&mut self, command: &EditCommand) -> bool {
        match *command {
            EditCommand::PlaceWire {
                pos,
                shape,
                rotation,
            } => self.place_wire(pos, shape, rotation),
            EditCommand::PlaceComponent {
                pos,
                component,
                rotation,
            } => self.place_component(pos, component, rotation),
            EditCommand::Remove { pos } => self.remove_tile(pos),
            EditCommand::Rotate { pos } => self.rotate_tile(pos),
            EditCommand::Toggle { pos } => self.toggle_switch(pos),
        }
    }

    /// Gate an edit on session state and the action cooldown.
    ///
    /// Only accepted edits start the cooldown.
    pub fn apply_edit(
        &mut self,
        edit: impl FnOnce(&mut Grid) -> std::result::Result<(), EditError>,
    ) -> std::result::Result<(), EditError> {
        let result = self.check_ready().and_then(|()| edit(&mut self.grid));
        match result {
            Ok(()) => self.cooldown.trigger(self.clock_ms),
            Err(err) => tracing::debug!("Edit rejected: {}", err),
        }
        result
    }

    fn check_ready(&self) -> std::result::Result<(), EditError> {
        if self.game_over {
            return Err(EditError::SessionOver);
        }
        if !self.cooldown.is_ready(self.clock_ms) {
            return Err(EditError::CoolingDown {
                remaining_ms: self.cooldown.remaining_ms(self.clock_ms),
            });
        }
        Ok(())
    }

    // === READS ===

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sink absorption of the most recent tick
    pub fn total_consumed(&self) -> u64 {
        self.last_consumed
    }

    /// Sum of every tick's absorption so far
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileKind;

    fn line_session() -> Session {
        let config = SimulationConfig::with_size(5, 1);
        let mut grid = Grid::new(5, 1, config.capacities, config.max_health);
        grid.place(GridPos::new(0, 0), TileKind::Generator { output: 10 }, Rotation::NONE);
        grid.place(GridPos::new(4, 0), TileKind::Sink { demand: 5 }, Rotation::NONE);
        Session::from_grid(grid, config, 1u64).unwrap()
    }

    #[test]
    fn test_cooldown_gates_edits() {
        let mut session = line_session();
        assert!(session.place_wire(GridPos::new(1, 0), WireShape::Straight, Rotation::NONE));

        assert_eq!(
            session.apply_edit(|g| edit::remove_tile(g, GridPos::new(1, 0))),
            Err(EditError::CoolingDown { remaining_ms: 120 })
        );

        session.advance_clock(119);
        assert!(!session.place_wire(GridPos::new(2, 0), WireShape::Straight, Rotation::NONE));
        session.advance_clock(1);
        assert!(session.place_wire(GridPos::new(2, 0), WireShape::Straight, Rotation::NONE));
    }

    #[test]
    fn test_rejected_edit_does_not_start_cooldown() {
        let mut session = line_session();
        assert!(!session.rotate_tile(GridPos::new(2, 0)));
        assert!(!session.remove_tile(GridPos::new(0, 0)));
        assert!(session.place_wire(GridPos::new(2, 0), WireShape::Straight, Rotation::NONE));
    }

    #[test]
    fn test_tick_accumulates_score() {
        let mut session = line_session();
        for col in 1..4 {
            assert!(session.place_wire(GridPos::new(col, 0), WireShape::Straight, Rotation::NONE));
            session.advance_clock(120);
        }

        let report = session.tick();
        assert_eq!(report.tick, 1);
        assert_eq!(report.consumed, 5);
        assert_eq!(session.total_consumed(), 5);

        session.tick();
        assert_eq!(session.current_tick(), 2);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_execute_parsed_command() {
        let mut session = line_session();
        let command = EditCommand::parse("breaker 2 0").unwrap();
        assert!(session.execute(&command));
        assert_eq!(session.grid().get(GridPos::new(2, 0)).unwrap().kind, TileKind::Breaker);
    }

    #[test]
    fn test_initialize_rejects_empty_board() {
        assert!(Session::initialize(1u64, 0, 8).is_err());
    }

    #[test]
    fn test_from_grid_checks_board_against_config() {
        let config = SimulationConfig::with_size(5, 1);
        let grid = Grid::new(4, 1, config.capacities, config.max_health);
        assert!(matches!(
            Session::from_grid(grid, config.clone(), 1u64),
            Err(SimError::InvalidConfig(_))
        ));

        let grid = Grid::new(5, 1, config.capacities, 50);
        assert!(Session::from_grid(grid, config.clone(), 1u64).is_err());

        let invalid = SimulationConfig {
            tick_interval_ms: 0,
            ..config
        };
        let grid = Grid::new(5, 1, invalid.capacities, invalid.max_health);
        assert!(Session::from_grid(grid, invalid, 1u64).is_err());
    }
}
