//! End-to-end power flow scenarios on hand-built boards

use circuit_commander::core::config::SimulationConfig;
use circuit_commander::core::types::{GridPos, Rotation};
use circuit_commander::edit::Component;
use circuit_commander::grid::{Grid, TileKind, TileState, WireShape};
use circuit_commander::simulation::{propagate, Session, SimulationEvent};

fn board(width: usize, height: usize) -> (Grid, SimulationConfig) {
    let config = SimulationConfig::with_size(width, height);
    let grid = Grid::new(width, height, config.capacities, config.max_health);
    (grid, config)
}

fn put(grid: &mut Grid, col: usize, row: usize, kind: TileKind, turns: u8) {
    assert!(grid.place(GridPos::new(col, row), kind, Rotation::new(turns)));
}

fn power_at(session: &Session, col: usize, row: usize) -> u32 {
    session.grid().get(GridPos::new(col, row)).unwrap().power
}

#[test]
fn test_straight_chain_feeds_sink() {
    let (mut grid, config) = board(5, 1);
    put(&mut grid, 0, 0, TileKind::Generator { output: 10 }, 0);
    for col in 1..4 {
        put(&mut grid, col, 0, TileKind::Wire(WireShape::Straight), 0);
    }
    put(&mut grid, 4, 0, TileKind::Sink { demand: 5 }, 0);

    let mut session = Session::from_grid(grid, config, 1u64).unwrap();
    let report = session.tick();

    for col in 1..4 {
        let wire = session.grid().get(GridPos::new(col, 0)).unwrap();
        assert_eq!(wire.power, 10);
        assert_eq!(wire.state, TileState::Normal);
        assert_eq!(wire.health, 100);
    }
    assert_eq!(power_at(&session, 4, 0), 10);
    assert_eq!(report.consumed, 5);
    assert_eq!(session.total_consumed(), 5);
    assert!(report.events.is_empty());
}

#[test]
fn test_overloaded_breaker_burns_out_on_tenth_tick() {
    let (mut grid, config) = board(3, 1);
    put(&mut grid, 0, 0, TileKind::Generator { output: 60 }, 0);
    put(&mut grid, 1, 0, TileKind::Breaker, 0);
    let breaker = GridPos::new(1, 0);

    let mut session = Session::from_grid(grid, config, 1u64).unwrap();
    for n in 1..10u8 {
        let report = session.tick();
        let tile = session.grid().get(breaker).unwrap();
        assert_eq!(tile.kind, TileKind::Breaker, "destroyed early on tick {}", n);
        assert_eq!(tile.power, 60);
        assert_eq!(tile.health, 100 - 10 * n);
        assert_eq!(tile.state, TileState::Overloaded);
        assert_eq!(
            report.events,
            vec![SimulationEvent::TileOverloaded {
                pos: breaker,
                health: 100 - 10 * n
            }]
        );
    }

    let report = session.tick();
    assert_eq!(report.events, vec![SimulationEvent::TileDestroyed { pos: breaker }]);
    let tile = session.grid().get(breaker).unwrap();
    assert_eq!(tile.kind, TileKind::Empty);
    assert_eq!(tile.connections().as_array(), [false; 4]);

    // The cell stays dead: nothing flows into it on later ticks
    session.tick();
    assert_eq!(power_at(&session, 1, 0), 0);

    // ...until something is built there again
    assert!(session.place_component(breaker, Component::Breaker, Rotation::NONE));
    let rebuilt = session.grid().get(breaker).unwrap();
    assert_eq!(rebuilt.kind, TileKind::Breaker);
    assert_eq!(rebuilt.health, 100);
    assert_eq!(rebuilt.state, TileState::Normal);
    assert_eq!(rebuilt.capacity, 50);
    assert_eq!(rebuilt.connections().as_array(), [false, true, false, true]);

    session.tick();
    assert_eq!(power_at(&session, 1, 0), 60);
    assert_eq!(session.grid().get(breaker).unwrap().health, 90);
}

#[test]
fn test_t_junction_splits_with_floor_loss() {
    let (mut grid, _) = board(3, 3);
    put(&mut grid, 0, 1, TileKind::Generator { output: 9 }, 0);
    put(&mut grid, 1, 1, TileKind::Wire(WireShape::TShape), 0);
    put(&mut grid, 2, 1, TileKind::Wire(WireShape::Straight), 0);
    put(&mut grid, 1, 2, TileKind::Wire(WireShape::Straight), 1);

    let outcome = propagate(&mut grid, 50);

    assert_eq!(grid.get(GridPos::new(1, 1)).unwrap().power, 9);
    assert_eq!(grid.get(GridPos::new(2, 1)).unwrap().power, 4);
    assert_eq!(grid.get(GridPos::new(1, 2)).unwrap().power, 4);
    assert_eq!(outcome.rounds, 2);
    assert!(!outcome.hit_round_cap);
}

#[test]
fn test_sink_absorbs_at_most_its_demand() {
    let (mut grid, _) = board(3, 1);
    put(&mut grid, 0, 0, TileKind::Generator { output: 10 }, 0);
    put(&mut grid, 1, 0, TileKind::Sink { demand: 8 }, 0);
    put(&mut grid, 2, 0, TileKind::Generator { output: 7 }, 0);

    let outcome = propagate(&mut grid, 50);

    assert_eq!(grid.get(GridPos::new(1, 0)).unwrap().power, 17);
    assert_eq!(outcome.consumed, 8);
}

#[test]
fn test_generators_hold_their_output() {
    let (mut grid, config) = board(4, 3);
    put(&mut grid, 0, 1, TileKind::Generator { output: 10 }, 0);
    put(&mut grid, 1, 1, TileKind::Wire(WireShape::Cross), 0);
    put(&mut grid, 2, 1, TileKind::Wire(WireShape::Cross), 0);
    put(&mut grid, 3, 1, TileKind::Generator { output: 13 }, 0);

    let mut session = Session::from_grid(grid, config, 2u64).unwrap();
    for _ in 0..5 {
        session.tick();
        assert_eq!(power_at(&session, 0, 1), 10);
        assert_eq!(power_at(&session, 3, 1), 13);
    }
}

#[test]
fn test_misaligned_wire_blocks_flow() {
    let (mut grid, config) = board(3, 1);
    put(&mut grid, 0, 0, TileKind::Generator { output: 10 }, 0);
    put(&mut grid, 1, 0, TileKind::Wire(WireShape::Straight), 1);
    put(&mut grid, 2, 0, TileKind::Sink { demand: 5 }, 0);

    let mut session = Session::from_grid(grid, config, 3u64).unwrap();
    assert_eq!(session.tick().consumed, 0);
    assert_eq!(power_at(&session, 1, 0), 0);

    assert!(session.rotate_tile(GridPos::new(1, 0)));
    assert_eq!(session.tick().consumed, 5);
    assert_eq!(power_at(&session, 1, 0), 10);
}

#[test]
fn test_switch_gates_flow() {
    let (mut grid, config) = board(3, 1);
    put(&mut grid, 0, 0, TileKind::Generator { output: 10 }, 0);
    put(&mut grid, 2, 0, TileKind::Sink { demand: 3 }, 0);

    let mut session = Session::from_grid(grid, config, 4u64).unwrap();
    let switch = GridPos::new(1, 0);
    assert!(session.place_component(switch, Component::Switch, Rotation::NONE));
    assert_eq!(session.tick().consumed, 3);

    session.advance_clock(120);
    assert!(session.toggle_switch(switch));
    assert_eq!(session.tick().consumed, 0);
    assert_eq!(power_at(&session, 1, 0), 0);

    session.advance_clock(120);
    assert!(session.toggle_switch(switch));
    assert_eq!(session.tick().consumed, 3);
}

#[test]
fn test_power_does_not_carry_between_ticks() {
    let (mut grid, config) = board(3, 1);
    put(&mut grid, 0, 0, TileKind::Generator { output: 10 }, 0);
    put(&mut grid, 1, 0, TileKind::Wire(WireShape::Straight), 0);

    let mut session = Session::from_grid(grid, config, 5u64).unwrap();
    session.tick();
    session.tick();
    assert_eq!(power_at(&session, 1, 0), 10);
}
