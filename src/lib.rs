//! Circuit Commander - grid power-flow simulation
//!
//! Generators push power through player-built wires, breakers and switches
//! toward sinks. Each tick runs a wavefront propagation pass, an overload
//! pass that burns out over-capacity tiles, and a periodic generator
//! relocation. A `simulation::Session` owns one game.

pub mod core;
pub mod edit;
pub mod generation;
pub mod grid;
pub mod simulation;
