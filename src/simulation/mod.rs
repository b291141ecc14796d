pub mod driver;
pub mod overload;
pub mod perturbation;
pub mod propagation;
pub mod session;
pub mod tick;

pub use driver::TickDriver;
pub use overload::{apply_overload, run_overload_pass, OverloadChange, OverloadResult};
pub use perturbation::relocate_random_generator;
pub use propagation::{propagate, PropagationOutcome, Pulse};
pub use session::Session;
pub use tick::{run_simulation_tick, SimulationEvent, TickReport};
