pub mod clock;
pub mod config;
pub mod grid;
pub mod history;
pub mod nature;
pub mod rng;
pub mod scenario;
pub mod sim;
pub mod terrain;

pub use config::{ConfigError, TickRange, WorldConfig};
pub use scenario::{Scenario, ScenarioLoader};
pub use sim::Simulation;
