//! Ground-truth worlds and run drivers for navigator agents.
//!
//! The simulator owns everything the agent must not see: the full world
//! grid, the agent's true position and the turn limit. It hands the agent
//! one [`Percept`](navigator::Percept) per turn, applies the returned
//! action and reports how the run ended.
pub mod batch;
pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod log;
pub mod world;

pub use batch::{BatchReport, run_batch, run_series};
pub use config::SimConfig;
pub use display::TerminalDisplay;
pub use driver::{RunOutcome, Simulation};
pub use error::{Result, SimError, WorldError};
pub use log::{TurnLog, TurnRecord};
pub use world::{Effect, World};
