//! Memory, exploration and goal seeking for a single grid agent.
//!
//! `navigator` turns a stream of local percepts into one action per turn. It
//! never sees the world map; instead it grows a [`PartialMap`] from what it
//! observes, walks toward the nearest [`FrontierExplorer`] target while the
//! goal is unknown, and switches to a straight goal plan the moment a finish
//! marker comes into view. All state lives in [`Navigator`], which the
//! simulation driver calls through the [`Agent`] trait.
pub mod action;
pub mod cell;
pub mod config;
pub mod controller;
pub mod explorer;
pub mod geometry;
pub mod map;
pub mod percept;
pub mod plan;
pub mod render;
pub mod terrain;

pub use action::{Action, ActionParseError};
pub use cell::{CellRecord, DirectionSet};
pub use config::NavigatorConfig;
pub use controller::{Agent, Navigator};
pub use explorer::{Exploration, FrontierExplorer};
pub use geometry::{Bearing, Heading, Position};
pub use map::PartialMap;
pub use percept::{Percept, PerceptError};
pub use plan::{Mode, Plan};
pub use render::MapView;
pub use terrain::Terrain;
