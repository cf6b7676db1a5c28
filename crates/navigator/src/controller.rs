//! Per-turn decision loop.
//!
//! Each turn the navigator:
//!
//! 1. Uses the current cell immediately if it is the finish marker
//! 2. Records every cell along the eight percept rays
//! 3. Replaces any plan with a straight walk to a finish marker sighted on a
//!    cardinal ray
//! 4. Plans a route to the nearest frontier when nothing is planned
//! 5. Pops and performs the first planned action
//!
//! Goal sightings always preempt exploration plans; exploration never
//! preempts a goal plan.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::Action;
use crate::cell::CellRecord;
use crate::config::NavigatorConfig;
use crate::explorer::{Exploration, FrontierExplorer};
use crate::geometry::Position;
use crate::map::PartialMap;
use crate::percept::Percept;
use crate::plan::{Mode, Plan};
use crate::render::MapView;
use crate::terrain::Terrain;

/// Anything that turns a percept into exactly one action per turn.
pub trait Agent {
    fn update(&mut self, percept: &Percept) -> Action;
}

/// Single exploring agent with its own partial map and plan.
///
/// The navigator is strictly turn-synchronous and owns all of its state;
/// parallel runs each construct their own instance.
#[derive(Debug)]
pub struct Navigator<R = StdRng> {
    map: PartialMap,
    location: Position,
    plan: Plan,
    rng: R,
    config: NavigatorConfig,
    turn: u64,
}

impl Navigator<StdRng> {
    pub fn new() -> Self {
        Self::with_config(NavigatorConfig::default())
    }

    pub fn with_config(config: NavigatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for Navigator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Navigator<R> {
    /// Navigator drawing exploration tie-breaks from `rng`.
    ///
    /// The starting cell is recorded as open floor at the origin.
    pub fn with_rng(config: NavigatorConfig, rng: R) -> Self {
        let mut map = PartialMap::new();
        map.record_cell(CellRecord::new(Position::ORIGIN, Terrain::Floor));
        Self {
            map,
            location: Position::ORIGIN,
            plan: Plan::Idle,
            rng,
            config,
            turn: 0,
        }
    }

    /// Agent-relative location, moved only by successful steps.
    pub fn location(&self) -> Position {
        self.location
    }

    pub fn map(&self) -> &PartialMap {
        &self.map
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn mode(&self) -> Mode {
        self.plan.mode()
    }

    /// Number of completed `update` calls.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Runs one turn and returns the chosen action.
    pub fn update(&mut self, percept: &Percept) -> Action {
        self.turn += 1;

        if percept.here().is_finish() {
            tracing::debug!("Turn {}: standing on finish at {}, using it", self.turn, self.location);
            return Action::Use;
        }

        self.observe(percept);

        if let Some(goal) = Self::goal_plan(percept) {
            if !self.plan.is_empty() {
                tracing::debug!(
                    "Turn {}: finish sighted, dropping {} pending steps ({})",
                    self.turn,
                    self.plan.len(),
                    self.plan.mode()
                );
            }
            self.plan = goal;
        }

        if self.plan.is_idle() {
            self.plan = self.explore();
        }

        let action = self
            .plan
            .pop()
            .unwrap_or_else(|| Action::Move(FrontierExplorer::random_step(&mut self.rng)));
        self.perform(action);

        tracing::debug!(
            "Turn {}: {} -> now at {} ({}, {} pending)",
            self.turn,
            action,
            self.location,
            self.plan.mode(),
            self.plan.len()
        );
        action
    }

    fn observe(&mut self, percept: &Percept) {
        for (bearing, ray) in percept.rays() {
            for (depth, terrain) in ray.iter().enumerate() {
                let position = self.location.along(bearing, depth as i32 + 1);
                self.map.record_cell(CellRecord::new(position, *terrain));
            }
        }

        if self.config.debug_map {
            tracing::trace!(
                "Turn {} memory:\n{}",
                self.turn,
                MapView::new(&self.map).with_agent(self.location)
            );
        }
    }

    /// Shortest straight-line plan to a finish marker on a cardinal ray.
    ///
    /// Rays end at the first wall, so every cell before a sighted finish on
    /// a cardinal ray is passable. A finish seen only diagonally is recorded
    /// and left to exploration.
    fn goal_plan(percept: &Percept) -> Option<Plan> {
        percept
            .rays()
            .filter_map(|(bearing, _)| {
                let heading = bearing.as_heading()?;
                let depth = percept.finish_depth(bearing)?;
                Some(Plan::toward_finish(heading, depth))
            })
            .min_by_key(Plan::len)
    }

    fn explore(&mut self) -> Plan {
        match FrontierExplorer::new(&self.map).search(self.location, &mut self.rng) {
            Exploration::Path(path) if !path.is_empty() => Plan::exploring(path),
            Exploration::Path(_) => {
                // current cell is itself a frontier; nudge into the unknown
                let heading = FrontierExplorer::random_step(&mut self.rng);
                tracing::debug!(
                    "Turn {}: frontier underfoot at {}, stepping {}",
                    self.turn,
                    self.location,
                    heading
                );
                Plan::exploring([heading])
            }
            Exploration::Fallback(heading) => {
                tracing::warn!(
                    "Turn {}: nothing left to explore from {}, wandering {}",
                    self.turn,
                    self.location,
                    heading
                );
                Plan::exploring([heading])
            }
        }
    }

    /// Applies the movement side effect of `action`. Steps into walls or
    /// unrecorded cells leave the agent in place.
    fn perform(&mut self, action: Action) {
        let Some(heading) = action.heading() else {
            return;
        };
        let destination = self.location.offset(heading);
        match self.map.cell_at(destination) {
            Some(cell) if cell.is_passable() => self.location = destination,
            Some(_) => tracing::debug!("Move {} into wall at {} dropped", heading, destination),
            None => tracing::debug!("Move {} into unknown {} dropped", heading, destination),
        }
    }
}

impl<R: Rng> Agent for Navigator<R> {
    fn update(&mut self, percept: &Percept) -> Action {
        Navigator::update(self, percept)
    }
}
