//! Turn-by-turn driver for a single run.
//!
//! Each turn the driver builds the percept at the agent's true position,
//! asks the agent for one action, resolves it against the world and
//! optionally logs and draws the result. A run ends when the agent uses the
//! finish marker or the turn limit is reached.
use navigator::{Agent, Position};
use serde::Serialize;

use crate::config::SimConfig;
use crate::display::TerminalDisplay;
use crate::error::Result;
use crate::log::{TurnLog, TurnRecord};
use crate::world::{Effect, World};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub turns: u64,
    pub reached_goal: bool,
}

pub struct Simulation<'w, A> {
    world: &'w World,
    agent: A,
    position: Position,
    turn: u64,
    run: u64,
    visibility: usize,
    max_turns: Option<u64>,
    log: Option<&'w mut TurnLog>,
    display: Option<&'w mut TerminalDisplay>,
}

impl<'w, A: Agent> Simulation<'w, A> {
    pub fn new(world: &'w World, agent: A, config: &SimConfig) -> Self {
        Self {
            world,
            agent,
            position: world.start(),
            turn: 0,
            run: 0,
            visibility: config.visibility.max(1),
            max_turns: config.max_turns,
            log: None,
            display: None,
        }
    }

    /// Tags log records with the batch run index.
    pub fn with_run_index(mut self, run: u64) -> Self {
        self.run = run;
        self
    }

    pub fn with_log(mut self, log: &'w mut TurnLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn with_display(mut self, display: &'w mut TerminalDisplay) -> Self {
        self.display = Some(display);
        self
    }

    /// Agent's true world position.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Plays one turn and returns what happened.
    pub fn step(&mut self) -> Result<TurnRecord> {
        self.turn += 1;
        let percept = self.world.percept(self.position, self.visibility);
        let action = self.agent.update(&percept);
        let before = self.position;

        let effect = self.world.apply(self.position, action);
        match effect {
            Effect::Moved(destination) => self.position = destination,
            Effect::Blocked => {
                tracing::trace!("Turn {}: {} blocked at {}", self.turn, action, self.position)
            }
            Effect::ReachedGoal | Effect::Idle => {}
        }

        let record = TurnRecord {
            run: self.run,
            turn: self.turn,
            position: before,
            percept: percept.to_symbols().into_iter().collect(),
            action,
            reached_goal: effect == Effect::ReachedGoal,
        };

        if let Some(log) = self.log.as_deref_mut() {
            log.record(&record)?;
        }
        if let Some(display) = self.display.as_deref_mut() {
            display.draw(self.world, self.position, self.turn, action)?;
        }
        Ok(record)
    }

    /// Plays turns until the goal is used or the turn limit is hit.
    pub fn run(mut self) -> Result<RunOutcome> {
        let reached_goal = loop {
            if self.max_turns.is_some_and(|limit| self.turn >= limit) {
                break false;
            }
            if self.step()?.reached_goal {
                break true;
            }
        };

        if let Some(log) = self.log.as_deref_mut() {
            log.flush()?;
        }

        if reached_goal {
            tracing::debug!("Run {} reached the finish after {} turns", self.run, self.turn);
        } else {
            tracing::warn!("Run {} stopped at the turn limit ({})", self.run, self.turn);
        }

        Ok(RunOutcome {
            turns: self.turn,
            reached_goal,
        })
    }
}
