//! Repeated runs over one world.
//!
//! [`run_batch`] spreads independent runs over blocking worker tasks, at
//! most `workers` at a time. [`run_series`] plays runs one after another so
//! they can share a turn log and the terminal.
use std::sync::Arc;

use navigator::Navigator;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::SimConfig;
use crate::display::TerminalDisplay;
use crate::driver::{RunOutcome, Simulation};
use crate::error::{Result, SimError};
use crate::log::TurnLog;
use crate::world::World;

/// Outcomes of every run in a batch, in run order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<RunOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<RunOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.reached_goal).count()
    }

    /// Mean turn count over all runs, including those cut off by the limit.
    pub fn mean_turns(&self) -> Option<f64> {
        if self.outcomes.is_empty() {
            return None;
        }
        let total: u64 = self.outcomes.iter().map(|o| o.turns).sum();
        Some(total as f64 / self.outcomes.len() as f64)
    }

    pub fn min_turns(&self) -> Option<u64> {
        self.outcomes.iter().map(|o| o.turns).min()
    }

    pub fn max_turns(&self) -> Option<u64> {
        self.outcomes.iter().map(|o| o.turns).max()
    }

    pub fn median_turns(&self) -> Option<f64> {
        let mut turns: Vec<u64> = self.outcomes.iter().map(|o| o.turns).collect();
        turns.sort_unstable();
        let mid = turns.len() / 2;
        match turns.len() {
            0 => None,
            n if n % 2 == 1 => Some(turns[mid] as f64),
            _ => Some((turns[mid - 1] + turns[mid]) as f64 / 2.0),
        }
    }
}

/// Plays `runs` independent runs concurrently.
pub async fn run_batch(world: Arc<World>, config: SimConfig, runs: usize) -> Result<BatchReport> {
    let permits = Arc::new(Semaphore::new(config.workers.max(1)));
    let config = Arc::new(config);
    let mut tasks = JoinSet::new();

    for index in 0..runs {
        let world = Arc::clone(&world);
        let config = Arc::clone(&config);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| SimError::WorkersClosed)?;
            let outcome = tokio::task::spawn_blocking(move || {
                play(&world, &config, index as u64, None, None)
            })
            .await
            .map_err(SimError::WorkerJoin)??;
            Ok::<_, SimError>((index, outcome))
        });
    }

    let mut outcomes = vec![None; runs];
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined.map_err(SimError::WorkerJoin)??;
        tracing::info!("Batch {} complete after {} turns", index + 1, outcome.turns);
        outcomes[index] = Some(outcome);
    }

    Ok(BatchReport::new(outcomes.into_iter().flatten().collect()))
}

/// Plays `runs` runs one at a time, sharing the optional log and display.
pub fn run_series(
    world: &World,
    config: &SimConfig,
    runs: usize,
    mut log: Option<&mut TurnLog>,
    mut display: Option<&mut TerminalDisplay>,
) -> Result<BatchReport> {
    let mut outcomes = Vec::with_capacity(runs);
    for index in 0..runs {
        let outcome = play(
            world,
            config,
            index as u64,
            log.as_deref_mut(),
            display.as_deref_mut(),
        )?;
        tracing::info!("Batch {} complete after {} turns", index + 1, outcome.turns);
        outcomes.push(outcome);
    }
    Ok(BatchReport::new(outcomes))
}

fn play(
    world: &World,
    config: &SimConfig,
    index: u64,
    log: Option<&mut TurnLog>,
    display: Option<&mut TerminalDisplay>,
) -> Result<RunOutcome> {
    let agent = Navigator::with_config(config.navigator_config(index));
    let mut sim = Simulation::new(world, agent, config).with_run_index(index);
    if let Some(log) = log {
        sim = sim.with_log(log);
    }
    if let Some(display) = display {
        sim = sim.with_display(display);
    }
    sim.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(turns: u64, reached_goal: bool) -> RunOutcome {
        RunOutcome {
            turns,
            reached_goal,
        }
    }

    #[test]
    fn report_statistics() {
        let report = BatchReport::new(vec![
            outcome(10, true),
            outcome(4, true),
            outcome(30, false),
            outcome(8, true),
        ]);
        assert_eq!(report.count(), 4);
        assert_eq!(report.successes(), 3);
        assert_eq!(report.mean_turns(), Some(13.0));
        assert_eq!(report.min_turns(), Some(4));
        assert_eq!(report.max_turns(), Some(30));
        assert_eq!(report.median_turns(), Some(9.0));
    }

    #[test]
    fn empty_report_has_no_statistics() {
        let report = BatchReport::default();
        assert_eq!(report.mean_turns(), None);
        assert_eq!(report.median_turns(), None);
        assert_eq!(report.min_turns(), None);
    }

    #[test]
    fn odd_median_is_middle_value() {
        let report = BatchReport::new(vec![outcome(9, true), outcome(1, true), outcome(5, true)]);
        assert_eq!(report.median_turns(), Some(5.0));
    }
}
