//! Command-line runner for navigator agents.
//!
//! Loads a world file, plays one or more runs and prints how many turns each
//! run took followed by the mean.
//!
//! ```bash
//! # five concurrent runs on the sample maze
//! wayfinder -w worlds/maze.txt -b 5
//!
//! # watch a single run and keep a turn log
//! wayfinder -w worlds/maze.txt -d 0.1 -l turns.jsonl
//! ```
mod logging;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use simulator::{BatchReport, SimConfig, TerminalDisplay, TurnLog, World, run_batch, run_series};

/// Run navigator agents through a grid world
#[derive(Parser, Debug)]
#[command(name = "wayfinder")]
#[command(about = "Run navigator agents through a grid world", long_about = None)]
#[command(version)]
struct Cli {
    /// World file to load
    #[arg(short, long, value_name = "WORLD")]
    world: PathBuf,

    /// Write a JSON-lines turn log
    #[arg(short, long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Redraw the world every turn, pausing this many seconds
    #[arg(short = 'd', long = "delay", value_name = "SECS")]
    delay: Option<f64>,

    /// Turn limit per run (0 for unlimited)
    #[arg(short = 't', long = "max-turns", value_name = "TURNS")]
    max_turns: Option<u64>,

    /// Number of runs
    #[arg(short = 'b', long = "batches", default_value_t = 1)]
    batches: usize,

    /// Concurrent runs
    #[arg(long)]
    workers: Option<usize>,

    /// Cells visible along each percept ray
    #[arg(long)]
    visibility: Option<usize>,

    /// Base RNG seed; run i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Trace the agent's memory every turn
    #[arg(long)]
    debug_map: bool,
}

impl Cli {
    /// Environment config with command-line overrides applied.
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = SimConfig::from_env();
        if let Some(turns) = self.max_turns {
            config.max_turns = (turns > 0).then_some(turns);
        }
        if let Some(workers) = self.workers {
            config.workers = workers.max(1);
        }
        if let Some(visibility) = self.visibility {
            config.visibility = visibility.max(1);
        }
        if let Some(secs) = self.delay {
            let delay = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid frame delay: {secs}"))?;
            config.frame_delay = Some(delay);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.debug_map |= self.debug_map;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging()?;

    let config = cli.sim_config()?;
    let world = World::load(&cli.world)
        .with_context(|| format!("failed to load world {}", cli.world.display()))?;

    tracing::info!(
        "Loaded {}x{} world from {}",
        world.width(),
        world.height(),
        cli.world.display()
    );

    let report = if cli.log.is_some() || config.frame_delay.is_some() {
        run_observed(&cli, &world, &config)?
    } else {
        run_batch(Arc::new(world), config, cli.batches).await?
    };

    print_report(&report);
    Ok(())
}

/// Plays runs one at a time so they can share the log file and terminal.
fn run_observed(cli: &Cli, world: &World, config: &SimConfig) -> Result<BatchReport> {
    let mut log = match &cli.log {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create turn log {}", path.display()))?;
            Some(TurnLog::new(file))
        }
        None => None,
    };
    let mut display = config.frame_delay.map(TerminalDisplay::new);

    Ok(run_series(
        world,
        config,
        cli.batches,
        log.as_mut(),
        display.as_mut(),
    )?)
}

fn print_report(report: &BatchReport) {
    for (index, outcome) in report.outcomes.iter().enumerate() {
        let status = if outcome.reached_goal { "complete" } else { "stopped" };
        println!("Batch {} {} after {} turns", index + 1, status, outcome.turns);
    }

    if let Some(mean) = report.mean_turns() {
        println!("Mean turn count: {mean:.2}");
    }
    if report.count() > 1 {
        println!(
            "Reached finish: {}/{} (min {}, median {}, max {})",
            report.successes(),
            report.count(),
            report.min_turns().unwrap_or_default(),
            report.median_turns().unwrap_or_default(),
            report.max_turns().unwrap_or_default()
        );
    }
}
