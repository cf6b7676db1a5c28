//! Simulation configuration structures and loaders.
use std::env;
use std::time::Duration;

use navigator::NavigatorConfig;

/// Settings shared by every run of a simulation or batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Turn limit per run; `None` runs until the goal is used.
    pub max_turns: Option<u64>,
    /// Cells visible along each percept ray. `1` is the plain 3x3 window.
    pub visibility: usize,
    /// Concurrent runs in a batch.
    pub workers: usize,
    /// Redraw delay when the terminal display is enabled.
    pub frame_delay: Option<Duration>,
    pub debug_map: bool,
    /// Base seed; run `i` of a batch uses `seed + i`.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub const DEFAULT_MAX_TURNS: u64 = 100_000;
    pub const DEFAULT_VISIBILITY: usize = 1;

    pub fn new() -> Self {
        Self {
            max_turns: Some(Self::DEFAULT_MAX_TURNS),
            visibility: Self::DEFAULT_VISIBILITY,
            workers: default_workers(),
            frame_delay: None,
            debug_map: false,
            seed: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WAYFINDER_MAX_TURNS` - Turn limit per run, `0` for unlimited (default: 100000)
    /// - `WAYFINDER_VISIBILITY` - Cells visible along each ray (default: 1)
    /// - `WAYFINDER_WORKERS` - Concurrent batch runs (default: available parallelism)
    /// - `WAYFINDER_DEBUG_MAP` - Dump agent memory at trace level (default: false)
    /// - `WAYFINDER_SEED` - Base RNG seed (default: OS entropy)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(turns) = read_env::<u64>("WAYFINDER_MAX_TURNS") {
            config.max_turns = (turns > 0).then_some(turns);
        }

        if let Some(visibility) = read_env::<usize>("WAYFINDER_VISIBILITY") {
            config.visibility = visibility.max(1);
        }

        if let Some(workers) = read_env::<usize>("WAYFINDER_WORKERS") {
            config.workers = workers.max(1);
        }

        if let Some(enable) = read_env::<bool>("WAYFINDER_DEBUG_MAP") {
            config.debug_map = enable;
        } else if env::var("WAYFINDER_DEBUG_MAP").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.debug_map = true;
        }

        config.seed = read_env::<u64>("WAYFINDER_SEED");

        config
    }

    /// Agent configuration for the `run_index`-th run.
    pub fn navigator_config(&self, run_index: u64) -> NavigatorConfig {
        NavigatorConfig {
            debug_map: self.debug_map,
            seed: self.seed.map(|seed| seed.wrapping_add(run_index)),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
