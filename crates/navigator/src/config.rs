/// Tunable behavior of a [`crate::Navigator`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigatorConfig {
    /// Dump the partial map at `trace` level every turn.
    pub debug_map: bool,

    /// Seed for exploration tie-breaking. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl NavigatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_debug_map(mut self, debug_map: bool) -> Self {
        self.debug_map = debug_map;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
