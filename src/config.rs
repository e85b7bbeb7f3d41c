use std::time::Duration;

/// Seconds slept between the render and commit of each generation
pub const DEFAULT_TICK: f32 = 0.5;
/// On average 1 in this many cells start alive. Higher means sparser.
pub const DEFAULT_DENSITY: u32 = 7;

/// Configuration for a Game of Life run
#[derive(Clone, Debug, PartialEq)]
pub struct LifeConfig {
    pub tick: Duration,
    pub density: u32,
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs_f32(DEFAULT_TICK),
            density: DEFAULT_DENSITY,
            seed: None,
        }
    }
}
