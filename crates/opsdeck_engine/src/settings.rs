use std::sync::Arc;
use std::time::Duration;

/// Timing and probability knobs for the simulation.
///
/// Every random draw flows through one RNG seeded from `seed`, so a given
/// settings value replays the identical run.
#[derive(Clone)]
pub struct SimSettings {
    /// Lower bound of the per-task stagger increment.
    pub stagger_min: Duration,
    /// Upper bound (exclusive) of the per-task stagger increment.
    pub stagger_max: Duration,
    /// Probability that a task resolves successfully.
    pub success_probability: f64,
    /// Delay before the merge result is reported.
    pub merge_delay: Duration,
    /// Delay between the merge result and the sync-complete event.
    pub settle_delay: Duration,
    /// Period of the upload progress ticker.
    pub tick_period: Duration,
    /// Points added to the upload progress per tick.
    pub tick_step: u8,
    /// How long the complete banner stays up.
    pub banner_duration: Duration,
    /// Seed for the simulation RNG.
    pub seed: u64,
    /// Clock used to stamp synthetic task output. Empty string disables the
    /// stamp.
    pub now: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            stagger_min: Duration::from_millis(500),
            stagger_max: Duration::from_millis(1000),
            success_probability: 0.8,
            merge_delay: Duration::from_millis(500),
            settle_delay: Duration::from_millis(1000),
            tick_period: Duration::from_millis(100),
            tick_step: 5,
            banner_duration: Duration::from_millis(3000),
            seed: 42,
            now: Arc::new(String::new),
        }
    }
}
