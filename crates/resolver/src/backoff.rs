use std::time::Duration;

/// Capped exponential delay sequence for polling loops.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    initial: Duration,
    max: Duration,
    multiplier: f64,
    attempt: u32,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            multiplier: 2.0,
            attempt: 0,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// The delay to sleep before the next attempt. Grows by `multiplier`
    /// per call, capped at `max`.
    pub fn next_delay(&mut self) -> Duration {
        let factor = self.multiplier.powi(self.attempt as i32);
        self.attempt = self.attempt.saturating_add(1);
        let secs = (self.initial.as_secs_f64() * factor).min(self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Number of delays handed out since creation or the last reset.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        // Matched to local-chain block times; sub-second polling just
        // burns queries between blocks.
        Self::new(Duration::from_millis(500), Duration::from_secs(10))
    }
}
