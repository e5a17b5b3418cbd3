use rand::Rng;
use std::thread;
use std::time::Duration;

use crate::utils::constants::WAITING_TIME_SECONDS_STATION_INFO;

/// Pause inserted after every station request to stay clear of rate limiting.
///
/// The pause is drawn uniformly from `[base - base/2, base]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestThrottle {
    base: Duration,
}

impl RequestThrottle {
    pub fn new(base: Duration) -> Self {
        Self { base }
    }

    /// No pause at all, for tests and stubbed lookups
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn next_delay(&self, rng: &mut impl Rng) -> Duration {
        let base_ms = self.base.as_millis() as u64;
        let half_ms = base_ms / 2;
        if half_ms == 0 {
            return self.base;
        }

        Duration::from_millis(base_ms - half_ms + rng.random_range(0..=half_ms))
    }

    pub fn wait(&self) {
        let delay = self.next_delay(&mut rand::rng());
        if !delay.is_zero() {
            tracing::debug!("Waiting {:?} before the next request", delay);
            thread::sleep(delay);
        }
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new(Duration::from_secs(WAITING_TIME_SECONDS_STATION_INFO))
    }
}
