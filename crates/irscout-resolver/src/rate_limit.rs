//! Process-wide spacing for web-search fallback calls.
//!
//! Search engines block clients that query in quick succession. Every search
//! reserves a slot at least `min_interval` after the previous one; a throttled
//! caller additionally waits a random jitter. The reservation happens under a
//! lock, so two resolutions racing for the search fallback are spaced out
//! rather than both proceeding.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of the current instant, injectable for deterministic tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

pub struct SearchRateLimiter {
    clock: Arc<dyn Clock>,
    min_interval: Duration,
    jitter_min_ms: u64,
    jitter_max_ms: u64,
    /// Instant at which the most recently granted search may run.
    last_granted: Mutex<Option<Instant>>,
}

impl SearchRateLimiter {
    /// Creates a limiter. A `jitter_max_ms` smaller than `jitter_min_ms` is
    /// raised to it.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        min_interval: Duration,
        jitter_min_ms: u64,
        jitter_max_ms: u64,
    ) -> Self {
        Self {
            clock,
            min_interval,
            jitter_min_ms,
            jitter_max_ms: jitter_max_ms.max(jitter_min_ms),
            last_granted: Mutex::new(None),
        }
    }

    /// A limiter with real time and no spacing at all.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self::new(Arc::new(SystemClock), Duration::ZERO, 0, 0)
    }

    /// Reserves the next search slot and returns how long the caller must
    /// wait before searching. `Duration::ZERO` means "go now".
    pub fn try_acquire(&self) -> Duration {
        let mut last = self
            .last_granted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        let wait = match *last {
            Some(prev) => {
                let ready_at = prev + self.min_interval;
                if now >= ready_at {
                    Duration::ZERO
                } else {
                    (ready_at - now) + self.jitter()
                }
            }
            None => Duration::ZERO,
        };

        *last = Some(now + wait);
        wait
    }

    /// Waits until a search is allowed.
    pub async fn acquire(&self) {
        let wait = self.try_acquire();
        if !wait.is_zero() {
            tracing::warn!(
                wait_secs = wait.as_secs_f64(),
                "throttling web search fallback"
            );
            tokio::time::sleep(wait).await;
        }
    }

    fn jitter(&self) -> Duration {
        if self.jitter_max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::random_range(self.jitter_min_ms..=self.jitter_max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    fn limiter(clock: &Arc<ManualClock>) -> SearchRateLimiter {
        SearchRateLimiter::new(
            Arc::clone(clock) as Arc<dyn Clock>,
            Duration::from_secs(12),
            2_000,
            5_000,
        )
    }

    #[test]
    fn first_search_is_not_delayed() {
        let clock = Arc::new(ManualClock::new());
        assert_eq!(limiter(&clock).try_acquire(), Duration::ZERO);
    }

    #[test]
    fn second_search_within_three_seconds_waits_until_interval_plus_jitter() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(&clock);

        assert_eq!(limiter.try_acquire(), Duration::ZERO);
        clock.advance(Duration::from_secs(3));
        let wait = limiter.try_acquire();

        assert!(
            wait >= Duration::from_secs(9) + Duration::from_secs(2),
            "wait too short: {wait:?}"
        );
        assert!(
            wait <= Duration::from_secs(9) + Duration::from_secs(5),
            "wait too long: {wait:?}"
        );
        assert!(Duration::from_secs(3) + wait >= Duration::from_secs(12));
    }

    #[test]
    fn search_after_interval_is_not_delayed() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(&clock);

        limiter.try_acquire();
        clock.advance(Duration::from_secs(12));
        assert_eq!(limiter.try_acquire(), Duration::ZERO);
    }

    #[test]
    fn simultaneous_callers_are_spaced_apart() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(&clock);

        let first = limiter.try_acquire();
        let second = limiter.try_acquire();
        let third = limiter.try_acquire();

        assert_eq!(first, Duration::ZERO);
        assert!(second >= Duration::from_secs(14));
        assert!(third >= second + Duration::from_secs(12));
    }

    #[test]
    fn unthrottled_never_waits() {
        let limiter = SearchRateLimiter::unthrottled();
        assert_eq!(limiter.try_acquire(), Duration::ZERO);
        assert_eq!(limiter.try_acquire(), Duration::ZERO);
    }

    #[tokio::test]
    async fn acquire_returns_immediately_when_clear() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(&clock);
        tokio::time::timeout(Duration::from_millis(200), limiter.acquire())
            .await
            .expect("first acquire should not sleep");
    }
}
