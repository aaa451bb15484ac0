use crate::domain::ports::Clock;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Wall clock backed by `Instant::now` and `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug)]
struct MockClockState {
    now: Instant,
    sleeps: Vec<Duration>,
}

/// Virtual clock for tests: `sleep` returns immediately and moves time forward.
///
/// Clones share the same timeline, so a test can keep one handle and give
/// another to the limiter.
#[derive(Debug, Clone)]
pub struct MockClock {
    state: Arc<Mutex<MockClockState>>,
}

impl MockClock {
    pub fn new(start: Instant) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockClockState {
                now: start,
                sleeps: Vec::new(),
            })),
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.with_state(|state| state.now += duration);
    }

    /// Every pause requested through `sleep`, oldest first.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.with_state(|state| state.sleeps.clone())
    }

    pub fn total_slept(&self) -> Duration {
        self.with_state(|state| state.sleeps.iter().sum())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockClockState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

#[async_trait]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.with_state(|state| state.now)
    }

    async fn sleep(&self, duration: Duration) {
        self.with_state(|state| {
            state.sleeps.push(duration);
            state.now += duration;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_clock_sleep_advances_time() {
        let start = Instant::now();
        let clock = MockClock::new(start);

        clock.sleep(Duration::from_millis(250)).await;
        clock.advance(Duration::from_millis(50));

        assert_eq!(clock.now() - start, Duration::from_millis(300));
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(250)]);
    }

    #[tokio::test]
    async fn test_mock_clock_clones_share_timeline() {
        let clock = MockClock::default();
        let handle = clock.clone();
        let before = clock.now();

        handle.sleep(Duration::from_secs(1)).await;

        assert_eq!(clock.now() - before, Duration::from_secs(1));
        assert_eq!(clock.total_slept(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let before = clock.now();
        clock.sleep(Duration::from_millis(5)).await;
        assert!(clock.now() - before >= Duration::from_millis(5));
    }
}
