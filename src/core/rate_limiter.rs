use crate::core::clock::SystemClock;
use crate::domain::ports::Clock;
use std::future::Future;
use std::time::{Duration, Instant};

/// NCBI allows three requests per second without an API key.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(350);

/// Added on top of the configured interval before every call.
pub const INTERVAL_EPSILON: Duration = Duration::from_millis(10);

/// Enforces a minimum gap between successive calls.
///
/// The gap is measured from the moment the previous call *returned*, so a slow
/// call counts towards the next interval. The limiter is single-threaded:
/// `call` takes `&mut self` and there is no internal locking. Callers that
/// share one limiter across tasks must wrap it in their own mutex.
#[derive(Debug)]
pub struct RateLimiter<C: Clock = SystemClock> {
    clock: C,
    min_interval: Duration,
    previous_call: Option<Instant>,
}

impl RateLimiter<SystemClock> {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(min_interval: Duration, clock: C) -> Self {
        Self {
            clock,
            min_interval,
            previous_call: None,
        }
    }

    /// `min_interval + INTERVAL_EPSILON`
    pub fn spacing(&self) -> Duration {
        self.min_interval + INTERVAL_EPSILON
    }

    /// How long the next call would have to wait right now.
    pub fn wait_time(&self) -> Duration {
        match self.previous_call {
            None => Duration::ZERO,
            Some(previous) => {
                let elapsed = self.clock.now().saturating_duration_since(previous);
                self.spacing().saturating_sub(elapsed)
            }
        }
    }

    /// Run `f` once the interval since the previous call has passed.
    pub async fn call<F, Fut, T>(&mut self, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let wait = self.wait_time();
        if !wait.is_zero() {
            tracing::debug!("⏳ Rate limit: sleeping {:?} before next request", wait);
            self.clock.sleep(wait).await;
        }

        let value = f().await;
        self.previous_call = Some(self.clock.now());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::MockClock;

    fn mock_limiter(min_interval: Duration) -> (RateLimiter<MockClock>, MockClock) {
        let clock = MockClock::default();
        (RateLimiter::with_clock(min_interval, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_first_call_runs_immediately() {
        let (mut limiter, clock) = mock_limiter(DEFAULT_MIN_INTERVAL);

        let value = limiter.call(|| async { 42 }).await;

        assert_eq!(value, 42);
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_back_to_back_call_waits_full_spacing() {
        let (mut limiter, clock) = mock_limiter(DEFAULT_MIN_INTERVAL);

        limiter.call(|| async {}).await;
        limiter.call(|| async {}).await;

        assert_eq!(clock.sleeps(), vec![Duration::from_millis(360)]);
    }

    #[tokio::test]
    async fn test_partial_elapsed_time_shortens_wait() {
        let (mut limiter, clock) = mock_limiter(DEFAULT_MIN_INTERVAL);

        limiter.call(|| async {}).await;
        clock.advance(Duration::from_millis(200));
        assert_eq!(limiter.wait_time(), Duration::from_millis(160));

        limiter.call(|| async {}).await;
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(160)]);
    }

    #[tokio::test]
    async fn test_no_wait_after_interval_has_passed() {
        let (mut limiter, clock) = mock_limiter(DEFAULT_MIN_INTERVAL);

        limiter.call(|| async {}).await;
        clock.advance(Duration::from_secs(1));
        limiter.call(|| async {}).await;

        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_timestamp_taken_after_slow_call_returns() {
        let (mut limiter, clock) = mock_limiter(DEFAULT_MIN_INTERVAL);

        let handle = clock.clone();
        limiter
            .call(|| async move { handle.advance(Duration::from_millis(500)) })
            .await;

        // 500ms 的呼叫本身不抵扣下一次的間隔
        assert_eq!(limiter.wait_time(), Duration::from_millis(360));
    }

    #[tokio::test]
    async fn test_n_calls_span_at_least_n_minus_one_intervals() {
        let (mut limiter, clock) = mock_limiter(DEFAULT_MIN_INTERVAL);
        let start = clock.now();
        let calls = 6u32;

        for i in 0..calls {
            let echoed = limiter.call(|| async move { i }).await;
            assert_eq!(echoed, i);
        }

        let elapsed = clock.now() - start;
        assert!(elapsed >= limiter.spacing() * (calls - 1));
        assert_eq!(clock.sleeps().len(), (calls - 1) as usize);
    }

    #[tokio::test]
    async fn test_zero_interval_still_applies_epsilon() {
        let (mut limiter, clock) = mock_limiter(Duration::ZERO);

        limiter.call(|| async {}).await;
        limiter.call(|| async {}).await;

        assert_eq!(clock.sleeps(), vec![INTERVAL_EPSILON]);
    }

    #[tokio::test]
    async fn test_system_clock_enforces_real_spacing() {
        let mut limiter = RateLimiter::new(Duration::from_millis(20));
        let start = std::time::Instant::now();

        for _ in 0..4 {
            limiter.call(|| async {}).await;
        }

        assert!(start.elapsed() >= Duration::from_millis(30) * 3);
    }
}
