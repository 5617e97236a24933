use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Fixed-window request counter keyed by client identity.
///
/// Each key gets `max_requests` per window; the counter resets when the
/// window expires. Constructor-injected so that every test (and every
/// server instance) owns an isolated limiter instead of sharing
/// process-wide state.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record one request for `key`. Returns false when the key has
    /// exhausted its budget for the current window.
    pub fn try_acquire(&self, key: &str) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");
        let now = Instant::now();

        let window = windows.entry(key.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return false;
        }

        window.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_the_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));

        assert!(limiter.try_acquire("client"));
        assert!(limiter.try_acquire("client"));
        assert!(limiter.try_acquire("client"));
        assert!(!limiter.try_acquire("client"));
    }

    #[test]
    fn test_keys_are_counted_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.try_acquire("first"));
        assert!(limiter.try_acquire("second"));
        assert!(!limiter.try_acquire("first"));
    }

    #[test]
    fn test_window_expiry_resets_the_counter() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));

        assert!(limiter.try_acquire("client"));
        assert!(!limiter.try_acquire("client"));

        std::thread::sleep(Duration::from_millis(30));

        assert!(limiter.try_acquire("client"));
    }

    #[test]
    fn test_instances_are_isolated() {
        let first = RateLimiter::new(1, Duration::from_secs(60));
        let second = RateLimiter::new(1, Duration::from_secs(60));

        assert!(first.try_acquire("client"));
        assert!(second.try_acquire("client"));
    }
}
