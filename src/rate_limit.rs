use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// In-memory sliding-window limiter keyed by `bucket:ip_hash`.
pub struct RateLimiter {
    entries: Mutex<HashMap<String, Vec<Instant>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        RateLimiter {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt; false once `key` already has `max_attempts` inside `window`.
    pub fn check_and_record(&self, key: &str, max_attempts: u64, window: Duration) -> bool {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let attempts = map.entry(key.to_string()).or_default();
        attempts.retain(|t| now.duration_since(*t) < window);

        if (attempts.len() as u64) < max_attempts {
            attempts.push(now);
            true
        } else {
            false
        }
    }

    /// Drop attempts older than `max_age` and keys left empty.
    pub fn cleanup(&self, max_age: Duration) {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        map.retain(|_, attempts| {
            attempts.retain(|t| now.duration_since(*t) < max_age);
            !attempts.is_empty()
        });
    }

    pub fn tracked_keys(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_limit() {
        let rl = RateLimiter::new();
        let w = Duration::from_secs(60);
        assert!(rl.check_and_record("contact:a", 2, w));
        assert!(rl.check_and_record("contact:a", 2, w));
        assert!(!rl.check_and_record("contact:a", 2, w));
        // other clients are unaffected
        assert!(rl.check_and_record("contact:b", 2, w));
        assert_eq!(rl.tracked_keys(), 2);
    }

    #[test]
    fn window_expires() {
        let rl = RateLimiter::new();
        let w = Duration::from_millis(20);
        assert!(rl.check_and_record("k", 1, w));
        assert!(!rl.check_and_record("k", 1, w));
        std::thread::sleep(Duration::from_millis(30));
        assert!(rl.check_and_record("k", 1, w));
    }

    #[test]
    fn cleanup_drops_stale_keys() {
        let rl = RateLimiter::new();
        rl.check_and_record("k", 5, Duration::from_secs(60));
        std::thread::sleep(Duration::from_millis(5));
        rl.cleanup(Duration::from_millis(1));
        assert_eq!(rl.tracked_keys(), 0);
    }
}
