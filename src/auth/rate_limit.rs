use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_FAILURES: usize = 5;
const WINDOW: Duration = Duration::from_secs(15 * 60);

/// Failed sign-in attempts per client IP over a sliding window.
#[derive(Clone)]
pub struct RateLimiter {
    max_failures: usize,
    window: Duration,
    failures: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MAX_FAILURES, WINDOW)
    }
}

impl RateLimiter {
    pub fn new(max_failures: usize, window: Duration) -> Self {
        Self {
            max_failures,
            window,
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        self.is_blocked_at(ip, Instant::now())
    }

    pub fn record_failure(&self, ip: IpAddr) {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(ip).or_default().push(Instant::now());
    }

    /// Forget an IP after a successful sign-in.
    pub fn clear(&self, ip: IpAddr) {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&ip);
    }

    fn is_blocked_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let Some(stamps) = map.get_mut(&ip) else {
            return false;
        };
        stamps.retain(|t| now.saturating_duration_since(*t) < self.window);
        if stamps.is_empty() {
            map.remove(&ip);
            return false;
        }
        stamps.len() >= self.max_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    #[test]
    fn blocks_after_max_failures() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..2 {
            limiter.record_failure(ip(1));
        }
        assert!(!limiter.is_blocked(ip(1)));
        limiter.record_failure(ip(1));
        assert!(limiter.is_blocked(ip(1)));
        assert!(!limiter.is_blocked(ip(2)));
    }

    #[test]
    fn clear_unblocks() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        limiter.record_failure(ip(3));
        assert!(limiter.is_blocked(ip(3)));
        limiter.clear(ip(3));
        assert!(!limiter.is_blocked(ip(3)));
    }

    #[test]
    fn failures_expire_after_window() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        limiter.record_failure(ip(4));
        let later = Instant::now() + Duration::from_secs(61);
        assert!(!limiter.is_blocked_at(ip(4), later));
    }
}
