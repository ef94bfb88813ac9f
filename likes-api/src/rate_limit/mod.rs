//! Per-identity rate limiting for like mutations.
//!
//! The limiter is injected behind a small trait so the in-memory store can be
//! swapped for a shared cache under multi-instance deployment. The default
//! implementation is process-local: a horizontally scaled deployment only
//! enforces the limit approximately, which is an accepted trade-off for
//! best-effort sentiment data.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Mutations allowed per identity per rolling window.
pub const MAX_REQUESTS_PER_WINDOW: u32 = 10;

/// Length of the rolling window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Decides whether an identity may perform another mutation right now.
pub trait RateLimiter: Send + Sync {
    /// Returns `true` when the request is allowed. A denied request has no
    /// side effects on the window.
    fn check(&self, id: &str) -> bool;
}

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Process-local sliding-window limiter.
///
/// Windows reset lazily: a request arriving after the stored expiry starts a
/// fresh window at count 1 rather than being proactively cleared.
pub struct InMemoryRateLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl InMemoryRateLimiter {
    /// Create a limiter with a custom budget and window.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Create a limiter with the service defaults (10 per 60 s).
    pub fn with_defaults() -> Self {
        Self::new(MAX_REQUESTS_PER_WINDOW, WINDOW)
    }

    fn check_at(&self, id: &str, now: Instant) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(id) {
            Some(entry) if now <= entry.reset_at => {
                if entry.count >= self.max_requests {
                    return false;
                }
                entry.count += 1;
                true
            }
            _ => {
                entries.insert(
                    id.to_string(),
                    WindowEntry {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check(&self, id: &str) -> bool {
        self.check_at(id, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_budget() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let now = Instant::now();

        for _ in 0..MAX_REQUESTS_PER_WINDOW {
            assert!(limiter.check_at("u1", now));
        }
    }

    #[test]
    fn test_eleventh_request_denied() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let now = Instant::now();

        for _ in 0..MAX_REQUESTS_PER_WINDOW {
            assert!(limiter.check_at("u1", now));
        }
        assert!(!limiter.check_at("u1", now));
    }

    #[test]
    fn test_window_elapse_resets_counter() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let start = Instant::now();

        for _ in 0..MAX_REQUESTS_PER_WINDOW {
            assert!(limiter.check_at("u1", start));
        }
        assert!(!limiter.check_at("u1", start));

        let later = start + WINDOW + Duration::from_secs(1);
        assert!(limiter.check_at("u1", later));
        // Fresh window: the reset left room for the rest of the budget.
        assert!(limiter.check_at("u1", later));
    }

    #[test]
    fn test_identities_are_independent() {
        let limiter = InMemoryRateLimiter::new(1, WINDOW);
        let now = Instant::now();

        assert!(limiter.check_at("u1", now));
        assert!(!limiter.check_at("u1", now));
        assert!(limiter.check_at("u2", now));
    }

    #[test]
    fn test_denied_request_has_no_side_effects() {
        let limiter = InMemoryRateLimiter::new(2, WINDOW);
        let start = Instant::now();

        assert!(limiter.check_at("u1", start));
        assert!(limiter.check_at("u1", start));
        assert!(!limiter.check_at("u1", start));

        // The denial did not extend the window.
        let later = start + WINDOW + Duration::from_secs(1);
        assert!(limiter.check_at("u1", later));
    }
}
