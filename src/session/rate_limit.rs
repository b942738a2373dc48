//! Per-client request budget over a rolling window.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Error, Result};

/// Allows `max_requests` per client inside any `window`.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    requests: HashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: HashMap::new(),
        }
    }

    /// Count a request from `client` at `now`.
    ///
    /// Rejected requests are not counted. The error carries the time until
    /// the oldest counted request leaves the window.
    pub fn check(&mut self, client: &str, now: Instant) -> Result<()> {
        let window = self.window;
        self.requests.retain(|_, seen| {
            while seen
                .front()
                .is_some_and(|&at| now.duration_since(at) >= window)
            {
                seen.pop_front();
            }
            !seen.is_empty()
        });

        let seen = self.requests.entry(client.to_string()).or_default();

        if seen.len() >= self.max_requests {
            let retry_after = seen
                .front()
                .map_or(window, |&oldest| (oldest + window).duration_since(now));
            return Err(Error::RateLimited { retry_after });
        }

        seen.push_back(now);
        Ok(())
    }

    /// Clients with at least one request inside the window.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_per_client() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check("a", start).is_ok());
        assert!(limiter.check("a", start + Duration::from_secs(10)).is_ok());
        assert!(limiter.check("b", start + Duration::from_secs(10)).is_ok());

        let err = limiter.check("a", start + Duration::from_secs(20));
        assert!(matches!(
            err,
            Err(Error::RateLimited { retry_after }) if retry_after == Duration::from_secs(40)
        ));
    }

    #[test]
    fn test_window_rolls() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check("a", start).is_ok());
        assert!(limiter.check("a", start + Duration::from_secs(59)).is_err());
        assert!(limiter.check("a", start + Duration::from_secs(60)).is_ok());
    }

    #[test]
    fn test_idle_clients_are_forgotten() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(60));
        let start = Instant::now();
        for i in 0..1_000 {
            assert!(limiter.check(&format!("client-{i}"), start).is_ok());
        }
        assert_eq!(limiter.tracked_clients(), 1_000);

        assert!(limiter.check("late", start + Duration::from_secs(3600)).is_ok());
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
