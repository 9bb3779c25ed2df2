use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Admission check for result creation, keyed per client.
pub trait RateLimiter: Send + Sync {
    fn check(&self, client_key: &str) -> RateDecision;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Admits at most `limit` requests per client within any trailing `window`.
#[derive(Debug, Clone)]
pub struct SlidingWindowLimiter {
    limit: u32,
    window: Duration,
    hits: Arc<Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>>,
}

impl SlidingWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            hits: Arc::default(),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of clients currently holding hits in the window.
    pub fn tracked_clients(&self) -> usize {
        self.hits.lock().expect("rate limiter mutex poisoned").len()
    }

    pub fn check_at(&self, client_key: &str, now: DateTime<Utc>) -> RateDecision {
        let cutoff = chrono::Duration::from_std(self.window)
            .ok()
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let mut guard = self.hits.lock().expect("rate limiter mutex poisoned");
        // clients with no hit inside the window carry no state
        guard.retain(|_, hits| hits.back().is_some_and(|hit| *hit > cutoff));
        let hits = guard.entry(client_key.to_string()).or_default();
        while hits.front().is_some_and(|hit| *hit <= cutoff) {
            hits.pop_front();
        }

        if hits.len() >= self.limit as usize {
            let retry_after = hits
                .front()
                .and_then(|oldest| (*oldest - cutoff).to_std().ok())
                .unwrap_or(self.window);
            return RateDecision::Limited { retry_after };
        }

        hits.push_back(now);
        RateDecision::Allowed {
            remaining: self.limit.saturating_sub(hits.len() as u32),
        }
    }
}

impl RateLimiter for SlidingWindowLimiter {
    fn check(&self, client_key: &str) -> RateDecision {
        self.check_at(client_key, Utc::now())
    }
}

/// Limiter that admits everything; for offline tooling and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlimited;

impl RateLimiter for Unlimited {
    fn check(&self, _client_key: &str) -> RateDecision {
        RateDecision::Allowed {
            remaining: u32::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn limits_after_quota_within_window() {
        let limiter = SlidingWindowLimiter::new(2, Duration::from_secs(3600));
        let now = start();

        assert_eq!(
            limiter.check_at("create-test:1.2.3.4", now),
            RateDecision::Allowed { remaining: 1 }
        );
        assert_eq!(
            limiter.check_at("create-test:1.2.3.4", now + chrono::Duration::minutes(10)),
            RateDecision::Allowed { remaining: 0 }
        );

        let decision =
            limiter.check_at("create-test:1.2.3.4", now + chrono::Duration::minutes(20));
        assert_eq!(
            decision,
            RateDecision::Limited {
                retry_after: Duration::from_secs(40 * 60)
            }
        );
    }

    #[test]
    fn window_slides_and_clients_are_independent() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(3600));
        let now = start();

        assert!(limiter.check_at("a", now).is_allowed());
        assert!(!limiter.check_at("a", now + chrono::Duration::minutes(59)).is_allowed());
        assert!(limiter.check_at("b", now).is_allowed());
        assert!(limiter.check_at("a", now + chrono::Duration::minutes(60)).is_allowed());
    }

    #[test]
    fn idle_clients_are_evicted() {
        let limiter = SlidingWindowLimiter::new(5, Duration::from_secs(60));
        let now = start();

        for index in 0..1_000 {
            limiter.check_at(&format!("create-test:10.0.{}.{}", index / 256, index % 256), now);
        }
        assert_eq!(limiter.tracked_clients(), 1_000);

        assert!(limiter
            .check_at("create-test:192.0.2.1", now + chrono::Duration::days(1))
            .is_allowed());
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
