//! Minimum-interval rate limiting for accepted messages

use std::time::{Duration, Instant};

/// Default cooldown between accepted messages
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 3000;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The message may go through; the clock has been advanced
    Allowed,
    /// Too soon after the last accepted message
    Limited {
        /// Milliseconds until the next message would be allowed
        retry_after_ms: u64,
    },
}

/// Tracks the time of the last accepted message.
///
/// A check that succeeds also records the check time, so checking is a
/// commit. Callers must not probe it speculatively.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter that has never accepted a message
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Create a limiter from an interval in milliseconds
    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    /// Configured cooldown
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Check against the current time
    pub fn check(&mut self) -> RateDecision {
        self.check_at(Instant::now())
    }

    /// Check against an explicit instant
    pub fn check_at(&mut self, now: Instant) -> RateDecision {
        if let Some(last) = self.last_accepted {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.interval {
                return RateDecision::Limited {
                    retry_after_ms: ceil_millis(self.interval - elapsed),
                };
            }
        }

        self.last_accepted = Some(now);
        RateDecision::Allowed
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_millis(DEFAULT_MIN_INTERVAL_MS)
    }
}

// Round up so a pending wait never reports 0ms.
fn ceil_millis(d: Duration) -> u64 {
    let nanos = d.as_nanos();
    nanos.div_ceil(1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_check_is_allowed() {
        let mut limiter = RateLimiter::default();
        assert_eq!(limiter.check_at(Instant::now()), RateDecision::Allowed);
    }

    #[test]
    fn test_second_check_within_interval_is_limited() {
        let mut limiter = RateLimiter::default();
        let t0 = Instant::now();
        assert_eq!(limiter.check_at(t0), RateDecision::Allowed);

        let decision = limiter.check_at(t0 + Duration::from_millis(1000));
        assert_eq!(
            decision,
            RateDecision::Limited {
                retry_after_ms: 2000
            }
        );
    }

    #[test]
    fn test_retry_after_is_positive_and_bounded() {
        let t0 = Instant::now();
        for offset_ms in [0u64, 1, 500, 2999] {
            let mut limiter = RateLimiter::default();
            limiter.check_at(t0);
            match limiter.check_at(t0 + Duration::from_millis(offset_ms)) {
                RateDecision::Limited { retry_after_ms } => {
                    assert!(retry_after_ms > 0);
                    assert!(retry_after_ms <= DEFAULT_MIN_INTERVAL_MS);
                    assert_eq!(retry_after_ms, DEFAULT_MIN_INTERVAL_MS - offset_ms);
                }
                RateDecision::Allowed => panic!("expected limit at +{}ms", offset_ms),
            }
        }
    }

    #[test]
    fn test_sub_millisecond_remainder_rounds_up() {
        let mut limiter = RateLimiter::default();
        let t0 = Instant::now();
        limiter.check_at(t0);
        let decision = limiter.check_at(t0 + Duration::from_micros(2_999_500));
        assert_eq!(decision, RateDecision::Limited { retry_after_ms: 1 });
    }

    #[test]
    fn test_rejected_check_does_not_advance_clock() {
        let mut limiter = RateLimiter::default();
        let t0 = Instant::now();
        limiter.check_at(t0);
        limiter.check_at(t0 + Duration::from_millis(2500));

        // Measured from t0, not from the rejected attempt.
        assert_eq!(
            limiter.check_at(t0 + Duration::from_millis(3000)),
            RateDecision::Allowed
        );
    }

    #[test]
    fn test_accepted_check_advances_clock() {
        let mut limiter = RateLimiter::default();
        let t0 = Instant::now();
        limiter.check_at(t0);
        let t1 = t0 + Duration::from_millis(3500);
        assert_eq!(limiter.check_at(t1), RateDecision::Allowed);
        assert!(matches!(
            limiter.check_at(t1 + Duration::from_millis(100)),
            RateDecision::Limited { .. }
        ));
    }

    #[test]
    fn test_zero_interval_never_limits() {
        let mut limiter = RateLimiter::from_millis(0);
        let t0 = Instant::now();
        assert_eq!(limiter.check_at(t0), RateDecision::Allowed);
        assert_eq!(limiter.check_at(t0), RateDecision::Allowed);
    }
}
