//! Ordered admission checks for user-typed messages

use std::fmt;
use std::time::Instant;

use tracing::{debug, info};

use super::filter::ContentFilter;
use super::rate_limit::{RateDecision, RateLimiter};
use super::sanitize::sanitize;
use super::validation::{validate_message, DEFAULT_MAX_MESSAGE_LENGTH};
use crate::config::AdmissionConfig;
use crate::utils::truncate;

/// Why a message was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Sent too soon after the previous accepted message
    RateLimited { retry_after_ms: u64 },
    /// Empty or whitespace-only
    Empty,
    /// Longer than the configured maximum
    TooLong,
    /// Matched the unsafe-content filter
    Unsafe,
}

impl Rejection {
    /// Stable machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::RateLimited { .. } => "rate_limited",
            Rejection::Empty => "empty",
            Rejection::TooLong => "too_long",
            Rejection::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::RateLimited { retry_after_ms } => {
                write!(f, "rate_limited (retry after {}ms)", retry_after_ms)
            }
            other => f.write_str(other.reason()),
        }
    }
}

/// Result of running a message through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Passed every check; carries the sanitized text
    Accepted(String),
    Rejected(Rejection),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted(_))
    }
}

/// Rate limit, validity, unsafe filter and sanitization, in that order
#[derive(Debug, Clone)]
pub struct AdmissionPipeline {
    limiter: RateLimiter,
    max_message_length: usize,
    filter: ContentFilter,
}

impl AdmissionPipeline {
    /// Create a pipeline from its parts
    pub fn new(limiter: RateLimiter, max_message_length: usize, filter: ContentFilter) -> Self {
        Self {
            limiter,
            max_message_length,
            filter,
        }
    }

    /// Build a pipeline from configuration, compiling the pattern list
    pub fn from_config(config: &AdmissionConfig) -> crate::Result<Self> {
        Ok(Self::new(
            RateLimiter::from_millis(config.min_interval_ms),
            config.max_message_length,
            ContentFilter::new(&config.unsafe_patterns)?,
        ))
    }

    /// Admit a message at the current time
    pub fn admit(&mut self, raw: &str) -> Admission {
        self.admit_at(raw, Instant::now())
    }

    /// Admit a message at an explicit instant
    pub fn admit_at(&mut self, raw: &str, now: Instant) -> Admission {
        if let RateDecision::Limited { retry_after_ms } = self.limiter.check_at(now) {
            debug!("Message rate limited, retry after {}ms", retry_after_ms);
            return Admission::Rejected(Rejection::RateLimited { retry_after_ms });
        }

        if let Err(rejection) = validate_message(raw, self.max_message_length) {
            debug!("Message failed validation: {}", rejection);
            return Admission::Rejected(rejection);
        }

        if self.filter.is_unsafe(raw) {
            info!("Message blocked by content filter: {}", truncate(raw, 40));
            return Admission::Rejected(Rejection::Unsafe);
        }

        Admission::Accepted(sanitize(raw))
    }
}

impl Default for AdmissionPipeline {
    fn default() -> Self {
        Self::new(
            RateLimiter::default(),
            DEFAULT_MAX_MESSAGE_LENGTH,
            ContentFilter::default(),
        )
    }
}
