//! Message admission pipeline
//!
//! Every user-typed message passes through a fixed sequence of checks
//! before it may be displayed or sent to the backend: rate limit,
//! structural validity, unsafe-content filter, then sanitization. The
//! first failing check decides the outcome and nothing after it runs.

pub mod filter;
pub mod pipeline;
pub mod rate_limit;
pub mod sanitize;
pub mod validation;

pub use filter::{default_unsafe_patterns, ContentFilter, UnsafeCategory, UnsafePattern};
pub use pipeline::{Admission, AdmissionPipeline, Rejection};
pub use rate_limit::{RateDecision, RateLimiter, DEFAULT_MIN_INTERVAL_MS};
pub use sanitize::sanitize;
pub use validation::{message_length, validate_message, DEFAULT_MAX_MESSAGE_LENGTH};
