//! Provider call orchestration.
//!
//! Currently this is the per-provider rate limiter shared by all requests
//! a provider sends.

mod rate_limiter;

pub use rate_limiter::{RateLimitConfig, RateLimiter};
