//! Token bucket rate limiter for market data providers.
//!
//! Each provider gets its own bucket, sized from the provider's
//! [`RateLimit`]. Requests wait asynchronously for a token.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::models::ProviderId;
use crate::provider::RateLimit;

/// Token bucket for a single provider.
#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    /// Tokens per second.
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn with_config(config: &RateLimitConfig) -> Self {
        Self {
            tokens: config.burst_capacity,
            last_update: Instant::now(),
            rate: f64::from(config.requests_per_minute) / 60.0,
            capacity: config.burst_capacity,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 || self.rate <= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.rate)
        }
    }
}

/// Bucket sizing for one provider.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub burst_capacity: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimit::default().into()
    }
}

impl From<RateLimit> for RateLimitConfig {
    fn from(limit: RateLimit) -> Self {
        Self {
            requests_per_minute: limit.requests_per_minute.max(1),
            burst_capacity: f64::from(limit.burst.max(1)),
        }
    }
}

/// Thread-safe per-provider rate limiter.
///
/// Buckets are created on first use from the provider's configuration,
/// or from [`RateLimitConfig::default`] when none was registered.
#[derive(Default)]
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    configs: Mutex<HashMap<String, RateLimitConfig>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the buckets mutex, recovering from poison.
    ///
    /// A poisoned bucket map only means slightly wrong throttling.
    fn lock_buckets(&self) -> MutexGuard<'_, HashMap<String, TokenBucket>> {
        self.buckets.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter buckets mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_configs(&self) -> MutexGuard<'_, HashMap<String, RateLimitConfig>> {
        self.configs.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter configs mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Register limits for a provider, resetting any existing bucket.
    pub fn configure(&self, provider: &ProviderId, config: RateLimitConfig) {
        self.lock_configs().insert(provider.to_string(), config);
        self.lock_buckets().remove(provider.as_ref());
    }

    /// Wait until a token is available for the provider, then take it.
    pub async fn acquire(&self, provider: &ProviderId) {
        loop {
            let wait_time = {
                let mut buckets = self.lock_buckets();
                let bucket = buckets
                    .entry(provider.to_string())
                    .or_insert_with(|| self.create_bucket(provider));

                if bucket.try_acquire() {
                    debug!("Rate limiter: acquired token for '{}'", provider);
                    return;
                }

                bucket.time_until_available()
            };

            debug!(
                "Rate limiter: waiting {:?} for provider '{}'",
                wait_time, provider
            );
            tokio::time::sleep(wait_time).await;
        }
    }

    /// Take a token without waiting. Returns false when throttled.
    pub fn try_acquire(&self, provider: &ProviderId) -> bool {
        let mut buckets = self.lock_buckets();
        buckets
            .entry(provider.to_string())
            .or_insert_with(|| self.create_bucket(provider))
            .try_acquire()
    }

    fn create_bucket(&self, provider: &ProviderId) -> TokenBucket {
        let configs = self.lock_configs();
        match configs.get(provider.as_ref()) {
            Some(config) => TokenBucket::with_config(config),
            None => TokenBucket::with_config(&RateLimitConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_token_bucket_refill() {
        let mut bucket = TokenBucket::with_config(&RateLimitConfig {
            requests_per_minute: 60,
            burst_capacity: 1.0,
        });

        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());

        bucket.last_update = Instant::now() - Duration::from_secs(2);
        assert!(bucket.try_acquire());
    }

    #[test]
    fn test_config_from_provider_limit() {
        let config: RateLimitConfig = RateLimit {
            requests_per_minute: 5,
            burst: 0,
        }
        .into();

        assert_eq!(config.requests_per_minute, 5);
        assert_eq!(config.burst_capacity, 1.0);
    }

    #[test]
    fn test_custom_config_caps_burst() {
        let limiter = RateLimiter::new();
        let provider: ProviderId = Cow::Borrowed("ALPHA_VANTAGE");
        limiter.configure(
            &provider,
            RateLimit {
                requests_per_minute: 5,
                burst: 5,
            }
            .into(),
        );

        for _ in 0..5 {
            assert!(limiter.try_acquire(&provider));
        }
        assert!(!limiter.try_acquire(&provider));
    }

    #[test]
    fn test_per_provider_isolation() {
        let limiter = RateLimiter::new();
        let provider_a: ProviderId = Cow::Borrowed("PROVIDER_A");
        let provider_b: ProviderId = Cow::Borrowed("PROVIDER_B");
        limiter.configure(
            &provider_a,
            RateLimitConfig {
                requests_per_minute: 1,
                burst_capacity: 1.0,
            },
        );

        assert!(limiter.try_acquire(&provider_a));
        assert!(!limiter.try_acquire(&provider_a));
        assert!(limiter.try_acquire(&provider_b));
    }

    #[tokio::test]
    async fn test_async_acquire_waits_for_refill() {
        let limiter = RateLimiter::new();
        let provider: ProviderId = Cow::Borrowed("ASYNC_PROVIDER");
        limiter.configure(
            &provider,
            RateLimitConfig {
                requests_per_minute: 6000,
                burst_capacity: 2.0,
            },
        );

        limiter.acquire(&provider).await;
        limiter.acquire(&provider).await;

        let start = Instant::now();
        limiter.acquire(&provider).await;
        assert!(start.elapsed().as_millis() >= 5);
    }
}
