//! Rate limiting for externally triggered validation.
//!
//! A token bucket per actor: each actor starts with a full bucket of
//! `capacity` tokens, every request takes one, and tokens refill continuously
//! at `capacity / window`. Fractional tokens are carried between checks so
//! slow refill rates do not lose precision.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::{RATE_LIMIT_REQUESTS, RATE_LIMIT_WINDOW_SECS};

/// Admission check for a caller identity.
pub trait RateLimiter: Send + Sync {
    /// Consumes one request for `actor`; false when the actor is over its limit.
    fn check(&self, actor: &str) -> bool;
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Per-actor token bucket.
pub struct TokenBucketLimiter {
    capacity: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl Default for TokenBucketLimiter {
    fn default() -> Self {
        Self::new(RATE_LIMIT_REQUESTS, Duration::from_secs(RATE_LIMIT_WINDOW_SECS))
    }
}

impl TokenBucketLimiter {
    /// `capacity` requests per `window`, with bursts up to `capacity`.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity,
            window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    fn refill_rate(&self) -> f64 {
        let window = self.window.as_secs_f64();
        if window <= 0.0 {
            return f64::INFINITY;
        }
        f64::from(self.capacity) / window
    }

    /// Whole tokens currently available to `actor`.
    pub fn remaining(&self, actor: &str) -> u32 {
        let Ok(mut buckets) = self.buckets.lock() else {
            return 0;
        };
        match buckets.get_mut(actor) {
            Some(bucket) => {
                self.refill(bucket, Instant::now());
                bucket.tokens as u32
            }
            None => self.capacity,
        }
    }

    fn refill(&self, bucket: &mut Bucket, now: Instant) {
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        let capacity = f64::from(self.capacity);
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate()).min(capacity);
        bucket.last_refill = now;
    }
}

impl RateLimiter for TokenBucketLimiter {
    fn check(&self, actor: &str) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let mut buckets = match self.buckets.lock() {
            Ok(buckets) => buckets,
            Err(e) => {
                warn!("Rate limiter lock poisoned, refusing {actor}: {e}");
                return false;
            }
        };

        let now = Instant::now();
        // A bucket that has refilled completely is indistinguishable from a new one
        let capacity = f64::from(self.capacity);
        let rate = self.refill_rate();
        buckets.retain(|_, bucket| {
            let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
            bucket.tokens + elapsed * rate < capacity
        });

        let bucket = buckets.entry(actor.to_string()).or_insert(Bucket {
            tokens: f64::from(self.capacity),
            last_refill: now,
        });
        self.refill(bucket, now);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            debug!("Rate limit reached for {actor}");
            false
        }
    }
}
