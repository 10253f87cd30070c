//! A single token bucket with refill-on-observation semantics.
//!
//! The bucket never runs a background clock: every operation looks at
//! `Instant::now()` and decides, on the spot, whether a full window has
//! elapsed since the last observation. This is a fixed-window limiter, not
//! a sliding or leaky one: two bursts that straddle a window boundary can
//! together exceed the nominal rate.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// The capability set shared by a single [`Bucket`] and an aggregate of
/// buckets. Kept as a trait rather than an inheritance hierarchy so the
/// decision pipeline can operate on either without caring which it has.
pub trait Bucketish {
    fn add_tokens(&self);
    fn delete_token(&self);
    fn count_available_tokens(&self) -> i64;
    fn check_tokens_exist(&self) -> bool;
    fn clear_bucket(&self);
}

#[derive(Debug)]
struct Inner {
    available_tokens: i64,
    updated_at: Instant,
}

/// A token bucket bounded by `capacity`, refilled to full once every
/// `duration` has elapsed since the last observed refill.
#[derive(Debug)]
pub struct Bucket {
    capacity: i64,
    duration: Duration,
    inner: Mutex<Inner>,
}

impl Bucket {
    pub fn new(capacity: i64, duration: Duration) -> Self {
        Self {
            capacity,
            duration,
            inner: Mutex::new(Inner {
                available_tokens: capacity,
                updated_at: Instant::now(),
            }),
        }
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Bucketish for Bucket {
    fn add_tokens(&self) {
        let mut inner = self.inner.lock().expect("bucket mutex poisoned");
        let now = Instant::now();
        if now > inner.updated_at + self.duration {
            inner.available_tokens = self.capacity;
            inner.updated_at = now;
        }
    }

    fn delete_token(&self) {
        let mut inner = self.inner.lock().expect("bucket mutex poisoned");
        if inner.available_tokens > 0 {
            inner.available_tokens -= 1;
        }
    }

    fn count_available_tokens(&self) -> i64 {
        let inner = self.inner.lock().expect("bucket mutex poisoned");
        inner.available_tokens
    }

    fn check_tokens_exist(&self) -> bool {
        self.count_available_tokens() > 0
    }

    fn clear_bucket(&self) {
        let mut inner = self.inner.lock().expect("bucket mutex poisoned");
        inner.available_tokens = 0;
    }
}
