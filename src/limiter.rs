//! A keyed collection of [`Bucket`]s on a single dimension.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::bucket::Bucket;

/// Parameterized by one `(capacity, duration)` pair, shared by every bucket
/// it creates. Buckets are never evicted: there is no TTL in the core.
#[derive(Debug)]
pub struct Limiter {
    capacity: i64,
    duration: Duration,
    buckets: Mutex<HashMap<String, Arc<Bucket>>>,
}

impl Limiter {
    pub fn new(capacity: i64, duration: Duration) -> Self {
        Self {
            capacity,
            duration,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the bucket for `key`, creating it on first access. The map
    /// mutex is held only to find-or-insert; it is released before any
    /// bucket operation runs, so it is never held alongside a bucket's own
    /// mutex.
    pub fn get_bucket(&self, key: &str) -> Arc<Bucket> {
        let mut buckets = self.buckets.lock().expect("limiter mutex poisoned");
        if let Some(bucket) = buckets.get(key) {
            return Arc::clone(bucket);
        }
        let bucket = Arc::new(Bucket::new(self.capacity, self.duration));
        buckets.insert(key.to_string(), Arc::clone(&bucket));
        bucket
    }
}
