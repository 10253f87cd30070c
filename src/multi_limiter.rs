//! Composes three dimension [`Limiter`]s (login, password, IP) into a single
//! aggregate admission predicate.

use std::sync::Arc;

use crate::bucket::{Bucket, Bucketish};
use crate::limiter::Limiter;

/// Three independent buckets resolved for one `(login, password, ip)`
/// triple. Has no state of its own; every operation fans out to its three
/// members in order and is not atomic across them.
pub struct AggregateBucket {
    login: Arc<Bucket>,
    password: Arc<Bucket>,
    ip: Arc<Bucket>,
}

impl Bucketish for AggregateBucket {
    fn add_tokens(&self) {
        self.login.add_tokens();
        self.password.add_tokens();
        self.ip.add_tokens();
    }

    fn delete_token(&self) {
        self.login.delete_token();
        self.password.delete_token();
        self.ip.delete_token();
    }

    fn count_available_tokens(&self) -> i64 {
        let sum = self.login.count_available_tokens()
            + self.password.count_available_tokens()
            + self.ip.count_available_tokens();
        sum.max(0)
    }

    fn check_tokens_exist(&self) -> bool {
        self.login.check_tokens_exist()
            && self.password.check_tokens_exist()
            && self.ip.check_tokens_exist()
    }

    fn clear_bucket(&self) {
        self.login.clear_bucket();
        self.password.clear_bucket();
        self.ip.clear_bucket();
    }
}

/// Three independent [`Limiter`]s, one per dimension of the authentication
/// triple.
pub struct MultiLimiter {
    login: Limiter,
    password: Limiter,
    ip: Limiter,
}

impl MultiLimiter {
    pub fn new(login: Limiter, password: Limiter, ip: Limiter) -> Self {
        Self { login, password, ip }
    }

    pub fn get_bucket(&self, login: &str, password: &str, ip: &str) -> AggregateBucket {
        AggregateBucket {
            login: self.login.get_bucket(login),
            password: self.password.get_bucket(password),
            ip: self.ip.get_bucket(ip),
        }
    }

    pub fn get_login_bucket(&self, login: &str) -> Arc<Bucket> {
        self.login.get_bucket(login)
    }

    pub fn get_password_bucket(&self, password: &str) -> Arc<Bucket> {
        self.password.get_bucket(password)
    }

    pub fn get_ip_bucket(&self, ip: &str) -> Arc<Bucket> {
        self.ip.get_bucket(ip)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    fn triple_limiter(capacity: i64, duration: Duration) -> MultiLimiter {
        MultiLimiter::new(
            Limiter::new(capacity, duration),
            Limiter::new(capacity, duration),
            Limiter::new(capacity, duration),
        )
    }

    #[test]
    fn admission_requires_tokens_on_all_three_dimensions() {
        let ml = triple_limiter(2, Duration::from_secs(1));
        let bucket = ml.get_bucket("user", "pw", "127.0.0.1");
        assert!(bucket.check_tokens_exist());

        // Starve just the login dimension.
        let login_only = ml.get_login_bucket("user");
        login_only.clear_bucket();
        assert!(!bucket.check_tokens_exist());
    }

    #[test]
    fn count_available_tokens_sums_the_three_dimensions() {
        let ml = triple_limiter(4, Duration::from_secs(1));
        let bucket = ml.get_bucket("user", "0", "127.0.0.1");
        assert_eq!(bucket.count_available_tokens(), 12);
        bucket.delete_token();
        assert_eq!(bucket.count_available_tokens(), 9);
    }

    #[test]
    fn three_requests_then_deny_matches_capacity() {
        let ml = triple_limiter(2, Duration::from_secs(1));
        let admit = |ml: &MultiLimiter| {
            let b = ml.get_bucket("u", "p", "127.0.0.1");
            b.add_tokens();
            if b.check_tokens_exist() {
                b.delete_token();
                true
            } else {
                false
            }
        };
        assert!(admit(&ml));
        assert!(admit(&ml));
        assert!(!admit(&ml));
    }
}
