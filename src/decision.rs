//! The decision pipeline: validate -> ACL -> rate limit -> admit/deny.

use serde::{Deserialize, Serialize};

use crate::acl::access::Access;
use crate::acl::RequestContext;
use crate::bucket::Bucketish;
use crate::error::AclError;
use crate::multi_limiter::MultiLimiter;

/// One authentication attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    pub login: String,
    pub password: String,
    pub ip: String,
}

/// `code` mirrors HTTP status semantics so the transport layer can pass it
/// straight through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionResponse {
    pub status: String,
    pub code: u16,
    pub msg: String,
}

impl DecisionResponse {
    fn admit(msg: &str) -> Self {
        Self {
            status: "ok".to_string(),
            code: 200,
            msg: msg.to_string(),
        }
    }

    fn deny(code: u16, msg: &str) -> Self {
        Self {
            status: if code >= 500 { "error" } else { "denied" }.to_string(),
            code,
            msg: msg.to_string(),
        }
    }
}

/// Ties the ACL facade and the rate limiter into the three-stage pipeline
/// described for one authentication attempt.
pub struct Decision {
    access: Access,
    limiter: MultiLimiter,
}

impl Decision {
    pub fn new(access: Access, limiter: MultiLimiter) -> Self {
        Self { access, limiter }
    }

    pub fn evaluate(&self, ctx: &RequestContext, req: &DecisionRequest) -> DecisionResponse {
        if req.login.is_empty() {
            return DecisionResponse::deny(400, "login must not be empty");
        }
        if req.password.is_empty() {
            return DecisionResponse::deny(400, "password must not be empty");
        }
        if req.ip.is_empty() {
            return DecisionResponse::deny(400, "ip must not be empty");
        }

        match self.access.is_in_black_list(ctx, &req.ip) {
            Ok(true) => return DecisionResponse::deny(400, "true"),
            Ok(false) => {}
            Err(e) => return Self::error_response(e),
        }

        match self.access.is_in_white_list(ctx, &req.ip) {
            Ok(true) => return DecisionResponse::admit("true"),
            Ok(false) => {}
            Err(e) => return Self::error_response(e),
        }

        let bucket = self
            .limiter
            .get_bucket(&req.login, &req.password, &req.ip);
        bucket.add_tokens();
        if bucket.check_tokens_exist() {
            bucket.delete_token();
            DecisionResponse::admit("true")
        } else {
            DecisionResponse::deny(400, "false")
        }
    }

    fn error_response(err: AclError) -> DecisionResponse {
        match err {
            AclError::ParseIp(_) => {
                DecisionResponse::deny(400, "Invalid Ip Address. Use IP:Mask")
            }
            AclError::EmptyIp => DecisionResponse::deny(400, "ip must not be empty"),
            AclError::Canceled | AclError::DeadlineExceeded => {
                DecisionResponse::deny(400, "Very long request. Try again")
            }
            other => DecisionResponse::deny(other.status_code(), "internal error"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::acl::store::Store;
    use crate::limiter::Limiter;
    use std::sync::Arc;
    use std::time::Duration;

    fn decision(capacity: i64, duration: Duration) -> Decision {
        let access = Access::new(Arc::new(Store::new()));
        let limiter = MultiLimiter::new(
            Limiter::new(capacity, duration),
            Limiter::new(capacity, duration),
            Limiter::new(capacity, duration),
        );
        Decision::new(access, limiter)
    }

    fn req(login: &str, password: &str, ip: &str) -> DecisionRequest {
        DecisionRequest {
            login: login.to_string(),
            password: password.to_string(),
            ip: ip.to_string(),
        }
    }

    #[test]
    fn empty_login_is_denied_before_touching_acl_or_limiter() {
        let d = decision(2, Duration::from_secs(1));
        let ctx = RequestContext::new();
        let resp = d.evaluate(&ctx, &req("", "p", "127.0.0.1/32"));
        assert_eq!(resp.code, 400);
        assert!(resp.msg.contains("login"));
    }

    #[test]
    fn blacklisted_ip_is_denied_before_rate_limiting() {
        let d = decision(2, Duration::from_secs(1));
        let ctx = RequestContext::new();
        d.access
            .add_to_black_list(&ctx, "192.1.1.0/25")
            .unwrap();
        let resp = d.evaluate(&ctx, &req("u", "p", "192.1.1.0/25"));
        assert_eq!(resp.code, 400);
        assert_eq!(resp.msg, "true");
    }

    #[test]
    fn whitelisted_ip_admits_even_with_an_empty_bucket() {
        let d = decision(2, Duration::from_secs(1));
        let ctx = RequestContext::new();
        d.access
            .add_to_white_list(&ctx, "192.1.1.0/25")
            .unwrap();
        // Drain the bucket so only the whitelist bypass can admit.
        for _ in 0..10 {
            let _ = d.evaluate(&ctx, &req("u", "p", "192.1.1.0/25"));
        }
        let resp = d.evaluate(&ctx, &req("u", "p", "192.1.1.0/25"));
        assert_eq!(resp.code, 200);
    }

    #[test]
    fn rate_limiter_admits_up_to_capacity_then_denies_then_refills() {
        let d = decision(2, Duration::from_millis(5));
        let ctx = RequestContext::new();
        let triple = ("u", "p", "127.0.0.1/32");
        assert_eq!(d.evaluate(&ctx, &req(triple.0, triple.1, triple.2)).code, 200);
        assert_eq!(d.evaluate(&ctx, &req(triple.0, triple.1, triple.2)).code, 200);
        assert_eq!(d.evaluate(&ctx, &req(triple.0, triple.1, triple.2)).code, 400);

        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(d.evaluate(&ctx, &req(triple.0, triple.1, triple.2)).code, 200);
    }

    #[test]
    fn malformed_ip_is_a_client_error() {
        let d = decision(2, Duration::from_secs(1));
        let ctx = RequestContext::new();
        let resp = d.evaluate(&ctx, &req("u", "p", "not-a-cidr"));
        assert_eq!(resp.code, 400);
    }
}
