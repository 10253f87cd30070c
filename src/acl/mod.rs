//! CIDR-addressed access control: entity representation, canonicalization,
//! the in-memory store, and the facade in front of it.

pub mod access;
pub mod store;

use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ipnetwork::Ipv4Network;

use crate::error::AclError;

/// An immutable CIDR entity. Identity for lookup purposes is `(mask, ip)`;
/// `id` is metadata only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpEntity {
    pub id: String,
    pub ip: String,
    pub mask: String,
}

impl IpEntity {
    pub fn new(id: String, ip: String, mask: String) -> Self {
        Self { id, ip, mask }
    }

    /// `ip` and `mask` non-empty. The store only requires this.
    pub fn is_valid(&self) -> bool {
        !self.ip.is_empty() && !self.mask.is_empty()
    }

    /// Additionally requires a non-empty `id`. Not enforced by the store,
    /// only by callers that need a fully-formed entity.
    pub fn is_whole_valid(&self) -> bool {
        self.is_valid() && !self.id.is_empty()
    }
}

/// Parses a CIDR literal `A.B.C.D/N`, zeroes the host bits, and returns the
/// canonical `(network_address, dotted_mask)` pair. Two CIDR strings that
/// denote the same network and prefix length canonicalize identically.
pub fn canonicalize(s: &str) -> Result<(String, String), AclError> {
    if s.is_empty() {
        return Err(AclError::EmptyIp);
    }
    let network = Ipv4Network::from_str(s)?;
    let ip: Ipv4Addr = network.network();
    let mask: Ipv4Addr = network.mask();
    Ok((ip.to_string(), mask.to_string()))
}

/// In-process stand-in for a transport's cancellation/deadline signal.
/// Every store and facade operation consults this first and performs no
/// side effects once it has fired.
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Option<Instant>,
    canceled: Arc<AtomicBool>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            deadline: None,
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    /// Returns the error this context has already failed with, if any.
    pub fn check(&self) -> Result<(), AclError> {
        if self.canceled.load(Ordering::SeqCst) {
            return Err(AclError::Canceled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() > deadline {
                return Err(AclError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
