//! The facade an HTTP handler or the decision pipeline talks to: validates
//! and canonicalizes a raw IP string, then delegates to a [`Store`].

use std::sync::Arc;

use uuid::Uuid;

use super::store::{List, Snapshot, Store};
use super::{canonicalize, IpEntity, RequestContext};
use crate::error::AclError;

/// Wraps a [`Store`]. Holding the store behind an `Option` lets a facade be
/// constructed before its backend is wired up, surfacing `InvalidStorage`
/// rather than panicking if that never happens.
#[derive(Clone)]
pub struct Access {
    store: Option<Arc<Store>>,
}

impl Access {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store: Some(store) }
    }

    fn store(&self) -> Result<&Arc<Store>, AclError> {
        self.store.as_ref().ok_or(AclError::InvalidStorage)
    }

    fn add(&self, ctx: &RequestContext, list: List, ip: &str) -> Result<(), AclError> {
        ctx.check()?;
        let store = self.store()?;
        let (ip, mask) = canonicalize(ip)?;
        let entity = IpEntity::new(Uuid::new_v4().to_string(), ip, mask);
        if !entity.is_whole_valid() {
            return Err(AclError::InvalidEntity);
        }
        store.add(ctx, list, &entity)
    }

    fn delete(&self, ctx: &RequestContext, list: List, ip: &str) -> Result<(), AclError> {
        ctx.check()?;
        let store = self.store()?;
        let (ip, mask) = canonicalize(ip)?;
        let entity = IpEntity::new(String::new(), ip, mask);
        store.delete(ctx, list, &entity)
    }

    fn is_in(&self, ctx: &RequestContext, list: List, ip: &str) -> Result<bool, AclError> {
        ctx.check()?;
        let store = self.store()?;
        let (ip, mask) = canonicalize(ip)?;
        let entity = IpEntity::new(String::new(), ip, mask);
        match store.contains(ctx, list, &entity) {
            Ok(found) => Ok(found),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn add_to_white_list(&self, ctx: &RequestContext, ip: &str) -> Result<(), AclError> {
        self.add(ctx, List::White, ip)
    }

    pub fn add_to_black_list(&self, ctx: &RequestContext, ip: &str) -> Result<(), AclError> {
        self.add(ctx, List::Black, ip)
    }

    pub fn delete_from_white_list(&self, ctx: &RequestContext, ip: &str) -> Result<(), AclError> {
        self.delete(ctx, List::White, ip)
    }

    pub fn delete_from_black_list(&self, ctx: &RequestContext, ip: &str) -> Result<(), AclError> {
        self.delete(ctx, List::Black, ip)
    }

    /// `NotFound` is folded into `Ok(false)`: both the decision pipeline and
    /// administrative callers treat "not present" as a plain negative.
    pub fn is_in_white_list(&self, ctx: &RequestContext, ip: &str) -> Result<bool, AclError> {
        self.is_in(ctx, List::White, ip)
    }

    pub fn is_in_black_list(&self, ctx: &RequestContext, ip: &str) -> Result<bool, AclError> {
        self.is_in(ctx, List::Black, ip)
    }

    pub fn snapshot(&self, ctx: &RequestContext) -> Result<Snapshot, AclError> {
        ctx.check()?;
        self.store()?.snapshot(ctx)
    }
}
