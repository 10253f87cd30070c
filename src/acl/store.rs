//! The concurrent in-memory ACL store: two independent `mask -> set<ip>`
//! indexes, one mutex guarding both.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde::Serialize;

use super::{IpEntity, RequestContext};
use crate::error::AclError;

/// Which of the two lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum List {
    White,
    Black,
}

#[derive(Debug, Default)]
struct Indexes {
    whitelist: HashMap<String, HashSet<String>>,
    blacklist: HashMap<String, HashSet<String>>,
}

/// A read-only, point-in-time copy of both indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub whitelist: HashMap<String, Vec<String>>,
    pub blacklist: HashMap<String, Vec<String>>,
}

/// `inner` is `None` until the store is constructed via [`Store::new`],
/// mirroring a zero-value store whose maps were never allocated.
#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<Option<Indexes>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Some(Indexes::default())),
        }
    }

    pub fn add(
        &self,
        ctx: &RequestContext,
        list: List,
        entity: &IpEntity,
    ) -> Result<(), AclError> {
        ctx.check()?;
        if !entity.is_valid() {
            return Err(AclError::InvalidEntity);
        }
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        let indexes = guard.as_mut().ok_or(AclError::InvalidInitialization)?;
        let map = Self::map_mut(indexes, list);
        map.entry(entity.mask.clone())
            .or_default()
            .insert(entity.ip.clone());
        Ok(())
    }

    pub fn delete(
        &self,
        ctx: &RequestContext,
        list: List,
        entity: &IpEntity,
    ) -> Result<(), AclError> {
        ctx.check()?;
        if !entity.is_valid() {
            return Err(AclError::InvalidEntity);
        }
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        let indexes = guard.as_mut().ok_or(AclError::InvalidInitialization)?;
        let map = Self::map_mut(indexes, list);
        let Some(ips) = map.get_mut(&entity.mask) else {
            return Err(AclError::NotFound);
        };
        if !ips.remove(&entity.ip) {
            return Err(AclError::NotFound);
        }
        if ips.is_empty() {
            map.remove(&entity.mask);
        }
        Ok(())
    }

    pub fn contains(
        &self,
        ctx: &RequestContext,
        list: List,
        entity: &IpEntity,
    ) -> Result<bool, AclError> {
        ctx.check()?;
        if !entity.is_valid() {
            return Err(AclError::InvalidEntity);
        }
        let guard = self.inner.lock().expect("store mutex poisoned");
        let indexes = guard.as_ref().ok_or(AclError::InvalidInitialization)?;
        let map = Self::map_ref(indexes, list);
        match map.get(&entity.mask) {
            Some(ips) if ips.contains(&entity.ip) => Ok(true),
            _ => Err(AclError::NotFound),
        }
    }

    pub fn snapshot(&self, ctx: &RequestContext) -> Result<Snapshot, AclError> {
        ctx.check()?;
        let guard = self.inner.lock().expect("store mutex poisoned");
        let indexes = guard.as_ref().ok_or(AclError::InvalidInitialization)?;
        let render = |m: &HashMap<String, HashSet<String>>| {
            m.iter()
                .map(|(mask, ips)| {
                    let mut ips: Vec<String> = ips.iter().cloned().collect();
                    ips.sort();
                    (mask.clone(), ips)
                })
                .collect()
        };
        Ok(Snapshot {
            whitelist: render(&indexes.whitelist),
            blacklist: render(&indexes.blacklist),
        })
    }

    fn map_mut(indexes: &mut Indexes, list: List) -> &mut HashMap<String, HashSet<String>> {
        match list {
            List::White => &mut indexes.whitelist,
            List::Black => &mut indexes.blacklist,
        }
    }

    fn map_ref(indexes: &Indexes, list: List) -> &HashMap<String, HashSet<String>> {
        match list {
            List::White => &indexes.whitelist,
            List::Black => &indexes.blacklist,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entity(ip: &str, mask: &str) -> IpEntity {
        IpEntity::new(String::new(), ip.to_string(), mask.to_string())
    }

    #[test]
    fn add_then_contains_is_idempotent_over_duplicate_adds() {
        let store = Store::new();
        let ctx = RequestContext::new();
        let e = entity("192.1.1.0", "255.255.255.128");
        store.add(&ctx, List::White, &e).unwrap();
        store.add(&ctx, List::White, &e).unwrap();
        assert!(store.contains(&ctx, List::White, &e).unwrap());
    }

    #[test]
    fn contains_returns_not_found_when_absent() {
        let store = Store::new();
        let ctx = RequestContext::new();
        let e = entity("192.1.1.0", "255.255.255.128");
        let err = store.contains(&ctx, List::White, &e).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_of_unknown_mask_is_not_found() {
        let store = Store::new();
        let ctx = RequestContext::new();
        store
            .add(&ctx, List::White, &entity("192.1.1.0", "255.255.255.128"))
            .unwrap();
        let err = store
            .delete(&ctx, List::White, &entity("192.1.2.0", "255.255.255.0"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_empties_mask_key() {
        let store = Store::new();
        let ctx = RequestContext::new();
        let e = entity("192.1.1.0", "255.255.255.128");
        store.add(&ctx, List::White, &e).unwrap();
        store.delete(&ctx, List::White, &e).unwrap();
        let snap = store.snapshot(&ctx).unwrap();
        assert!(!snap.whitelist.contains_key("255.255.255.128"));
    }

    #[test]
    fn whitelist_and_blacklist_are_independent() {
        let store = Store::new();
        let ctx = RequestContext::new();
        let e = entity("192.1.1.0", "255.255.255.128");
        store.add(&ctx, List::White, &e).unwrap();
        store.add(&ctx, List::Black, &e).unwrap();
        assert!(store.contains(&ctx, List::White, &e).unwrap());
        assert!(store.contains(&ctx, List::Black, &e).unwrap());
        store.delete(&ctx, List::White, &e).unwrap();
        assert!(store.contains(&ctx, List::Black, &e).unwrap());
    }

    #[test]
    fn uninitialized_store_fails_closed() {
        let store = Store::default();
        let ctx = RequestContext::new();
        let e = entity("192.1.1.0", "255.255.255.128");
        let err = store.add(&ctx, List::White, &e).unwrap_err();
        assert!(matches!(err, AclError::InvalidInitialization));
    }

    #[test]
    fn canceled_context_short_circuits_before_mutation() {
        let store = Store::new();
        let ctx = RequestContext::new();
        ctx.cancel();
        let e = entity("192.1.1.0", "255.255.255.128");
        let err = store.add(&ctx, List::White, &e).unwrap_err();
        assert!(matches!(err, AclError::Canceled));
    }

    #[test]
    fn concurrent_adders_and_readers_over_disjoint_keys_never_fail() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(Store::new());
        let adders: Vec<_> = (0..100)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let ctx = RequestContext::new();
                    let e = entity(&format!("10.0.0.{i}"), "255.255.255.255");
                    store.add(&ctx, List::White, &e).unwrap();
                })
            })
            .collect();
        for h in adders {
            h.join().unwrap();
        }

        let readers: Vec<_> = (0..100)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let ctx = RequestContext::new();
                    let e = entity(&format!("10.0.0.{i}"), "255.255.255.255");
                    store.contains(&ctx, List::White, &e).unwrap()
                })
            })
            .collect();
        for h in readers {
            assert!(h.join().unwrap());
        }
    }

    #[test]
    fn concurrent_adders_over_the_same_key_settle_on_one_consistent_state() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(Store::new());
        let e = entity("192.1.1.0", "255.255.255.128");
        let handles: Vec<_> = (0..100)
            .map(|_| {
                let store = Arc::clone(&store);
                let e = e.clone();
                thread::spawn(move || {
                    let ctx = RequestContext::new();
                    store.add(&ctx, List::White, &e).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let ctx = RequestContext::new();
        assert!(store.contains(&ctx, List::White, &e).unwrap());
        let snap = store.snapshot(&ctx).unwrap();
        assert_eq!(snap.whitelist.get("255.255.255.128").unwrap().len(), 1);
    }
}
