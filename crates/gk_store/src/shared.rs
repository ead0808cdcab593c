//! Host-side handle over the cached stores.
//!
//! Resolvers read one consistent snapshot per call. Writers (key grants,
//! rotations, metadata updates) edit a copy under the write lock and the copy
//! replaces the live snapshot only when the whole update succeeds, so a
//! half-applied rotation is never observed.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use gk_proto::Session;

use crate::groups::GroupStore;
use crate::keys::KeyStore;

#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub keys: KeyStore,
    pub groups: GroupStore,
    pub session: Option<Session>,
}

/// Cheap to clone; every clone sees the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedStores {
    inner: Arc<RwLock<StoreSnapshot>>,
}

impl SharedStores {
    pub fn new(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Hold the guard for the duration of one resolver call.
    pub fn read(&self) -> RwLockReadGuard<'_, StoreSnapshot> {
        self.inner.read()
    }

    /// Apply `f` to a copy of the snapshot. On `Err` the live snapshot is
    /// left untouched.
    pub fn update<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut StoreSnapshot) -> Result<R, E>,
    {
        let mut guard = self.inner.write();
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        *guard = draft;
        Ok(out)
    }
}
