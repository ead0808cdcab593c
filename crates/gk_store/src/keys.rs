//! Shared and admin key tables.
//!
//! Several shared keys may exist per group (one per rotation); the current
//! one is the record with the greatest `created_at`. Older records are kept
//! so envelopes encrypted before a rotation still resolve.
//!
//! Private halves never leave this module except as a `PrivateKey`, which
//! zeroizes itself on drop.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use gk_proto::address::validate_pubkey;
use gk_proto::{GroupAddress, Timestamp};

use crate::error::StoreError;

// ── Secret newtype ────────────────────────────────────────────────────────────

/// Hex-encoded private key resolved for decryption. Cleared on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

// ── Key record ────────────────────────────────────────────────────────────────

/// A shared or admin key record for one group.
#[derive(Clone, Serialize, Deserialize, ZeroizeOnDrop)]
pub struct GroupKey {
    /// Group address this key belongs to.
    #[zeroize(skip)]
    pub group: String,
    #[zeroize(skip)]
    pub pubkey: String,
    privkey: String,
    #[zeroize(skip)]
    pub created_at: Timestamp,
}

impl GroupKey {
    pub fn new(
        group: impl Into<String>,
        pubkey: impl Into<String>,
        privkey: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            group: group.into(),
            pubkey: pubkey.into(),
            privkey: privkey.into(),
            created_at,
        }
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey(self.privkey.clone())
    }

    fn validate(&self) -> Result<(), StoreError> {
        GroupAddress::parse(&self.group)?;
        validate_pubkey(&self.pubkey)?;
        let secret = hex::decode(&self.privkey).map_err(|err| StoreError::InvalidKey {
            pubkey: self.pubkey.clone(),
            reason: format!("private key is not hex: {err}"),
        })?;
        let secret = Zeroizing::new(secret);
        if secret.len() != 32 {
            return Err(StoreError::InvalidKey {
                pubkey: self.pubkey.clone(),
                reason: format!("private key must be 32 bytes, got {}", secret.len()),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupKey")
            .field("group", &self.group)
            .field("pubkey", &self.pubkey)
            .field("privkey", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Key records indexed by pubkey, with a secondary index by group address.
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    by_pubkey: HashMap<String, GroupKey>,
    /// Group address → member pubkeys, in insertion order.
    by_group: HashMap<String, Vec<String>>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same pubkey.
    /// Returns the replaced record.
    pub fn insert(&mut self, key: GroupKey) -> Result<Option<GroupKey>, StoreError> {
        key.validate()?;

        let replaced = self.by_pubkey.remove(&key.pubkey);
        if let Some(old) = &replaced {
            debug!(pubkey = %old.pubkey, group = %old.group, "replacing key record");
            if old.group != key.group {
                self.unindex(&old.group, &old.pubkey);
            }
        }

        let members = self.by_group.entry(key.group.clone()).or_default();
        if !members.contains(&key.pubkey) {
            members.push(key.pubkey.clone());
        }
        self.by_pubkey.insert(key.pubkey.clone(), key);
        Ok(replaced)
    }

    pub fn remove(&mut self, pubkey: &str) -> Option<GroupKey> {
        let removed = self.by_pubkey.remove(pubkey)?;
        self.unindex(&removed.group, pubkey);
        Some(removed)
    }

    pub fn get(&self, pubkey: &str) -> Option<&GroupKey> {
        self.by_pubkey.get(pubkey)
    }

    /// Every record for one group, in insertion order.
    pub fn for_group<'a>(&'a self, address: &str) -> impl Iterator<Item = &'a GroupKey> + 'a {
        self.by_group
            .get(address)
            .into_iter()
            .flatten()
            .filter_map(|pubkey| self.by_pubkey.get(pubkey))
    }

    /// The record with the greatest `created_at`; later insertion wins ties.
    pub fn latest_for_group(&self, address: &str) -> Option<&GroupKey> {
        self.for_group(address).max_by_key(|key| key.created_at)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupKey> {
        self.by_pubkey.values()
    }

    pub fn len(&self) -> usize {
        self.by_pubkey.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pubkey.is_empty()
    }

    fn unindex(&mut self, group: &str, pubkey: &str) {
        if let Some(members) = self.by_group.get_mut(group) {
            members.retain(|p| p != pubkey);
            if members.is_empty() {
                self.by_group.remove(group);
            }
        }
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Shared (member) keys and admin keys held on this device.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    shared: KeyTable,
    admin: KeyTable,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(
        shared: impl IntoIterator<Item = GroupKey>,
        admin: impl IntoIterator<Item = GroupKey>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for key in shared {
            store.insert_shared(key)?;
        }
        for key in admin {
            store.insert_admin(key)?;
        }
        Ok(store)
    }

    pub fn insert_shared(&mut self, key: GroupKey) -> Result<Option<GroupKey>, StoreError> {
        self.shared.insert(key)
    }

    pub fn insert_admin(&mut self, key: GroupKey) -> Result<Option<GroupKey>, StoreError> {
        self.admin.insert(key)
    }

    pub fn shared(&self) -> &KeyTable {
        &self.shared
    }

    pub fn admin(&self) -> &KeyTable {
        &self.admin
    }

    /// Current shared key for a group: the latest rotation.
    pub fn current_shared_key(&self, address: &str) -> Option<&GroupKey> {
        self.shared.latest_for_group(address)
    }

    /// The admin key is published under the creator pubkey in the address.
    pub fn admin_key_for_group(&self, address: &str) -> Option<&GroupKey> {
        let address = GroupAddress::parse(address).ok()?;
        self.admin.get(address.admin_pubkey())
    }

    /// Shared records then admin records, limited to one group when given.
    pub fn records<'a>(&'a self, address: Option<&'a str>) -> Vec<&'a GroupKey> {
        match address {
            Some(address) => self
                .shared
                .for_group(address)
                .chain(self.admin.for_group(address))
                .collect(),
            None => self.shared.iter().chain(self.admin.iter()).collect(),
        }
    }
}
