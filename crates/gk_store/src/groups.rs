//! Cached group metadata, keyed by address.

use std::borrow::Cow;
use std::collections::HashMap;

use gk_proto::{Group, GroupAddress};

use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    groups: HashMap<String, Group>,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: impl IntoIterator<Item = Group>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for group in groups {
            store.upsert(group)?;
        }
        Ok(store)
    }

    /// Store the latest metadata for a group. Recency ordering between
    /// competing metadata events is resolved before this is called.
    pub fn upsert(&mut self, group: Group) -> Result<Option<Group>, StoreError> {
        GroupAddress::parse(&group.address)?;
        Ok(self.groups.insert(group.address.clone(), group))
    }

    pub fn get(&self, address: &str) -> Option<&Group> {
        self.groups.get(address)
    }

    /// The cached group, or a stub derived from the address when its
    /// metadata has not been seen.
    pub fn get_or_stub(&self, address: &str) -> Result<Cow<'_, Group>, StoreError> {
        if let Some(group) = self.groups.get(address) {
            return Ok(Cow::Borrowed(group));
        }
        let parsed = GroupAddress::parse(address)?;
        Ok(Cow::Owned(Group::stub(&parsed)))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
