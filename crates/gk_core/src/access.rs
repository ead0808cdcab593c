//! Group access policy.

use std::collections::HashMap;

use gk_proto::{Group, GroupAccess};
use gk_store::GroupStore;

/// Policy assumed for a group with no cached metadata or no declared policy.
/// Unknown groups are never treated as open.
pub const DEFAULT_ACCESS: GroupAccess = GroupAccess::Closed;

/// Read side of the group metadata cache.
pub trait GroupDirectory {
    fn group(&self, address: &str) -> Option<&Group>;

    /// Relays the group's metadata points at.
    fn relay_hints(&self, address: &str) -> Vec<String> {
        self.group(address)
            .map(|group| group.relays.clone())
            .unwrap_or_default()
    }
}

impl GroupDirectory for GroupStore {
    fn group(&self, address: &str) -> Option<&Group> {
        self.get(address)
    }
}

impl GroupDirectory for HashMap<String, Group> {
    fn group(&self, address: &str) -> Option<&Group> {
        self.get(address)
    }
}

pub fn access_policy(group: Option<&Group>) -> GroupAccess {
    match group.and_then(|g| g.access) {
        Some(access) => access,
        None => DEFAULT_ACCESS,
    }
}

pub fn resolve_access(groups: &dyn GroupDirectory, address: &str) -> GroupAccess {
    access_policy(groups.group(address))
}
