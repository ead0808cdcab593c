//! Per-user cached group status.
//!
//! Only `MemberAccess::Granted` elevates a member to private access; the
//! `joined` flag and the access grant are tracked independently and are not
//! required to agree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::relay::{Relay, RelayMode};
use crate::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberAccess {
    #[default]
    None,
    Requested,
    Granted,
    Revoked,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupStatus {
    #[serde(default)]
    pub joined: bool,
    #[serde(default)]
    pub access: MemberAccess,
    /// Last time this group's history was synced, in seconds.
    #[serde(default)]
    pub last_synced: Timestamp,
}

/// Session state cached for the logged-in user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Last account-wide sync across all groups.
    #[serde(default)]
    pub groups_last_synced: Timestamp,
    /// Keyed by group address.
    #[serde(default)]
    pub groups: HashMap<String, GroupStatus>,
    /// The user's own relay list.
    #[serde(default)]
    pub relays: Vec<Relay>,
}

impl Session {
    pub fn group_status(&self, address: &str) -> Option<&GroupStatus> {
        self.groups.get(address)
    }

    pub fn relay_urls(&self, mode: RelayMode) -> impl Iterator<Item = &str> {
        self.relays
            .iter()
            .filter(move |r| r.supports(mode))
            .map(|r| r.url.as_str())
    }
}
