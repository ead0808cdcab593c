//! Group metadata, access policy and membership level.
//!
//! A `Group` is created the first time its metadata is observed and updated
//! by later metadata events (last write wins, handled upstream). Groups are
//! never deleted; they may simply go stale.

use serde::{Deserialize, Serialize};

use crate::address::GroupAddress;
use crate::error::ProtoError;
use crate::naddr::encode_naddr;

/// Access policy declared by a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAccess {
    /// Anyone may read and write publicly.
    Open,
    /// Private only; membership strictly gated.
    Closed,
    /// Members choose per message whether to go private.
    Hybrid,
}

/// A user's standing against a group. Ordered `None < Public < Private`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipLevel {
    None,
    /// Joined, but not granted access to encrypted content.
    Public,
    /// Explicitly granted access to encrypted content.
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    /// Creator identity.
    pub pubkey: String,
    /// `kind:pubkey:identifier`; the group's identity.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub relays: Vec<String>,
    /// Absent until the group's metadata declares a policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<GroupAccess>,
}

impl Group {
    /// Placeholder for a group whose metadata has not been seen yet.
    pub fn stub(address: &GroupAddress) -> Self {
        Self {
            id: address.identifier.clone(),
            pubkey: address.pubkey.clone(),
            address: address.to_string(),
            name: None,
            relays: Vec::new(),
            access: None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }

    /// Shareable `naddr` reference carrying this group's relay hints.
    pub fn naddr(&self) -> Result<String, ProtoError> {
        let address = GroupAddress::parse(&self.address)?;
        encode_naddr(&address, &self.relays)
    }
}
