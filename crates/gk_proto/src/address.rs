//! Group address codec.
//!
//! A group is addressed as `kind:pubkey:identifier`. The pubkey is the
//! creator's identity and is also the pubkey the group's admin key is
//! published under, so the admin of any group can be read straight off its
//! address. The identifier is everything after the second colon and may
//! itself contain colons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// Event kind used for group definitions.
pub const GROUP_KIND: u32 = 35834;

/// Parsed `kind:pubkey:identifier` address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupAddress {
    pub kind: u32,
    /// Creator pubkey, 64 lowercase hex chars.
    pub pubkey: String,
    pub identifier: String,
}

impl GroupAddress {
    pub fn new(
        kind: u32,
        pubkey: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<Self, ProtoError> {
        let pubkey = pubkey.into();
        validate_pubkey(&pubkey)?;
        Ok(Self {
            kind,
            pubkey,
            identifier: identifier.into(),
        })
    }

    pub fn parse(s: &str) -> Result<Self, ProtoError> {
        let mut parts = s.splitn(3, ':');
        let (Some(kind), Some(pubkey), Some(identifier)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(ProtoError::InvalidAddress(format!(
                "expected kind:pubkey:identifier, got {s:?}"
            )));
        };

        let kind = kind
            .parse::<u32>()
            .map_err(|_| ProtoError::InvalidAddress(format!("bad kind {kind:?} in {s:?}")))?;

        Self::new(kind, pubkey, identifier)
    }

    /// The admin pubkey for this group (same as the creator).
    pub fn admin_pubkey(&self) -> &str {
        &self.pubkey
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.pubkey, self.identifier)
    }
}

impl FromStr for GroupAddress {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GroupAddress {
    type Error = ProtoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<GroupAddress> for String {
    fn from(address: GroupAddress) -> Self {
        address.to_string()
    }
}

/// Identifier part of a raw address string, without validating the rest.
pub fn group_id(address: &str) -> &str {
    address.splitn(3, ':').nth(2).unwrap_or_default()
}

/// Raw 32 bytes of a pubkey in its canonical lowercase hex form.
pub fn pubkey_bytes(pubkey: &str) -> Result<[u8; 32], ProtoError> {
    let invalid = || ProtoError::InvalidPubkey(pubkey.to_string());
    let bytes: [u8; 32] = hex::decode(pubkey)
        .map_err(|_| invalid())?
        .try_into()
        .map_err(|_| invalid())?;
    if hex::encode(bytes) != pubkey {
        return Err(invalid());
    }
    Ok(bytes)
}

pub fn validate_pubkey(pubkey: &str) -> Result<(), ProtoError> {
    pubkey_bytes(pubkey).map(|_| ())
}
