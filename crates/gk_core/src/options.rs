//! Groups offered to the user as posting targets.

use std::collections::HashSet;

use serde::Serialize;

use gk_proto::{Group, MembershipLevel, Session};

use crate::access::GroupDirectory;
use crate::membership::resolve_membership;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOption {
    pub address: String,
    /// Cached metadata; absent for defaults that were never observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

/// Groups the user belongs to (with known metadata), then the defaults,
/// de-duplicated by address keeping the first occurrence.
pub fn group_options(
    groups: &dyn GroupDirectory,
    session: Option<&Session>,
    defaults: &[String],
) -> Vec<GroupOption> {
    let mut addresses: Vec<&String> = session
        .map(|s| s.groups.keys().collect())
        .unwrap_or_default();
    addresses.sort();

    let memberships = addresses.into_iter().filter_map(|address| {
        let group = groups.group(address)?;
        (resolve_membership(session, address) != MembershipLevel::None).then(|| GroupOption {
            address: address.clone(),
            group: Some(group.clone()),
        })
    });

    let defaults = defaults.iter().map(|address| GroupOption {
        address: address.clone(),
        group: None,
    });

    let mut seen = HashSet::new();
    memberships
        .chain(defaults)
        .filter(|option| seen.insert(option.address.clone()))
        .collect()
}
