//! The current user's membership level in a group.

use gk_proto::{GroupStatus, MemberAccess, MembershipLevel, Session};

/// First match wins. An explicit grant yields `Private` even when `joined`
/// is false; the grant is the stronger signal.
pub fn membership_level(status: &GroupStatus) -> MembershipLevel {
    if status.access == MemberAccess::Granted {
        MembershipLevel::Private
    } else if status.joined {
        MembershipLevel::Public
    } else {
        MembershipLevel::None
    }
}

/// Absent session or absent status both read as the empty status.
pub fn resolve_membership(session: Option<&Session>, address: &str) -> MembershipLevel {
    match session.and_then(|s| s.group_status(address)) {
        Some(status) => membership_level(status),
        None => membership_level(&GroupStatus::default()),
    }
}
