//! Whether an outgoing message to a group is sent privately.
//!
//! Every `(access, level)` pair has an explicit row. A new access policy
//! must add its own rows; nothing falls through to a default.

use gk_proto::{GroupAccess, MembershipLevel};

pub fn should_send_privately(
    access: GroupAccess,
    level: MembershipLevel,
    preference: bool,
) -> bool {
    match (access, level) {
        // No grant, no private send.
        (_, MembershipLevel::None | MembershipLevel::Public) => false,
        (GroupAccess::Closed, MembershipLevel::Private) => true,
        (GroupAccess::Hybrid, MembershipLevel::Private) => preference,
        (GroupAccess::Open, MembershipLevel::Private) => false,
    }
}
