//! Resync planning.
//!
//! The lower bound is pulled back by a fixed slack because publishers
//! randomise event timestamps; fetching a bounded trailing window twice is
//! the price of never leaving a gap.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use gk_proto::{GroupAddress, RelayMode, Session, Timestamp};
use gk_store::KeyStore;

use crate::access::GroupDirectory;
use crate::config::EngineConfig;
use crate::hints::HintMerger;

/// Parameters for one resync request. Computed fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SyncRequestInfo {
    /// Admin pubkeys of every group with a held key.
    pub admins: BTreeSet<String>,
    pub addresses: BTreeSet<String>,
    /// Pubkeys that wrapped group events may be addressed to. Always holds
    /// the local user's pubkey.
    pub recipients: BTreeSet<String>,
    pub relays: Vec<String>,
    pub since: Timestamp,
}

/// Everything a plan reads.
pub struct SyncInputs<'a> {
    pub pubkey: &'a str,
    pub keys: &'a KeyStore,
    pub groups: &'a dyn GroupDirectory,
    pub session: Option<&'a Session>,
    pub merger: &'a dyn HintMerger,
    pub config: &'a EngineConfig,
}

/// Last sync time for one group, or account-wide when `address` is `None`.
pub fn sync_base(session: Option<&Session>, address: Option<&str>) -> Timestamp {
    match (session, address) {
        (None, _) => 0,
        (Some(session), Some(address)) => session
            .group_status(address)
            .map(|status| status.last_synced)
            .unwrap_or(0),
        (Some(session), None) => session.groups_last_synced,
    }
}

/// `base - slack`, floored at epoch 0.
pub fn sync_since(base: Timestamp, slack_secs: u64) -> Timestamp {
    base.saturating_sub(slack_secs)
}

pub fn plan_sync(inputs: &SyncInputs<'_>, address: Option<&str>) -> SyncRequestInfo {
    let since = sync_since(
        sync_base(inputs.session, address),
        inputs.config.sync_slack(),
    );

    let mut info = SyncRequestInfo {
        since,
        ..SyncRequestInfo::default()
    };
    info.recipients.insert(inputs.pubkey.to_string());

    for key in inputs.keys.records(address) {
        match GroupAddress::parse(&key.group) {
            Ok(group) => {
                info.admins.insert(group.pubkey);
            }
            Err(err) => warn!(group = %key.group, error = %err, "no admin pubkey for malformed group address"),
        }
        info.addresses.insert(key.group.clone());
        info.recipients.insert(key.pubkey.clone());
    }

    let user_relays: Vec<String> = inputs
        .session
        .map(|s| s.relay_urls(RelayMode::Read).map(str::to_string).collect())
        .unwrap_or_default();

    let mut hint_sets = Vec::with_capacity(info.addresses.len() + 1);
    hint_sets.push(user_relays);
    hint_sets.extend(info.addresses.iter().map(|a| inputs.groups.relay_hints(a)));
    info.relays = inputs.merger.merge(&hint_sets, inputs.config.relay_limit);

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::ScoredMerger;
    use gk_proto::{Group, GroupStatus, Relay};
    use gk_store::{GroupKey, GroupStore};
    use proptest::prelude::*;

    const ME: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    fn hex(c: char) -> String {
        c.to_string().repeat(64)
    }

    fn address(creator: char, id: &str) -> String {
        format!("35834:{}:{id}", hex(creator))
    }

    fn plan(
        keys: &KeyStore,
        groups: &GroupStore,
        session: Option<&Session>,
        config: &EngineConfig,
        address: Option<&str>,
    ) -> SyncRequestInfo {
        let inputs = SyncInputs {
            pubkey: ME,
            keys,
            groups,
            session,
            merger: &ScoredMerger,
            config,
        };
        plan_sync(&inputs, address)
    }

    #[test]
    fn empty_state_still_lists_self() {
        let info = plan(&KeyStore::new(), &GroupStore::new(), None, &EngineConfig::default(), None);
        assert_eq!(info.recipients, BTreeSet::from([ME.to_string()]));
        assert!(info.admins.is_empty());
        assert!(info.addresses.is_empty());
        assert!(info.relays.is_empty());
        assert_eq!(info.since, 0);
    }

    #[test]
    fn since_is_floored_at_zero() {
        let g = address('a', "g");
        let mut session = Session::default();
        session.groups.insert(
            g.clone(),
            GroupStatus {
                last_synced: 600_000,
                ..GroupStatus::default()
            },
        );
        let info = plan(&KeyStore::new(), &GroupStore::new(), Some(&session), &EngineConfig::default(), Some(&g));
        assert_eq!(info.since, 0);
    }

    #[test]
    fn per_group_and_account_wide_bases_differ() {
        let g = address('a', "g");
        let mut session = Session {
            groups_last_synced: 2_000_000,
            ..Session::default()
        };
        session.groups.insert(
            g.clone(),
            GroupStatus {
                last_synced: 1_000_000,
                ..GroupStatus::default()
            },
        );
        let config = EngineConfig::default();
        let keys = KeyStore::new();
        let groups = GroupStore::new();

        assert_eq!(plan(&keys, &groups, Some(&session), &config, Some(&g)).since, 395_200);
        assert_eq!(plan(&keys, &groups, Some(&session), &config, None).since, 1_395_200);
        assert_eq!(plan(&keys, &groups, Some(&session), &config, Some(&address('b', "x"))).since, 0);
    }

    #[test]
    fn scoped_plan_only_covers_that_group() {
        let g1 = address('a', "one");
        let g2 = address('b', "two");
        let keys = KeyStore::from_records(
            [
                GroupKey::new(&g1, hex('1'), hex('f'), 1),
                GroupKey::new(&g1, hex('2'), hex('f'), 2),
                GroupKey::new(&g2, hex('3'), hex('f'), 1),
            ],
            [GroupKey::new(&g1, hex('a'), hex('f'), 1)],
        )
        .unwrap();

        let info = plan(&keys, &GroupStore::new(), None, &EngineConfig::default(), Some(&g1));
        assert_eq!(info.addresses, BTreeSet::from([g1.clone()]));
        assert_eq!(info.admins, BTreeSet::from([hex('a')]));
        assert_eq!(
            info.recipients,
            BTreeSet::from([ME.to_string(), hex('1'), hex('2'), hex('a')])
        );

        let all = plan(&keys, &GroupStore::new(), None, &EngineConfig::default(), None);
        assert_eq!(all.addresses, BTreeSet::from([g1, g2]));
        assert_eq!(all.admins, BTreeSet::from([hex('a'), hex('b')]));
        assert_eq!(all.recipients.len(), 5);
    }

    #[test]
    fn relays_merge_user_read_relays_and_group_hints() {
        let g = address('a', "g");
        let group = Group {
            relays: vec!["wss://group".into(), "wss://shared/".into()],
            ..Group::stub(&GroupAddress::parse(&g).unwrap())
        };
        let groups = GroupStore::from_groups([group]).unwrap();
        let keys = KeyStore::from_records([GroupKey::new(&g, hex('1'), hex('f'), 1)], []).unwrap();
        let session = Session {
            relays: vec![
                Relay::new("wss://mine"),
                Relay::new("wss://shared"),
                Relay {
                    read: Some(false),
                    ..Relay::new("wss://outbox-only")
                },
            ],
            ..Session::default()
        };

        let info = plan(&keys, &groups, Some(&session), &EngineConfig::default(), None);
        assert_eq!(info.relays, vec!["wss://shared", "wss://mine", "wss://group"]);

        let capped = EngineConfig {
            relay_limit: Some(1),
            ..EngineConfig::default()
        };
        let info = plan(&keys, &groups, Some(&session), &capped, None);
        assert_eq!(info.relays, vec!["wss://shared"]);
    }

    proptest! {
        #[test]
        fn since_is_saturating_difference(base in any::<u64>(), slack in any::<u64>()) {
            let since = sync_since(base, slack);
            prop_assert!(since <= base);
            if base >= slack {
                prop_assert_eq!(since, base - slack);
            } else {
                prop_assert_eq!(since, 0);
            }
        }

        #[test]
        fn self_always_in_recipients(last_synced in any::<u64>()) {
            let session = Session { groups_last_synced: last_synced, ..Session::default() };
            let info = plan(&KeyStore::new(), &GroupStore::new(), Some(&session), &EngineConfig::default(), None);
            prop_assert!(info.recipients.contains(ME));
            prop_assert_eq!(info.since, last_synced.saturating_sub(604_800));
        }
    }
}
