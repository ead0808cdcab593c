use std::collections::BTreeSet;

use gk_core::{EngineConfig, GroupEngine, HintMerger, KeyError};
use gk_proto::{
    decode_naddr, Envelope, Group, GroupAccess, GroupAddress, GroupStatus, MemberAccess,
    MembershipLevel, Relay, Session, GROUP_KIND,
};
use gk_store::{GroupKey, GroupStore, KeyStore, SharedStores, StoreSnapshot};

const ME: &str = "e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0";
const ADMIN: &str = "adadadadadadadadadadadadadadadadadadadadadadadadadadadadadadadad";

fn hex(c: char) -> String {
    c.to_string().repeat(64)
}

fn address(id: &str) -> String {
    GroupAddress::new(GROUP_KIND, ADMIN, id).unwrap().to_string()
}

fn group(id: &str, access: Option<GroupAccess>) -> Group {
    Group {
        name: Some(format!("Group {id}")),
        relays: vec![format!("wss://{id}.relay")],
        access,
        ..Group::stub(&GroupAddress::parse(&address(id)).unwrap())
    }
}

fn status(joined: bool, access: MemberAccess, last_synced: u64) -> GroupStatus {
    GroupStatus {
        joined,
        access,
        last_synced,
    }
}

/// Three groups: a closed one the user holds keys for, a hybrid one, and an
/// open one the user merely joined.
fn snapshot() -> StoreSnapshot {
    let groups = GroupStore::from_groups([
        group("closed", Some(GroupAccess::Closed)),
        group("hybrid", Some(GroupAccess::Hybrid)),
        group("open", Some(GroupAccess::Open)),
    ])
    .unwrap();

    let keys = KeyStore::from_records(
        [
            GroupKey::new(address("closed"), hex('1'), hex('5'), 1_000),
            GroupKey::new(address("closed"), hex('2'), hex('6'), 2_000),
            GroupKey::new(address("hybrid"), hex('3'), hex('7'), 1_500),
        ],
        [GroupKey::new(address("closed"), ADMIN, hex('8'), 500)],
    )
    .unwrap();

    let mut session = Session {
        groups_last_synced: 1_000_000,
        relays: vec![Relay::new("wss://home.relay")],
        ..Session::default()
    };
    session
        .groups
        .insert(address("closed"), status(true, MemberAccess::Granted, 900_000));
    session
        .groups
        .insert(address("hybrid"), status(false, MemberAccess::Granted, 600_000));
    session
        .groups
        .insert(address("open"), status(true, MemberAccess::Requested, 0));

    StoreSnapshot {
        keys,
        groups,
        session: Some(session),
    }
}

#[test]
fn access_defaults_to_closed_for_unknown_groups() {
    let snapshot = snapshot();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    assert_eq!(engine.resolve_access(&address("hybrid")), GroupAccess::Hybrid);
    assert_eq!(engine.resolve_access(&address("never-seen")), GroupAccess::Closed);
    assert_eq!(engine.resolve_access("not even an address"), GroupAccess::Closed);
}

#[test]
fn membership_follows_grant_then_joined() {
    let snapshot = snapshot();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    assert_eq!(engine.resolve_membership(&address("closed")), MembershipLevel::Private);
    // Granted without joining is still private.
    assert_eq!(engine.resolve_membership(&address("hybrid")), MembershipLevel::Private);
    assert_eq!(engine.resolve_membership(&address("open")), MembershipLevel::Public);
    assert_eq!(engine.resolve_membership(&address("never-seen")), MembershipLevel::None);
}

#[test]
fn privacy_decision_per_group() {
    let snapshot = snapshot();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    for preference in [false, true] {
        assert!(engine.should_send_privately(&address("closed"), preference));
        assert_eq!(engine.should_send_privately(&address("hybrid"), preference), preference);
        assert!(!engine.should_send_privately(&address("open"), preference));
        assert!(!engine.should_send_privately(&address("never-seen"), preference));
    }
}

#[test]
fn envelope_resolves_shared_then_admin_key() {
    let snapshot = snapshot();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);

    let to_shared = Envelope {
        id: "wrap-1".into(),
        kind: 1059,
        pubkey: hex('9'),
        created_at: 0,
        tags: vec![vec!["p".into(), hex('1')]],
        content: String::new(),
    };
    assert_eq!(engine.select_envelope_key(&to_shared).unwrap().expose_secret(), hex('5'));

    let to_admin = Envelope {
        tags: vec![vec!["p".into(), ADMIN.into()]],
        ..to_shared.clone()
    };
    assert_eq!(engine.select_envelope_key(&to_admin).unwrap().expose_secret(), hex('8'));

    let second_tag_only = Envelope {
        tags: vec![vec!["p".into(), hex('4')], vec!["p".into(), hex('1')]],
        ..to_shared
    };
    assert_eq!(
        engine.select_envelope_key(&second_tag_only).unwrap_err(),
        KeyError::NoUsableKey
    );
}

#[test]
fn account_wide_sync_plan() {
    let snapshot = snapshot();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    let plan = engine.plan_sync(None);

    assert_eq!(plan.since, 1_000_000 - 604_800);
    assert_eq!(
        plan.addresses,
        BTreeSet::from([address("closed"), address("hybrid")])
    );
    assert_eq!(plan.admins, BTreeSet::from([ADMIN.to_string()]));
    assert_eq!(
        plan.recipients,
        BTreeSet::from([ME.to_string(), hex('1'), hex('2'), hex('3'), ADMIN.to_string()])
    );
    assert_eq!(plan.relays.first().map(String::as_str), Some("wss://home.relay"));
    assert_eq!(plan.relays.len(), 3);
}

#[test]
fn single_group_sync_plan_floors_since() {
    let snapshot = snapshot();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    let plan = engine.plan_sync(Some(&address("hybrid")));

    assert_eq!(plan.since, 0);
    assert_eq!(plan.addresses, BTreeSet::from([address("hybrid")]));
    assert_eq!(
        plan.recipients,
        BTreeSet::from([ME.to_string(), hex('3')])
    );
    assert_eq!(plan.relays, vec!["wss://home.relay", "wss://hybrid.relay"]);
}

#[test]
fn empty_stores_still_plan_for_self() {
    let snapshot = StoreSnapshot::default();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    let plan = engine.plan_sync(None);
    assert_eq!(plan.recipients, BTreeSet::from([ME.to_string()]));
    assert_eq!(plan.since, 0);
    assert!(plan.relays.is_empty());
}

struct FirstOnly;

impl HintMerger for FirstOnly {
    fn merge(&self, hint_sets: &[Vec<String>], _limit: Option<usize>) -> Vec<String> {
        hint_sets.first().cloned().unwrap_or_default()
    }
}

#[test]
fn custom_merger_and_config_are_used() {
    let snapshot = snapshot();
    let config = EngineConfig {
        sync_slack_secs: 900_000,
        relay_limit: None,
    };
    let engine = GroupEngine::from_snapshot(ME, &snapshot)
        .with_config(config)
        .with_merger(&FirstOnly);
    let plan = engine.plan_sync(None);
    assert_eq!(plan.since, 100_000);
    assert_eq!(plan.relays, vec!["wss://home.relay"]);
}

#[test]
fn configured_slack_below_a_week_is_raised() {
    let snapshot = snapshot();
    let config = EngineConfig {
        sync_slack_secs: 0,
        relay_limit: None,
    };
    let engine = GroupEngine::from_snapshot(ME, &snapshot).with_config(config);
    assert_eq!(engine.plan_sync(None).since, 1_000_000 - 604_800);
}

#[test]
fn rotation_changes_current_key_but_old_envelopes_still_decrypt() {
    let stores = SharedStores::new(snapshot());
    assert_eq!(
        stores.read().keys.current_shared_key(&address("closed")).unwrap().pubkey,
        hex('2')
    );

    stores
        .update(|s| {
            s.keys
                .insert_shared(GroupKey::new(address("closed"), hex('4'), hex('9'), 3_000))
        })
        .unwrap();

    let snapshot = stores.read();
    assert_eq!(
        snapshot.keys.current_shared_key(&address("closed")).unwrap().pubkey,
        hex('4')
    );
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    let old = engine.select_decryption_key([hex('1').as_str()]).unwrap();
    assert_eq!(old.expose_secret(), hex('5'));
}

#[test]
fn options_and_naddr_for_member_groups() {
    let snapshot = snapshot();
    let engine = GroupEngine::from_snapshot(ME, &snapshot);
    let options = engine.group_options(&[address("extra")]);
    let listed: Vec<_> = options.iter().map(|o| o.address.clone()).collect();
    assert_eq!(
        listed,
        vec![address("closed"), address("hybrid"), address("open"), address("extra")]
    );

    let closed = options[0].group.as_ref().unwrap();
    let (decoded, relays) = decode_naddr(&closed.naddr().unwrap()).unwrap();
    assert_eq!(decoded.to_string(), address("closed"));
    assert_eq!(relays, vec!["wss://closed.relay"]);
}
