//! The CLI's state file: one JSON document holding everything the resolvers
//! read.
//!
//! ```json
//! {
//!   "pubkey": "<hex>",
//!   "session": { "groups_last_synced": 0, "groups": {}, "relays": [] },
//!   "groups": [],
//!   "shared_keys": [],
//!   "admin_keys": []
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use gk_proto::{Group, Session};
use gk_store::{GroupKey, GroupStore, KeyStore, StoreSnapshot};

#[derive(Debug, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub pubkey: Option<String>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub shared_keys: Vec<GroupKey>,
    #[serde(default)]
    pub admin_keys: Vec<GroupKey>,
}

impl SnapshotFile {
    pub fn into_snapshot(self) -> anyhow::Result<(Option<String>, StoreSnapshot)> {
        let groups = GroupStore::from_groups(self.groups).context("loading groups")?;
        let keys =
            KeyStore::from_records(self.shared_keys, self.admin_keys).context("loading keys")?;
        Ok((
            self.pubkey,
            StoreSnapshot {
                keys,
                groups,
                session: self.session,
            },
        ))
    }
}

pub fn load_snapshot(path: &Path) -> anyhow::Result<(Option<String>, StoreSnapshot)> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: SnapshotFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    file.into_snapshot()
}
