//! All resolvers bound to one snapshot of the caller's stores.
//!
//! Build one per query (or per batch of queries over the same snapshot);
//! it only borrows.

use tracing::debug;

use gk_proto::{Envelope, GroupAccess, MembershipLevel, Session};
use gk_store::{KeyStore, PrivateKey, StoreSnapshot};

use crate::access::{self, GroupDirectory};
use crate::config::EngineConfig;
use crate::error::KeyError;
use crate::hints::{HintMerger, ScoredMerger};
use crate::membership;
use crate::options::{self, GroupOption};
use crate::privacy;
use crate::recipient;
use crate::sync::{self, SyncInputs, SyncRequestInfo};

static DEFAULT_MERGER: ScoredMerger = ScoredMerger;

pub struct GroupEngine<'a> {
    /// Local user's pubkey.
    pubkey: &'a str,
    groups: &'a dyn GroupDirectory,
    keys: &'a KeyStore,
    session: Option<&'a Session>,
    merger: &'a dyn HintMerger,
    config: EngineConfig,
}

impl<'a> GroupEngine<'a> {
    pub fn new(
        pubkey: &'a str,
        groups: &'a dyn GroupDirectory,
        keys: &'a KeyStore,
        session: Option<&'a Session>,
    ) -> Self {
        Self {
            pubkey,
            groups,
            keys,
            session,
            merger: &DEFAULT_MERGER,
            config: EngineConfig::default(),
        }
    }

    pub fn from_snapshot(pubkey: &'a str, snapshot: &'a StoreSnapshot) -> Self {
        Self::new(pubkey, &snapshot.groups, &snapshot.keys, snapshot.session.as_ref())
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_merger(mut self, merger: &'a dyn HintMerger) -> Self {
        self.merger = merger;
        self
    }

    pub fn resolve_access(&self, address: &str) -> GroupAccess {
        access::resolve_access(self.groups, address)
    }

    pub fn resolve_membership(&self, address: &str) -> MembershipLevel {
        membership::resolve_membership(self.session, address)
    }

    /// `preference` is the member's per-message choice; it only matters
    /// for hybrid groups.
    pub fn should_send_privately(&self, address: &str, preference: bool) -> bool {
        let access = self.resolve_access(address);
        let level = self.resolve_membership(address);
        let private = privacy::should_send_privately(access, level, preference);
        debug!(address, ?access, ?level, preference, private, "privacy decision");
        private
    }

    pub fn select_decryption_key<'r, I>(&self, recipients: I) -> Result<PrivateKey, KeyError>
    where
        I: IntoIterator<Item = &'r str>,
    {
        recipient::select_decryption_key(self.keys, recipients)
    }

    pub fn select_envelope_key(&self, envelope: &Envelope) -> Result<PrivateKey, KeyError> {
        self.select_decryption_key(envelope.recipient_pubkeys())
    }

    /// `None` plans an account-wide resync across every group with a held key.
    pub fn plan_sync(&self, address: Option<&str>) -> SyncRequestInfo {
        let inputs = SyncInputs {
            pubkey: self.pubkey,
            keys: self.keys,
            groups: self.groups,
            session: self.session,
            merger: self.merger,
            config: &self.config,
        };
        sync::plan_sync(&inputs, address)
    }

    pub fn group_options(&self, defaults: &[String]) -> Vec<GroupOption> {
        options::group_options(self.groups, self.session, defaults)
    }
}
