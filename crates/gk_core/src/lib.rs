//! gk_core — Group membership and key resolution
//!
//! Every operation is a synchronous read over snapshots the caller owns:
//! nothing here blocks, touches the network or mutates state. Callers that
//! need live updates re-run the queries when their stores change.
//!
//! Read-path ambiguity resolves to a safe default instead of an error:
//! unknown group → `Closed`, unknown status → `None` membership, missing
//! timestamps → epoch 0. Key selection is the one operation that can come
//! back empty, as `KeyError::NoUsableKey`.
//!
//! # Module layout
//! - `access`     — group access policy
//! - `membership` — the user's membership level
//! - `privacy`    — whether an outgoing message goes private
//! - `recipient`  — decryption key for an inbound envelope
//! - `sync`       — resync window, recipients and relays
//! - `hints`      — relay hint merging
//! - `options`    — groups offered to the user as posting targets
//! - `engine`     — all of the above bound to one snapshot
//! - `config`     — tunables
//! - `error`      — key selection error

pub mod access;
pub mod config;
pub mod engine;
pub mod error;
pub mod hints;
pub mod membership;
pub mod options;
pub mod privacy;
pub mod recipient;
pub mod sync;

pub use access::{resolve_access, GroupDirectory, DEFAULT_ACCESS};
pub use config::EngineConfig;
pub use engine::GroupEngine;
pub use error::KeyError;
pub use hints::{HintMerger, ScoredMerger};
pub use membership::{membership_level, resolve_membership};
pub use options::GroupOption;
pub use privacy::should_send_privately;
pub use recipient::select_decryption_key;
pub use sync::SyncRequestInfo;
