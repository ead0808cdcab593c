//! gk_proto — In-memory records and codecs for group membership
//!
//! Nothing here owns a wire or storage format: records arrive already parsed
//! from the surrounding messaging layer.
//!
//! # Modules
//! - `address`  — `kind:pubkey:identifier` group address codec
//! - `naddr`    — shareable bech32 group reference
//! - `group`    — group metadata, access policy, membership level
//! - `session`  — per-user cached group status
//! - `relay`    — relay entries and url normalisation
//! - `envelope` — recipient tags on an inbound encrypted wrapper
//! - `error`    — codec error type

pub mod address;
pub mod envelope;
pub mod error;
pub mod group;
pub mod naddr;
pub mod relay;
pub mod session;

pub use address::{group_id, GroupAddress, GROUP_KIND};
pub use envelope::Envelope;
pub use error::ProtoError;
pub use group::{Group, GroupAccess, MembershipLevel};
pub use naddr::{decode_naddr, encode_naddr};
pub use relay::{normalize_relay_url, Relay, RelayMode};
pub use session::{GroupStatus, MemberAccess, Session};

/// Unix timestamp in seconds, as carried on group events.
pub type Timestamp = u64;
