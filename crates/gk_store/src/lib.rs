//! gk_store — Locally held group key material and cached group metadata
//!
//! Key records are indexed twice: by pubkey (the lookup an inbound envelope
//! needs) and by group address (the lookup sync planning and key rotation
//! need). Neither path scans the whole table.
//!
//! Persistence is the host's concern; these stores are rebuilt from whatever
//! the host keeps and are read through consistent snapshots.

pub mod error;
pub mod groups;
pub mod keys;
pub mod shared;

pub use error::StoreError;
pub use groups::GroupStore;
pub use keys::{GroupKey, KeyStore, KeyTable, PrivateKey};
pub use shared::{SharedStores, StoreSnapshot};
