//! Inbound encrypted wrapper, as far as key selection is concerned.
//!
//! The recipient tags are untrusted input: they are matched against locally
//! held keys, never assumed to name exactly one recipient.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

const RECIPIENT_TAG: &str = "p";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub kind: u32,
    /// Ephemeral sender key of the wrapper.
    #[serde(default)]
    pub pubkey: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    /// Ciphertext; opaque here.
    #[serde(default)]
    pub content: String,
}

impl Envelope {
    /// Values of the `p` tags, in tag order.
    pub fn recipient_pubkeys(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(|tag| match tag.as_slice() {
            [name, value, ..] if name == RECIPIENT_TAG => Some(value.as_str()),
            _ => None,
        })
    }
}
