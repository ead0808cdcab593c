//! Decryption key selection for inbound envelopes.
//!
//! Only the first tagged recipient is consulted: the wrapping convention
//! tags exactly one meaningful recipient per envelope. If the convention
//! starts tagging several simultaneous recipients, this must try each one.
//!
//! Shared keys are checked before admin keys; an admin key is the fallback.
//! Both are hash lookups.

use gk_store::{KeyStore, PrivateKey};
use tracing::debug;

use crate::error::KeyError;

pub fn select_decryption_key<'r, I>(keys: &KeyStore, recipients: I) -> Result<PrivateKey, KeyError>
where
    I: IntoIterator<Item = &'r str>,
{
    let Some(recipient) = recipients.into_iter().next() else {
        debug!("envelope carries no recipient tag");
        return Err(KeyError::NoUsableKey);
    };

    if let Some(key) = keys.shared().get(recipient) {
        debug!(recipient, group = %key.group, "matched shared key");
        return Ok(key.private_key());
    }

    if let Some(key) = keys.admin().get(recipient) {
        debug!(recipient, group = %key.group, "matched admin key");
        return Ok(key.private_key());
    }

    debug!(recipient, "no usable key for envelope");
    Err(KeyError::NoUsableKey)
}
