//! Shareable group reference (`naddr`).
//!
//! Bech32 string over a TLV payload:
//!
//! | type | value                         |
//! |------|-------------------------------|
//! | 0    | identifier (utf-8)            |
//! | 1    | relay url (utf-8, repeatable) |
//! | 2    | author pubkey (32 raw bytes)  |
//! | 3    | kind (u32 big-endian)         |
//!
//! Unknown types are skipped on decode.

use bech32::{Bech32, Hrp};

use crate::address::{pubkey_bytes, GroupAddress};
use crate::error::ProtoError;

const NADDR_HRP: Hrp = Hrp::parse_unchecked("naddr");

const TLV_SPECIAL: u8 = 0;
const TLV_RELAY: u8 = 1;
const TLV_AUTHOR: u8 = 2;
const TLV_KIND: u8 = 3;

pub fn encode_naddr(address: &GroupAddress, relays: &[String]) -> Result<String, ProtoError> {
    let mut tlv = Vec::new();
    push_tlv(&mut tlv, TLV_SPECIAL, address.identifier.as_bytes())?;
    for relay in relays {
        push_tlv(&mut tlv, TLV_RELAY, relay.as_bytes())?;
    }
    push_tlv(&mut tlv, TLV_AUTHOR, &pubkey_bytes(&address.pubkey)?)?;
    push_tlv(&mut tlv, TLV_KIND, &address.kind.to_be_bytes())?;

    bech32::encode::<Bech32>(NADDR_HRP, &tlv).map_err(|e| ProtoError::Bech32(e.to_string()))
}

/// Decode an `naddr` back into the group address and its relay hints.
pub fn decode_naddr(s: &str) -> Result<(GroupAddress, Vec<String>), ProtoError> {
    let (hrp, data) = bech32::decode(s).map_err(|e| ProtoError::Bech32(e.to_string()))?;
    if hrp != NADDR_HRP {
        return Err(ProtoError::InvalidNaddr(format!("unexpected prefix {hrp}")));
    }

    let mut identifier = None;
    let mut author = None;
    let mut kind = None;
    let mut relays = Vec::new();

    let mut rest = data.as_slice();
    while !rest.is_empty() {
        let [t, len, tail @ ..] = rest else {
            return Err(ProtoError::InvalidNaddr("truncated tlv header".into()));
        };
        let len = *len as usize;
        if tail.len() < len {
            return Err(ProtoError::InvalidNaddr(format!(
                "tlv type {t} claims {len} bytes, {} left",
                tail.len()
            )));
        }
        let (value, next) = tail.split_at(len);

        match *t {
            TLV_SPECIAL => identifier = Some(utf8(value)?),
            TLV_RELAY => relays.push(utf8(value)?),
            TLV_AUTHOR => {
                let bytes: [u8; 32] = value.try_into().map_err(|_| {
                    ProtoError::InvalidNaddr(format!("author must be 32 bytes, got {}", value.len()))
                })?;
                author = Some(hex::encode(bytes));
            }
            TLV_KIND => {
                let bytes: [u8; 4] = value
                    .try_into()
                    .map_err(|_| ProtoError::InvalidNaddr("kind must be 4 bytes".into()))?;
                kind = Some(u32::from_be_bytes(bytes));
            }
            _ => {}
        }
        rest = next;
    }

    let identifier = identifier.ok_or_else(|| ProtoError::InvalidNaddr("missing identifier".into()))?;
    let author = author.ok_or_else(|| ProtoError::InvalidNaddr("missing author".into()))?;
    let kind = kind.ok_or_else(|| ProtoError::InvalidNaddr("missing kind".into()))?;

    Ok((GroupAddress::new(kind, author, identifier)?, relays))
}

fn push_tlv(out: &mut Vec<u8>, t: u8, value: &[u8]) -> Result<(), ProtoError> {
    let len = u8::try_from(value.len())
        .map_err(|_| ProtoError::InvalidNaddr(format!("tlv type {t} value exceeds 255 bytes")))?;
    out.push(t);
    out.push(len);
    out.extend_from_slice(value);
    Ok(())
}

fn utf8(value: &[u8]) -> Result<String, ProtoError> {
    String::from_utf8(value.to_vec()).map_err(|e| ProtoError::InvalidNaddr(e.to_string()))
}
