use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("Invalid group address: {0}")]
    InvalidAddress(String),

    #[error("Invalid pubkey {0:?}: expected 64 lowercase hex chars")]
    InvalidPubkey(String),

    #[error("Invalid naddr: {0}")]
    InvalidNaddr(String),

    #[error("Bech32 error: {0}")]
    Bech32(String),
}
