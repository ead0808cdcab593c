use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid record: {0}")]
    Proto(#[from] gk_proto::ProtoError),

    #[error("Invalid key material for {pubkey}: {reason}")]
    InvalidKey { pubkey: String, reason: String },
}
