use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Not a corrupt message: the key may still arrive with a later grant.
    #[error("No locally held key matches the envelope recipient")]
    NoUsableKey,
}
