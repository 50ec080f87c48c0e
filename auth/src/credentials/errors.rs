use thiserror::Error;

/// Error raised while loading a credential table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Empty username in credential table")]
    EmptyUsername,

    #[error("Unrecognised password hash for user {0}")]
    InvalidHash(String),
}
