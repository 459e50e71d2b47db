//! Error types for identity value construction.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The access token is empty after trimming.
    #[error("access token must not be empty")]
    EmptyAccessToken,

    /// The access token contains whitespace inside the credential.
    #[error("access token must not contain whitespace")]
    MalformedAccessToken,

    /// The user identifier is not a valid UUID.
    #[error("invalid user identifier '{0}'")]
    InvalidUserId(String),
}
