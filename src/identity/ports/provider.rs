//! Identity provider port.

use crate::identity::domain::{AccessToken, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Resolves a presented credential into a stable caller identity.
///
/// Implementations sit in front of the task core: a request that cannot be
/// resolved here never reaches a task operation.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticates the bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] when the credential is
    /// unknown or revoked, or [`IdentityError::Backend`] when the provider
    /// itself fails.
    async fn authenticate(&self, token: &AccessToken) -> IdentityResult<UserId>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The credential does not identify any user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Identity backend failure.
    #[error("identity backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
