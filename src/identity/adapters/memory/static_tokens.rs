//! Identity provider backed by a fixed table of pre-shared bearer tokens.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{AccessToken, UserId},
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// Thread-safe token table keyed by SHA-256 digest.
///
/// Raw tokens are never retained after registration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenIdentityProvider {
    tokens: Arc<RwLock<HashMap<[u8; 32], UserId>>>,
}

impl StaticTokenIdentityProvider {
    /// Creates an empty provider that rejects every credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for the given user, replacing any previous mapping
    /// for the same token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Backend`] when the token table lock is
    /// poisoned.
    pub fn register(&self, token: &AccessToken, user: UserId) -> IdentityResult<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|err| IdentityError::backend(std::io::Error::other(err.to_string())))?;
        tokens.insert(token.digest(), user);
        Ok(())
    }

    /// Revokes a token. Returns `true` when a mapping was removed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Backend`] when the token table lock is
    /// poisoned.
    pub fn revoke(&self, token: &AccessToken) -> IdentityResult<bool> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|err| IdentityError::backend(std::io::Error::other(err.to_string())))?;
        Ok(tokens.remove(&token.digest()).is_some())
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentityProvider {
    async fn authenticate(&self, token: &AccessToken) -> IdentityResult<UserId> {
        let tokens = self
            .tokens
            .read()
            .map_err(|err| IdentityError::backend(std::io::Error::other(err.to_string())))?;
        tokens
            .get(&token.digest())
            .copied()
            .ok_or(IdentityError::InvalidCredentials)
    }
}
