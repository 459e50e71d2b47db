//! Bearer credential presented by a caller.

use super::IdentityDomainError;
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque bearer credential.
///
/// The raw value never appears in `Debug` output so tokens cannot leak
/// through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyAccessToken`] when the value is
    /// blank, or [`IdentityDomainError::MalformedAccessToken`] when it
    /// contains inner whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyAccessToken);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdentityDomainError::MalformedAccessToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parses the credential out of an `Authorization` header value.
    ///
    /// The scheme match is case-insensitive, as HTTP auth schemes are.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MalformedAccessToken`] when the header
    /// does not use the `Bearer` scheme, or any error from
    /// [`AccessToken::new`].
    pub fn from_authorization_header(header: &str) -> Result<Self, IdentityDomainError> {
        let (scheme, credential) = header
            .trim()
            .split_once(' ')
            .ok_or(IdentityDomainError::MalformedAccessToken)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(IdentityDomainError::MalformedAccessToken);
        }
        Self::new(credential)
    }

    /// Returns the SHA-256 digest of the credential.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.0.as_bytes()).into()
    }

    /// Returns the raw credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
