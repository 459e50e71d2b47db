//! Caller identity boundary for Taskvault.
//!
//! The task core never authenticates anyone itself. It receives an opaque,
//! already-authenticated [`domain::UserId`] from an [`ports::IdentityProvider`]
//! and treats it as trusted for the duration of one request. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
