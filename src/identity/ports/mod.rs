//! Port contracts for caller identity resolution.

pub mod provider;

pub use provider::{IdentityError, IdentityProvider, IdentityResult};
