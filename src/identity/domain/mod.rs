//! Domain model for caller identity.
//!
//! Identity values are deliberately opaque: the task core compares user
//! identifiers for equality and nothing else.

mod error;
mod ids;
mod token;

pub use error::IdentityDomainError;
pub use ids::UserId;
pub use token::AccessToken;
