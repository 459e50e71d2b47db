//! In-memory identity adapters.

mod static_tokens;

pub use static_tokens::StaticTokenIdentityProvider;
