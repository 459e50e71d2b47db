//! Ownership-scoped task management for Taskvault.
//!
//! Every read, update and delete is confined to the caller's visible set:
//! tasks the caller owns that have not been soft-deleted. Tasks outside that
//! set surface as "not found", never "forbidden", so callers learn nothing
//! about tasks they cannot see. Deletion is a one-way state transition
//! rather than a row removal. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
