//! Taskvault: a multi-tenant task management backend.
//!
//! Every authenticated caller sees and changes only the tasks they own, and
//! deletion is a soft, one-way state transition rather than a row removal.
//!
//! # Architecture
//!
//! Taskvault follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, identity)
//!
//! # Modules
//!
//! - [`task`]: Ownership-scoped task access and soft deletion
//! - [`identity`]: Caller identity boundary and bearer-token provider
//! - [`http`]: JSON-over-HTTP surface built on axum
//! - [`config`]: Layered server configuration

pub mod config;
pub mod http;
pub mod identity;
pub mod task;
