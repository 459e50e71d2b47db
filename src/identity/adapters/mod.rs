//! Adapter implementations for the identity provider port.

pub mod memory;
