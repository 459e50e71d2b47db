//! Unit tests for the identity bounded context.
