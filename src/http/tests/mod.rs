//! Unit tests for the task HTTP surface.
