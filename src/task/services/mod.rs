//! Application services for ownership-scoped task access.

mod access;

pub use access::{
    CreateTaskRequest, TaskAccessError, TaskAccessResult, TaskAccessService, UpdateTaskRequest,
};
