//! Domain model for ownership-scoped task management.
//!
//! A task belongs to exactly one owner for its whole life and moves through
//! a one-way `active -> deleted` lifecycle. What a caller may observe is
//! captured by [`VisibilityScope`]; infrastructure concerns stay outside the
//! domain boundary.

mod error;
mod ids;
mod page;
mod task;
mod title;
mod visibility;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use page::{PageRequest, TaskPage};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskState};
pub use title::TaskTitle;
pub use visibility::VisibilityScope;
