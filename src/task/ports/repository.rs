//! Repository port for ownership-scoped task persistence.

use crate::task::domain::{PageRequest, Task, TaskId, TaskPage, VisibilityScope};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every read and write except the initial insert is expressed against a
/// [`VisibilityScope`]. Implementations apply the scope in the storage query
/// itself rather than filtering results afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Returns one page of the visible set, ordered by `created_at`
    /// descending with ties broken by reverse insertion order, together with
    /// the size of the whole visible set.
    async fn list_visible(
        &self,
        scope: VisibilityScope,
        page: PageRequest,
    ) -> TaskRepositoryResult<TaskPage>;

    /// Finds a task by identifier inside the visible set.
    ///
    /// Returns `None` when the task does not exist, belongs to another owner,
    /// or has been deleted; the three cases are indistinguishable.
    async fn find_visible(
        &self,
        scope: VisibilityScope,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Overwrites the mutable state of a task that is still visible.
    ///
    /// The write is conditional on the stored row still lying inside
    /// `scope`, so a task deleted concurrently is never resurrected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no visible row matched.
    async fn update_visible(&self, scope: VisibilityScope, task: &Task)
    -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// No visible task matched.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
