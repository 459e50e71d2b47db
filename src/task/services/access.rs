//! Service layer for the create, list, retrieve, update and delete
//! operations over a caller's visible task set.

use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        PageRequest, Task, TaskChanges, TaskDomainError, TaskId, TaskPage, TaskTitle,
        VisibilityScope,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default upper bound applied to requested page sizes.
const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    completed: bool,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Request payload for updating a task.
///
/// Only supplied fields are applied. A full update is a partial update that
/// carries a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Creates an empty partial update.
    #[must_use]
    pub fn partial() -> Self {
        Self::default()
    }

    /// Creates a full update with the mandatory title.
    #[must_use]
    pub fn replacing(title: impl Into<String>) -> Self {
        Self::partial().with_title(title)
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Sets the replacement completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        let title = self.title.map(TaskTitle::new).transpose()?;
        Ok(TaskChanges {
            title,
            description: self.description,
            completed: self.completed,
        })
    }
}

/// Service-level errors for task access operations.
#[derive(Debug, Error)]
pub enum TaskAccessError {
    /// Caller input failed validation; nothing was written.
    #[error(transparent)]
    Validation(TaskDomainError),

    /// The task is not in the caller's visible set.
    ///
    /// Raised alike for unknown ids, tasks of other owners and deleted
    /// tasks, so callers cannot tell them apart.
    #[error("task not found")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskDomainError> for TaskAccessError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::TaskDeleted(id) => Self::NotFound(id),
            other => Self::Validation(other),
        }
    }
}

impl From<TaskRepositoryError> for TaskAccessError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task access service operations.
pub type TaskAccessResult<T> = Result<T, TaskAccessError>;

/// Ownership-scoped task access service.
///
/// Every operation takes the authenticated caller explicitly; there is no
/// ambient current user.
#[derive(Clone)]
pub struct TaskAccessService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    max_page_size: u32,
}

impl<R, C> TaskAccessService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task access service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Sets the largest page size [`TaskAccessService::list`] will serve.
    #[must_use]
    pub const fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Creates a task owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Validation`] when the title is blank or too
    /// long, or [`TaskAccessError::Repository`] when persistence fails.
    #[tracing::instrument(level = "debug", skip_all, fields(caller = %caller))]
    pub async fn create(
        &self,
        caller: UserId,
        request: CreateTaskRequest,
    ) -> TaskAccessResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            completed,
        } = request;
        let validated_title = TaskTitle::new(title)?;

        let task = Task::new(caller, validated_title, description, completed, &*self.clock);
        self.repository.insert(&task).await?;
        tracing::info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Lists one page of the caller's visible tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Repository`] when persistence lookup
    /// fails.
    #[tracing::instrument(level = "debug", skip_all, fields(caller = %caller, page = page.page()))]
    pub async fn list(&self, caller: UserId, page: PageRequest) -> TaskAccessResult<TaskPage> {
        let scope = VisibilityScope::for_caller(caller);
        let bounded = page.clamped(self.max_page_size);
        Ok(self.repository.list_visible(scope, bounded).await?)
    }

    /// Retrieves a task from the caller's visible set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`] when the task is not visible to
    /// the caller, or [`TaskAccessError::Repository`] when lookup fails.
    #[tracing::instrument(level = "debug", skip_all, fields(caller = %caller, task_id = %id))]
    pub async fn retrieve(&self, caller: UserId, id: TaskId) -> TaskAccessResult<Task> {
        self.resolve_visible(VisibilityScope::for_caller(caller), id).await
    }

    /// Applies the supplied fields to a visible task.
    ///
    /// Input is validated before storage is touched, so an invalid request
    /// fails the same way whatever `id` names.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Validation`] for an invalid title,
    /// [`TaskAccessError::NotFound`] when the task is not visible to the
    /// caller, or [`TaskAccessError::Repository`] when persistence fails.
    #[tracing::instrument(level = "debug", skip_all, fields(caller = %caller, task_id = %id))]
    pub async fn update(
        &self,
        caller: UserId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskAccessResult<Task> {
        let changes = request.into_changes()?;
        let scope = VisibilityScope::for_caller(caller);

        let mut task = self.resolve_visible(scope, id).await?;
        task.apply(changes, &*self.clock)?;
        self.repository.update_visible(scope, &task).await?;
        Ok(task)
    }

    /// Soft-deletes a visible task.
    ///
    /// The row is kept in storage with its deletion flag set and leaves the
    /// caller's visible set for good. Deleting an already deleted task is
    /// indistinguishable from deleting an unknown one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`] when the task is not visible to
    /// the caller, or [`TaskAccessError::Repository`] when persistence fails.
    #[tracing::instrument(level = "debug", skip_all, fields(caller = %caller, task_id = %id))]
    pub async fn delete(&self, caller: UserId, id: TaskId) -> TaskAccessResult<()> {
        let scope = VisibilityScope::for_caller(caller);

        let mut task = self.resolve_visible(scope, id).await?;
        task.soft_delete(&*self.clock)?;
        self.repository.update_visible(scope, &task).await?;
        tracing::info!(task_id = %id, "task soft-deleted");
        Ok(())
    }

    /// Finds `id` inside `scope` or fails with not-found.
    ///
    /// This is the only lookup path for retrieve, update and delete.
    async fn resolve_visible(&self, scope: VisibilityScope, id: TaskId) -> TaskAccessResult<Task> {
        self.repository
            .find_visible(scope, id)
            .await?
            .ok_or(TaskAccessError::NotFound(id))
    }
}
