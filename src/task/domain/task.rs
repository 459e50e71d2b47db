//! Task aggregate root and its soft-deletion lifecycle.

use super::{TaskDomainError, TaskId, TaskTitle};
use crate::identity::domain::UserId;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Sub-second digits kept on timestamps, matching `timestamptz`.
const TIMESTAMP_PRECISION: u16 = 6;

/// Task lifecycle state.
///
/// `Deleted` is terminal: no exposed operation leads back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// The task is live and visible to its owner.
    Active,
    /// The task has been soft-deleted; the record persists but is hidden.
    Deleted,
}

impl TaskState {
    /// Maps the persisted `is_deleted` flag onto a lifecycle state.
    #[must_use]
    pub const fn from_deleted_flag(is_deleted: bool) -> Self {
        if is_deleted {
            Self::Deleted
        } else {
            Self::Active
        }
    }

    /// Returns `true` for the terminal `Deleted` state.
    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Validated set of field changes for an update.
///
/// Absent fields are left untouched. `description` distinguishes "leave as
/// is" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description, where `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: TaskTitle,
    description: Option<String>,
    completed: bool,
    state: TaskState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active task owned by `owner`.
    #[must_use]
    pub fn new(
        owner: UserId,
        title: TaskTitle,
        description: Option<String>,
        completed: bool,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = now(clock);
        Self {
            id: TaskId::new(),
            owner,
            title,
            description,
            completed,
            state: TaskState::Active,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            completed: data.completed,
            state: data.state,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the task is marked completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns `true` once the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies validated field changes and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] when the task has already
    /// been soft-deleted.
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_active()?;

        let TaskChanges {
            title,
            description,
            completed,
        } = changes;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_completed) = completed {
            self.completed = new_completed;
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves the task into the terminal `Deleted` state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskDeleted`] when the task is already
    /// deleted.
    pub fn soft_delete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        self.state = TaskState::Deleted;
        self.touch(clock);
        Ok(())
    }

    const fn ensure_active(&self) -> Result<(), TaskDomainError> {
        if self.state.is_deleted() {
            return Err(TaskDomainError::TaskDeleted(self.id));
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = now(clock);
    }
}

fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(TIMESTAMP_PRECISION)
}
