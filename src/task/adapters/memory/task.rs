//! In-memory repository for task access tests and local runs.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PageRequest, PersistedTaskData, Task, TaskId, TaskPage, VisibilityScope},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Soft-deleted rows are retained, as a relational store would retain them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_sequence: u64,
}

#[derive(Debug, Clone)]
struct StoredTask {
    insertion_seq: u64,
    task: Task,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a stored row regardless of owner or deletion state.
    ///
    /// This is an audit hook for operators and tests; it is not part of the
    /// [`TaskRepository`] port and no service operation reaches it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn audit_snapshot(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    /// Returns the number of stored rows, deleted ones included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn stored_count(&self) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.len())
    }
}

/// Applies the visibility scope and the listing order to the stored rows.
fn visible_in_order(state: &InMemoryTaskState, scope: VisibilityScope) -> Vec<&StoredTask> {
    let mut visible: Vec<&StoredTask> = state
        .tasks
        .values()
        .filter(|stored| scope.admits(&stored.task))
        .collect();
    visible.sort_by_key(|stored| {
        (
            Reverse(stored.task.created_at()),
            Reverse(stored.insertion_seq),
        )
    });
    visible
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let insertion_seq = state.next_sequence;
        state.next_sequence = insertion_seq.saturating_add(1);
        state.tasks.insert(
            task.id(),
            StoredTask {
                insertion_seq,
                task: task.clone(),
            },
        );
        Ok(())
    }

    async fn list_visible(
        &self,
        scope: VisibilityScope,
        page: PageRequest,
    ) -> TaskRepositoryResult<TaskPage> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let visible = visible_in_order(&state, scope);
        let total = u64::try_from(visible.len()).map_err(TaskRepositoryError::persistence)?;
        let offset = usize::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
        let limit = usize::try_from(page.page_size()).map_err(TaskRepositoryError::persistence)?;

        let items = visible
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| stored.task.clone())
            .collect();
        Ok(TaskPage::new(items, total, page))
    }

    async fn find_visible(
        &self,
        scope: VisibilityScope,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|stored| scope.admits(&stored.task))
            .map(|stored| stored.task.clone()))
    }

    async fn update_visible(
        &self,
        scope: VisibilityScope,
        task: &Task,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .filter(|stored| scope.admits(&stored.task))
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        // Only mutable columns are written; id, owner and created_at stay as
        // first stored.
        stored.task = Task::from_persisted(PersistedTaskData {
            id: stored.task.id(),
            owner: stored.task.owner(),
            title: task.title().clone(),
            description: task.description().map(str::to_owned),
            completed: task.completed(),
            state: task.state(),
            created_at: stored.task.created_at(),
            updated_at: task.updated_at(),
        });
        Ok(())
    }
}
