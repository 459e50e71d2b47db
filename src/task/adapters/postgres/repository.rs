//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        PageRequest, PersistedTaskData, Task, TaskId, TaskPage, TaskState, TaskTitle,
        VisibilityScope,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::dsl;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema for the `tasks` table, applied by [`PostgresTaskRepository::ensure_schema`].
const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Rows of `tasks` inside a caller's visible set.
type VisibleTasks = dsl::Filter<
    dsl::Filter<tasks::table, dsl::Eq<tasks::owner_id, uuid::Uuid>>,
    dsl::Eq<tasks::is_deleted, bool>,
>;

/// The visibility predicate as a query fragment. Every read, count and
/// update starts here.
fn visible_tasks(scope: VisibilityScope) -> VisibleTasks {
    tasks::table
        .filter(tasks::owner_id.eq(scope.owner().into_inner()))
        .filter(tasks::is_deleted.eq(false))
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table and its indexes when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_visible(
        &self,
        scope: VisibilityScope,
        page: PageRequest,
    ) -> TaskRepositoryResult<TaskPage> {
        self.run_blocking(move |connection| {
            let limit = i64::from(page.page_size());
            let offset = i64::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;

            connection
                .transaction::<_, DieselError, _>(|tx| {
                    let total = visible_tasks(scope).count().get_result::<i64>(tx)?;
                    let rows = visible_tasks(scope)
                        .order((tasks::created_at.desc(), tasks::insertion_seq.desc()))
                        .limit(limit)
                        .offset(offset)
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(tx)?;
                    Ok((total, rows))
                })
                .map_err(TaskRepositoryError::persistence)
                .and_then(|(total, rows)| {
                    let items = rows
                        .into_iter()
                        .map(row_to_task)
                        .collect::<TaskRepositoryResult<Vec<_>>>()?;
                    let visible_total =
                        u64::try_from(total).map_err(TaskRepositoryError::persistence)?;
                    Ok(TaskPage::new(items, visible_total, page))
                })
        })
        .await
    }

    async fn find_visible(
        &self,
        scope: VisibilityScope,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = visible_tasks(scope)
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_visible(
        &self,
        scope: VisibilityScope,
        task: &Task,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let target = visible_tasks(scope).filter(tasks::id.eq(task_id.into_inner()));
            let affected = diesel::update(target)
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        completed: task.completed(),
        is_deleted: task.is_deleted(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        completed: task.completed(),
        is_deleted: task.is_deleted(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        title: persisted_title,
        description,
        completed,
        is_deleted,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner: UserId::from_uuid(owner_id),
        title,
        description,
        completed,
        state: TaskState::from_deleted_flag(is_deleted),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
