//! Visibility, compare-and-set updates and soft deletion against
//! `PostgreSQL`.

use mockable::DefaultClock;
use rstest::rstest;
use taskvault::identity::domain::UserId;
use taskvault::task::{
    domain::{Task, TaskChanges, TaskTitle, VisibilityScope},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskAccessError, UpdateTaskRequest},
};

use super::helpers::{BoxError, PostgresContext, postgres_context};

#[rstest]
fn create_round_trips_through_storage(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let owner = UserId::new();

    let created = context.block_on(context.service.create(
        owner,
        CreateTaskRequest::new("  Persisted  ").with_description("stored in SQL"),
    ))?;
    let fetched = context.block_on(context.service.retrieve(owner, created.id()))?;

    assert_eq!(fetched, created);
    assert_eq!(fetched.owner(), owner);
    assert_eq!(fetched.title().as_str(), "Persisted");
    assert_eq!(fetched.description(), Some("stored in SQL"));
    assert!(!fetched.completed());
    assert!(!fetched.is_deleted());
    Ok(())
}

#[rstest]
fn update_round_trips_through_storage(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let owner = UserId::new();
    let created = context.block_on(
        context
            .service
            .create(owner, CreateTaskRequest::new("Draft").with_description("old")),
    )?;

    let updated = context.block_on(context.service.update(
        owner,
        created.id(),
        UpdateTaskRequest::partial()
            .with_completed(true)
            .without_description(),
    ))?;
    let fetched = context.block_on(context.service.retrieve(owner, created.id()))?;

    assert_eq!(fetched, updated);
    assert_eq!(fetched.created_at(), created.created_at());
    assert_eq!(fetched.description(), None);
    assert!(fetched.completed());
    Ok(())
}

#[rstest]
fn foreign_caller_gets_not_found(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let owner = UserId::new();
    let intruder = UserId::new();
    let created =
        context.block_on(context.service.create(owner, CreateTaskRequest::new("Private")))?;

    let retrieve = context.block_on(context.service.retrieve(intruder, created.id()));
    let update = context.block_on(context.service.update(
        intruder,
        created.id(),
        UpdateTaskRequest::partial().with_completed(true),
    ));
    let delete = context.block_on(context.service.delete(intruder, created.id()));

    assert!(matches!(retrieve, Err(TaskAccessError::NotFound(_))));
    assert!(matches!(update, Err(TaskAccessError::NotFound(_))));
    assert!(matches!(delete, Err(TaskAccessError::NotFound(_))));
    let (is_deleted, title) = context.stored_flags(created.id())?;
    assert!(!is_deleted);
    assert_eq!(title, "Private");
    Ok(())
}

#[rstest]
fn soft_delete_keeps_the_row(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let owner = UserId::new();
    let created = context.block_on(context.service.create(owner, CreateTaskRequest::new("Soft")))?;

    context.block_on(context.service.delete(owner, created.id()))?;
    let retrieve = context.block_on(context.service.retrieve(owner, created.id()));
    let second = context.block_on(context.service.delete(owner, created.id()));

    assert!(matches!(retrieve, Err(TaskAccessError::NotFound(_))));
    assert!(matches!(second, Err(TaskAccessError::NotFound(_))));
    let (is_deleted, _) = context.stored_flags(created.id())?;
    assert!(is_deleted);
    Ok(())
}

#[rstest]
fn stale_write_cannot_resurrect_a_deleted_row(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let owner = UserId::new();
    let scope = VisibilityScope::for_caller(owner);
    let mut task = Task::new(owner, TaskTitle::new("Racy")?, None, false, &DefaultClock);
    context.block_on(context.repository.insert(&task))?;

    let mut stale = task.clone();
    task.soft_delete(&DefaultClock)?;
    context.block_on(context.repository.update_visible(scope, &task))?;
    stale.apply(
        TaskChanges {
            completed: Some(true),
            ..Default::default()
        },
        &DefaultClock,
    )?;
    let result = context.block_on(context.repository.update_visible(scope, &stale));

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
    let (is_deleted, _) = context.stored_flags(task.id())?;
    assert!(is_deleted);
    Ok(())
}

#[rstest]
fn duplicate_insert_is_reported(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let task = Task::new(
        UserId::new(),
        TaskTitle::new("Once")?,
        None,
        false,
        &DefaultClock,
    );
    context.block_on(context.repository.insert(&task))?;

    let result = context.block_on(context.repository.insert(&task));

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
    Ok(())
}
