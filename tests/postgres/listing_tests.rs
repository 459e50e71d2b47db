//! Ordering, counting and paging of the visible set in SQL.

use chrono::{DateTime, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use taskvault::identity::domain::UserId;
use taskvault::task::{
    domain::{PageRequest, TaskId},
    services::CreateTaskRequest,
};

use super::helpers::{BoxError, FixedClock, PostgresContext, postgres_context};

#[rstest]
fn listing_is_newest_first_and_excludes_deleted(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let owner = UserId::new();
    let mut ids: Vec<TaskId> = Vec::new();
    for title in ["T1", "T2", "T3", "T4"] {
        let created =
            context.block_on(context.service.create(owner, CreateTaskRequest::new(title)))?;
        ids.push(created.id());
    }
    let removed = ids.remove(1);
    context.block_on(context.service.delete(owner, removed))?;
    ids.reverse();

    let page = context.block_on(context.service.list(owner, PageRequest::first(10)))?;
    let listed: Vec<TaskId> = page.items().iter().map(|task| task.id()).collect();

    assert_eq!(listed, ids);
    assert_eq!(page.total(), 3);
    Ok(())
}

#[rstest]
fn equal_timestamps_list_in_reverse_insertion_order(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let context =
        PostgresContext::open(shared_test_cluster, FixedClock(DateTime::<Utc>::UNIX_EPOCH))?;
    let owner = UserId::new();
    let mut ids: Vec<TaskId> = Vec::new();
    for title in ["T1", "T2", "T3", "T4", "T5"] {
        let created =
            context.block_on(context.service.create(owner, CreateTaskRequest::new(title)))?;
        ids.push(created.id());
    }
    ids.reverse();

    let page = context.block_on(context.service.list(owner, PageRequest::first(10)))?;
    let listed: Vec<TaskId> = page.items().iter().map(|task| task.id()).collect();

    assert!(
        page.items()
            .iter()
            .all(|task| task.created_at() == DateTime::<Utc>::UNIX_EPOCH)
    );
    assert_eq!(listed, ids);
    Ok(())
}

#[rstest]
fn paging_uses_limit_and_offset(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = postgres_context?;
    let owner = UserId::new();
    for index in 0..5 {
        context.block_on(
            context
                .service
                .create(owner, CreateTaskRequest::new(format!("Task {index}"))),
        )?;
    }

    let second = context.block_on(context.service.list(owner, PageRequest::new(2, 2)?))?;
    let beyond = context.block_on(context.service.list(owner, PageRequest::new(4, 2)?))?;

    assert_eq!(second.items().len(), 2);
    assert!(second.has_next());
    assert!(second.has_previous());
    assert!(beyond.items().is_empty());
    assert_eq!(beyond.total(), 5);
    Ok(())
}
