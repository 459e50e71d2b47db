//! Soft deletion is terminal and invisible, and the row is retained.

use rstest::rstest;
use taskvault::identity::domain::UserId;
use taskvault::task::services::{TaskAccessError, UpdateTaskRequest};

use super::helpers::{AccessContext, context};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_rejects_every_later_operation(
    context: AccessContext,
) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let task = context.create(owner, "Buy milk").await?;

    context
        .service
        .delete(owner, task.id())
        .await
        .map_err(|err| eyre::eyre!("first delete: {err}"))?;

    let retrieve = context.service.retrieve(owner, task.id()).await;
    let update = context
        .service
        .update(owner, task.id(), UpdateTaskRequest::replacing("Revived"))
        .await;
    let delete = context.service.delete(owner, task.id()).await;

    eyre::ensure!(
        matches!(retrieve, Err(TaskAccessError::NotFound(_))),
        "retrieve after delete returned {retrieve:?}"
    );
    eyre::ensure!(
        matches!(update, Err(TaskAccessError::NotFound(_))),
        "update after delete returned {update:?}"
    );
    eyre::ensure!(
        matches!(delete, Err(TaskAccessError::NotFound(_))),
        "second delete returned {delete:?}"
    );

    let stored = context.stored(&task)?;
    eyre::ensure!(stored.is_deleted(), "stored row lost its deletion flag");
    eyre::ensure!(
        stored.title().as_str() == "Buy milk",
        "update after delete changed the stored title"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_deletes_succeed_exactly_once(
    context: AccessContext,
) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let task = context.create(owner, "Contended").await?;

    let (first, second) = tokio::join!(
        context.service.delete(owner, task.id()),
        context.service.delete(owner, task.id()),
    );

    let successes = [first.is_ok(), second.is_ok()]
        .into_iter()
        .filter(|ok| *ok)
        .count();
    eyre::ensure!(successes == 1, "{successes} deletes succeeded");
    for outcome in [first, second] {
        eyre::ensure!(
            matches!(outcome, Ok(()) | Err(TaskAccessError::NotFound(_))),
            "unexpected delete outcome {outcome:?}"
        );
    }
    eyre::ensure!(context.stored(&task)?.is_deleted(), "row not deleted");
    Ok(())
}
