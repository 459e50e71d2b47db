//! Ownership isolation: no caller can observe or change another caller's
//! tasks.

use rstest::rstest;
use taskvault::identity::domain::UserId;
use taskvault::task::{
    domain::PageRequest,
    services::{TaskAccessError, UpdateTaskRequest},
};

use super::helpers::{AccessContext, context};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_operation_on_a_foreign_task_is_not_found(
    context: AccessContext,
) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let intruder = UserId::new();
    let task = context.create(owner, "Owner only").await?;

    let retrieve = context.service.retrieve(intruder, task.id()).await;
    let full = context
        .service
        .update(intruder, task.id(), UpdateTaskRequest::replacing("Taken"))
        .await;
    let partial = context
        .service
        .update(
            intruder,
            task.id(),
            UpdateTaskRequest::partial().without_description(),
        )
        .await;
    let delete = context.service.delete(intruder, task.id()).await;

    for (operation, outcome) in [
        ("retrieve", retrieve.map(|_| ())),
        ("full update", full.map(|_| ())),
        ("partial update", partial.map(|_| ())),
        ("delete", delete),
    ] {
        eyre::ensure!(
            matches!(outcome, Err(TaskAccessError::NotFound(id)) if id == task.id()),
            "{operation} by a foreign caller returned {outcome:?}"
        );
    }
    eyre::ensure!(context.stored(&task)? == task, "foreign caller changed the task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_never_mix_owners(context: AccessContext) -> Result<(), eyre::Report> {
    let alice = UserId::new();
    let bob = UserId::new();
    context.create(alice, "Alice 1").await?;
    context.create(bob, "Bob 1").await?;
    context.create(alice, "Alice 2").await?;

    let alice_page = context
        .service
        .list(alice, PageRequest::first(10))
        .await
        .map_err(|err| eyre::eyre!("list for alice: {err}"))?;
    let bob_page = context
        .service
        .list(bob, PageRequest::first(10))
        .await
        .map_err(|err| eyre::eyre!("list for bob: {err}"))?;

    eyre::ensure!(alice_page.total() == 2, "alice sees {}", alice_page.total());
    eyre::ensure!(bob_page.total() == 1, "bob sees {}", bob_page.total());
    eyre::ensure!(
        alice_page.items().iter().all(|task| task.owner() == alice),
        "alice's listing contains a foreign task"
    );
    Ok(())
}
