//! Then steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskvault::task::{
    domain::{PageRequest, Task, TaskDomainError},
    services::TaskAccessError,
};

fn outcome(world: &TaskAccessWorld) -> Result<&Result<(), TaskAccessError>, eyre::Report> {
    world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation outcome"))
}

fn stored_task(world: &TaskAccessWorld) -> Result<Task, eyre::Report> {
    let id = world.task()?.id();
    world
        .repository
        .audit_snapshot(id)
        .wrap_err("read stored task")?
        .ok_or_else(|| eyre::eyre!("task {id} is missing from storage"))
}

#[then("the operation succeeds")]
fn operation_succeeds(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let result = outcome(world)?;
    eyre::ensure!(result.is_ok(), "expected success, got {result:?}");
    Ok(())
}

#[then("the operation fails with not found")]
fn operation_fails_not_found(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let result = outcome(world)?;
    eyre::ensure!(
        matches!(result, Err(TaskAccessError::NotFound(_))),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[then("the operation fails with a title validation error")]
fn operation_fails_title_validation(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let result = outcome(world)?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskAccessError::Validation(TaskDomainError::EmptyTitle))
        ),
        "expected EmptyTitle validation error, got {result:?}"
    );
    Ok(())
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &TaskAccessWorld, title: String) -> Result<(), eyre::Report> {
    let actual = world.task()?.title().as_str();
    eyre::ensure!(actual == title, "expected title {title:?}, found {actual:?}");
    Ok(())
}

#[then(r#"the task description is "{description}""#)]
fn task_description_is(world: &TaskAccessWorld, description: String) -> Result<(), eyre::Report> {
    let actual = world.task()?.description();
    eyre::ensure!(
        actual == Some(description.as_str()),
        "expected description {description:?}, found {actual:?}"
    );
    Ok(())
}

#[then("the task is completed")]
fn task_is_completed(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.task()?.completed(), "expected task to be completed");
    Ok(())
}

#[then(r#""{name}" cannot retrieve the task"#)]
fn cannot_retrieve(world: &TaskAccessWorld, name: String) -> Result<(), eyre::Report> {
    let caller = world.user(&name)?;
    let id = world.task()?.id();
    let result = run_async(world.service.retrieve(caller, id));
    eyre::ensure!(
        matches!(result, Err(TaskAccessError::NotFound(_))),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[then(r#""{name}" does not see the task in the listing"#)]
fn not_in_listing(world: &TaskAccessWorld, name: String) -> Result<(), eyre::Report> {
    let caller = world.user(&name)?;
    let id = world.task()?.id();
    let page = run_async(world.service.list(caller, PageRequest::first(100)))
        .wrap_err("list tasks in scenario")?;
    eyre::ensure!(
        page.items().iter().all(|task| task.id() != id),
        "deleted task {id} is still listed"
    );
    Ok(())
}

#[then("the stored task is marked deleted")]
fn stored_task_is_deleted(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        stored_task(world)?.is_deleted(),
        "expected stored row to keep its deletion flag"
    );
    Ok(())
}

#[then(r#"the stored task title is "{title}""#)]
fn stored_title_is(world: &TaskAccessWorld, title: String) -> Result<(), eyre::Report> {
    let stored = stored_task(world)?;
    eyre::ensure!(
        stored.title().as_str() == title,
        "expected stored title {title:?}, found {:?}",
        stored.title().as_str()
    );
    Ok(())
}

#[then(r#"the listed titles are "{titles}""#)]
fn listed_titles_are(world: &TaskAccessWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();
    let actual: Vec<&str> = world
        .listed
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    eyre::ensure!(actual == expected, "expected {expected:?}, listed {actual:?}");
    Ok(())
}
