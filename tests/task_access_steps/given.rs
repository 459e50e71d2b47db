//! Given steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskvault::identity::domain::UserId;
use taskvault::task::services::CreateTaskRequest;

#[given(r#"a signed-in user "{name}""#)]
fn signed_in_user(world: &mut TaskAccessWorld, name: String) {
    world.users.insert(name, UserId::new());
}

#[given(r#"signed-in users "{first}" and "{second}""#)]
fn signed_in_users(world: &mut TaskAccessWorld, first: String, second: String) {
    world.users.insert(first, UserId::new());
    world.users.insert(second, UserId::new());
}

#[given(r#""{name}" has created a task titled "{title}""#)]
fn has_created_task(
    world: &mut TaskAccessWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let owner = world.user(&name)?;
    let created = run_async(world.service.create(owner, CreateTaskRequest::new(title)))
        .wrap_err("create task in scenario setup")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#""{name}" has created a described task "{title}" with description "{description}""#)]
fn has_created_described_task(
    world: &mut TaskAccessWorld,
    name: String,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let owner = world.user(&name)?;
    let request = CreateTaskRequest::new(title).with_description(description);
    let created = run_async(world.service.create(owner, request))
        .wrap_err("create described task in scenario setup")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#""{name}" has created tasks "{titles}" in order"#)]
fn has_created_tasks_in_order(
    world: &mut TaskAccessWorld,
    name: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let owner = world.user(&name)?;
    for title in titles.split(',').map(str::trim) {
        let created = run_async(world.service.create(owner, CreateTaskRequest::new(title)))
            .wrap_err_with(|| format!("create task {title} in scenario setup"))?;
        world.current_task = Some(created);
    }
    Ok(())
}
