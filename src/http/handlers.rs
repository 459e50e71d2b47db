//! Route handlers for the task API.
//!
//! Handlers translate HTTP into service calls and back. They never touch a
//! repository directly, so every path goes through the caller's visibility
//! scope.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;
use uuid::Uuid;

use super::{
    AppState, AuthenticatedCaller,
    dto::{CreateTaskBody, ListQuery, TaskListResponse, TaskResponse, UpdateTaskBody},
    error::ApiError,
};
use crate::identity::{domain::UserId, ports::IdentityProvider};
use crate::task::{
    domain::{PageRequest, TaskDomainError, TaskId},
    ports::TaskRepository,
    services::UpdateTaskRequest,
};

type ApiResult<T> = Result<T, ApiError>;

pub(super) async fn healthz() -> &'static str {
    "ok"
}

pub(super) async fn list_tasks<R, C, I>(
    State(state): State<AppState<R, C, I>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<TaskListResponse>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    let Query(params) =
        query.map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;
    let request = page_request(&params, state.default_page_size)?;
    let page = state.tasks.list(caller, request).await?;
    if page.items().is_empty() && page.has_previous() {
        return Err(ApiError::InvalidPage);
    }
    Ok(Json(TaskListResponse::from(&page)))
}

pub(super) async fn create_task<R, C, I>(
    State(state): State<AppState<R, C, I>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    let Json(payload) = body.map_err(malformed)?;
    let task = state.tasks.create(caller, payload.into_request()?).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

pub(super) async fn retrieve_task<R, C, I>(
    State(state): State<AppState<R, C, I>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    let task = state.tasks.retrieve(caller, parse_task_id(&raw_id)?).await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(super) async fn replace_task<R, C, I>(
    State(state): State<AppState<R, C, I>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    let Json(payload) = body.map_err(malformed)?;
    let request = payload.into_full_update()?;
    apply_update(&state, caller, &raw_id, request).await
}

pub(super) async fn patch_task<R, C, I>(
    State(state): State<AppState<R, C, I>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    let Json(payload) = body.map_err(malformed)?;
    let request = payload.into_partial_update()?;
    apply_update(&state, caller, &raw_id, request).await
}

pub(super) async fn delete_task<R, C, I>(
    State(state): State<AppState<R, C, I>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    state.tasks.delete(caller, parse_task_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update<R, C, I>(
    state: &AppState<R, C, I>,
    caller: UserId,
    raw_id: &str,
    request: UpdateTaskRequest,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    let id = parse_task_id(raw_id)?;
    let task = state.tasks.update(caller, id, request).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// A path segment that is not a UUID cannot name a visible task.
fn parse_task_id(raw: &str) -> ApiResult<TaskId> {
    Uuid::parse_str(raw)
        .map(TaskId::from_uuid)
        .map_err(|_| ApiError::NotFound)
}

/// Builds the page request from the query string.
///
/// An unparsable or zero page number is an invalid page; an unparsable page
/// size falls back to the default.
fn page_request(query: &ListQuery, default_page_size: u32) -> ApiResult<PageRequest> {
    let page = match query.page.as_deref() {
        None => 1,
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|number| *number > 0)
            .ok_or(ApiError::InvalidPage)?,
    };
    let page_size = query
        .page_size
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(default_page_size);
    PageRequest::new(page, page_size).map_err(|err| match err {
        TaskDomainError::InvalidPageNumber => ApiError::InvalidPage,
        other => ApiError::Validation(other),
    })
}

fn malformed(rejection: JsonRejection) -> ApiError {
    ApiError::MalformedRequest(rejection.body_text())
}
