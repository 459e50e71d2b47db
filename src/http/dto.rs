//! Request and response bodies for the task routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::task::{
    domain::{Task, TaskDomainError, TaskPage},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

/// Body of `POST /api/tasks`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct CreateTaskBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
}

impl CreateTaskBody {
    pub(super) fn into_request(self) -> Result<CreateTaskRequest, TaskDomainError> {
        let title = self.title.ok_or(TaskDomainError::MissingTitle)?;
        let mut request = CreateTaskRequest::new(title).with_completed(self.completed);
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        Ok(request)
    }
}

/// Body of `PUT` and `PATCH /api/tasks/{id}`.
///
/// Every field distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`). Only `description` may be cleared with `null`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct UpdateTaskBody {
    #[serde(default, deserialize_with = "present")]
    title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub(super) description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    completed: Option<Option<bool>>,
}

impl UpdateTaskBody {
    /// Converts a `PUT` body, which must carry a title.
    pub(super) fn into_full_update(self) -> Result<UpdateTaskRequest, TaskDomainError> {
        if self.title.is_none() {
            return Err(TaskDomainError::MissingTitle);
        }
        self.into_partial_update()
    }

    /// Converts a `PATCH` body.
    pub(super) fn into_partial_update(self) -> Result<UpdateTaskRequest, TaskDomainError> {
        let mut request = UpdateTaskRequest::partial();
        if let Some(title) = self.title {
            request = request.with_title(title.ok_or(TaskDomainError::NullField("title"))?);
        }
        request = match self.description {
            Some(Some(description)) => request.with_description(description),
            Some(None) => request.without_description(),
            None => request,
        };
        if let Some(completed) = self.completed {
            request =
                request.with_completed(completed.ok_or(TaskDomainError::NullField("completed"))?);
        }
        Ok(request)
    }
}

/// Marks a key as present, keeping an explicit `null` as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string of `GET /api/tasks`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListQuery {
    pub(super) page: Option<String>,
    pub(super) page_size: Option<String>,
}

/// Task as returned to its owner. The deletion flag is never exposed.
#[derive(Debug, Serialize)]
pub(super) struct TaskResponse {
    id: Uuid,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// One page of a listing, numbered from one.
#[derive(Debug, Serialize)]
pub(super) struct TaskListResponse {
    count: u64,
    next: Option<u32>,
    previous: Option<u32>,
    results: Vec<TaskResponse>,
}

impl From<&TaskPage> for TaskListResponse {
    fn from(page: &TaskPage) -> Self {
        let number = page.request().page();
        Self {
            count: page.total(),
            next: page.has_next().then(|| number.saturating_add(1)),
            previous: page.has_previous().then(|| number.saturating_sub(1)),
            results: page.items().iter().map(TaskResponse::from).collect(),
        }
    }
}
