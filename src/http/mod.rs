//! JSON-over-HTTP surface for task access.
//!
//! Routes:
//!
//! - `GET /healthz`
//! - `GET /api/tasks`, `POST /api/tasks`
//! - `GET`, `PUT`, `PATCH`, `DELETE /api/tasks/{id}`
//!
//! Every task route authenticates the caller with a bearer token before the
//! handler runs.

mod auth;
mod dto;
mod error;
mod handlers;

use std::sync::Arc;

use axum::{Router, routing::get};
use mockable::Clock;

use crate::identity::ports::IdentityProvider;
use crate::task::{ports::TaskRepository, services::TaskAccessService};

pub use auth::AuthenticatedCaller;
pub use error::ApiError;

/// Page size used when neither the request nor the configuration names one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Shared dependencies of the HTTP handlers.
pub struct AppState<R, C, I>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    I: IdentityProvider,
{
    tasks: Arc<TaskAccessService<R, C>>,
    identity: Arc<I>,
    default_page_size: u32,
}

impl<R, C, I> AppState<R, C, I>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    I: IdentityProvider,
{
    /// Creates handler state from a task service and an identity provider.
    #[must_use]
    pub fn new(tasks: TaskAccessService<R, C>, identity: Arc<I>) -> Self {
        Self {
            tasks: Arc::new(tasks),
            identity,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size used when a listing request names none.
    #[must_use]
    pub const fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }
}

impl<R, C, I> Clone for AppState<R, C, I>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    I: IdentityProvider,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            identity: Arc::clone(&self.identity),
            default_page_size: self.default_page_size,
        }
    }
}

/// Builds the application router.
#[must_use]
pub fn router<R, C, I>(state: AppState<R, C, I>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/api/tasks",
            get(handlers::list_tasks::<R, C, I>).post(handlers::create_task::<R, C, I>),
        )
        .route(
            "/api/tasks/{id}",
            get(handlers::retrieve_task::<R, C, I>)
                .put(handlers::replace_task::<R, C, I>)
                .patch(handlers::patch_task::<R, C, I>)
                .delete(handlers::delete_task::<R, C, I>),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
