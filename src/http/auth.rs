//! Bearer authentication for task routes.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use mockable::Clock;

use super::{AppState, error::ApiError};
use crate::identity::{
    domain::{AccessToken, UserId},
    ports::IdentityProvider,
};
use crate::task::ports::TaskRepository;

/// The authenticated caller of a request.
///
/// Extraction fails with 401 before the handler body runs, so no task
/// operation ever executes without a resolved [`UserId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCaller(pub UserId);

impl<R, C, I> FromRequestParts<AppState<R, C, I>> for AuthenticatedCaller
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
    I: IdentityProvider + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R, C, I>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(ApiError::Unauthorized(
                "authentication credentials were not provided",
            ))?;
        let token = header_value
            .to_str()
            .ok()
            .and_then(|raw| AccessToken::from_authorization_header(raw).ok())
            .ok_or(ApiError::Unauthorized("malformed authorization header"))?;

        let caller = state.identity.authenticate(&token).await.map_err(|err| {
            tracing::warn!("rejected bearer credential");
            ApiError::from(err)
        })?;
        Ok(Self(caller))
    }
}
