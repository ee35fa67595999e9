//! Path parameter extraction
//!
//! Routes like `/users/:id` only match integer ids. `EntityId` turns any
//! other path segment into a 404 instead of axum's default 400 rejection.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Integer primary key taken from the single `:id` path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;

        raw.parse::<i32>()
            .map(EntityId)
            .map_err(|_| AppError::NotFound(format!("No route for id '{}'", raw)))
    }
}
