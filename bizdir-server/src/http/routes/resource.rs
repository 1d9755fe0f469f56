//! Handlers shared by every resource
//!
//! Create and replace validate the body first; the repository extracts
//! the schema fields before writing.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::db::ResourceRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::{Resource, ValidationError};

/// Response to a successful create or replace
#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub id: i32,
    pub links: BTreeMap<&'static str, String>,
}

impl WriteResponse {
    pub fn new<R: Resource>(id: i32) -> Self {
        Self {
            id,
            links: BTreeMap::from([(R::NAME, R::path(id))]),
        }
    }
}

/// Gate a body against the resource schema, logging rejections.
pub(crate) fn check<R: Resource>(body: &serde_json::Value) -> Result<(), ValidationError> {
    R::check(body).inspect_err(|err| {
        tracing::debug!(resource = R::NAME, %err, "Rejected request body");
    })
}

/// POST /{collection} - create a row
pub async fn create<R: Resource>(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<WriteResponse>), ApiError> {
    check::<R>(&body)?;
    let id = ResourceRepo::<R>::new(&state.pool).insert(&body).await?;

    Ok((StatusCode::CREATED, Json(WriteResponse::new::<R>(id))))
}

/// GET /{collection}/{id} - get a single row
pub async fn fetch<R: Resource>(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<R>, ApiError> {
    let row = ResourceRepo::<R>::new(&state.pool).get(id).await?;
    Ok(Json(row))
}

/// PUT /{collection}/{id} - replace a row
pub async fn replace<R: Resource>(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
    JsonBody(body): JsonBody,
) -> Result<Json<WriteResponse>, ApiError> {
    check::<R>(&body)?;
    ResourceRepo::<R>::new(&state.pool).update(id, &body).await?;

    Ok(Json(WriteResponse::new::<R>(id)))
}

/// DELETE /{collection}/{id} - delete a row
pub async fn remove<R: Resource>(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    ResourceRepo::<R>::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
