//! Review endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};

use crate::db::ResourceRepo;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::Review;
use super::resource::{self, WriteResponse};

/// POST /reviews - create a review, one per user per business
async fn create_review(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<WriteResponse>), ApiError> {
    resource::check::<Review>(&body)?;

    let id = ResourceRepo::<Review>::new(&state.pool)
        .insert_first_review(&body)
        .await?
        .ok_or_else(|| ApiError::Forbidden {
            reason: "User has already posted a review of this business".into(),
        })?;

    Ok((StatusCode::CREATED, Json(WriteResponse::new::<Review>(id))))
}

/// Review routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews", post(create_review))
        .route(
            "/reviews/{id}",
            get(resource::fetch::<Review>)
                .put(resource::replace::<Review>)
                .delete(resource::remove::<Review>),
        )
}
