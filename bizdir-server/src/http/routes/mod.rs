//! Route handlers organized by resource

pub mod health;
pub mod resource;
pub mod businesses;
pub mod reviews;
pub mod photos;

use axum::http::Uri;

use super::error::ApiError;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "route",
        id: uri.path().to_owned(),
    }
}
