//! Photo endpoints

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};

use crate::http::server::AppState;
use crate::models::Photo;
use super::resource;

/// Photo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/photos", post(resource::create::<Photo>))
        .route(
            "/photos/{id}",
            get(resource::fetch::<Photo>)
                .put(resource::replace::<Photo>)
                .delete(resource::remove::<Photo>),
        )
}
