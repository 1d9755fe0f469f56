//! Business endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::ResourceRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ResourceId;
use crate::http::server::AppState;
use crate::models::{Business, PageMeta, PageRequest, PaginationParams, Photo, Review};
use super::resource;

/// One page of businesses
#[derive(Serialize)]
pub struct BusinessPage {
    pub businesses: Vec<Business>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// A business with everything posted about it
#[derive(Serialize)]
pub struct BusinessDetail {
    #[serde(flatten)]
    pub business: Business,
    pub reviews: Vec<Review>,
    pub photos: Vec<Photo>,
}

/// GET /businesses - list businesses, 10 per page
async fn list_businesses(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<BusinessPage>, ApiError> {
    let page = ResourceRepo::<Business>::new(&state.pool)
        .page(requested_page(query))
        .await?;

    Ok(Json(BusinessPage {
        businesses: page.items,
        meta: page.meta,
    }))
}

/// Page asked for by the query string.
///
/// A query string that does not deserialize (e.g. `page` given twice)
/// falls back to the first page instead of rejecting the request.
fn requested_page(query: Result<Query<PaginationParams>, QueryRejection>) -> PageRequest {
    match query {
        Ok(Query(params)) => params.into(),
        Err(rejection) => {
            tracing::debug!(%rejection, "Ignoring malformed page query");
            PageRequest::default()
        }
    }
}

/// GET /businesses/{id} - get a business with its reviews and photos
async fn get_business(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<BusinessDetail>, ApiError> {
    let businesses = ResourceRepo::<Business>::new(&state.pool);
    let review_repo = ResourceRepo::<Review>::new(&state.pool);
    let photo_repo = ResourceRepo::<Photo>::new(&state.pool);

    let (business, reviews, photos) = tokio::try_join!(
        businesses.get(id),
        review_repo.for_business(id),
        photo_repo.for_business(id),
    )?;

    Ok(Json(BusinessDetail {
        business,
        reviews,
        photos,
    }))
}

/// Business routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/businesses",
            get(list_businesses).post(resource::create::<Business>),
        )
        .route(
            "/businesses/{id}",
            get(get_business)
                .put(resource::replace::<Business>)
                .delete(resource::remove::<Business>),
        )
}
