//! Queries specific to reviews and photos, which belong to a business

use serde_json::Value;

use crate::models::{Photo, Review};
use super::{DbError, ResourceRepo};

/// Columns of the one-review-per-user-per-business constraint
const REVIEW_OWNER_COLUMNS: &[&str] = &["userid", "businessid"];

impl ResourceRepo<'_, Review> {
    /// Insert a review unless the user already reviewed this business.
    ///
    /// Relies on the UNIQUE (userid, businessid) constraint, so two racing
    /// requests cannot both succeed. Returns `None` for a duplicate.
    pub async fn insert_first_review(&self, candidate: &Value) -> Result<Option<i32>, DbError> {
        let id = self
            .insert_unless_exists(candidate, REVIEW_OWNER_COLUMNS)
            .await?;

        if id.is_none() {
            tracing::debug!(
                userid = %candidate["userid"],
                businessid = %candidate["businessid"],
                "Duplicate review skipped"
            );
        }
        Ok(id)
    }

    /// Reviews of one business, oldest first.
    pub async fn for_business(&self, business_id: i32) -> Result<Vec<Review>, DbError> {
        self.list_by("businessid", business_id).await
    }
}

impl ResourceRepo<'_, Photo> {
    /// Photos of one business, oldest first.
    pub async fn for_business(&self, business_id: i32) -> Result<Vec<Photo>, DbError> {
        self.list_by("businessid", business_id).await
    }
}
