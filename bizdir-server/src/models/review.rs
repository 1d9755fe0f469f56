//! Review rows and schema

use bizdir_core::Schema;
use once_cell::sync::Lazy;
use serde::Serialize;
use sqlx::FromRow;

use super::Resource;

/// Required and optional fields of a review
pub static REVIEW_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .required("userid")
        .required("businessid")
        .required("dollars")
        .required("stars")
        .optional("review")
});

/// Review record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: i32,
    pub userid: i32,
    pub businessid: i32,
    pub dollars: i32,
    pub stars: i32,
    pub review: Option<String>,
}

impl Resource for Review {
    const NAME: &'static str = "review";
    const TABLE: &'static str = "reviews";

    fn schema() -> &'static Schema {
        &REVIEW_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;
    use serde_json::json;

    #[test]
    fn review_text_is_optional() {
        let body = json!({ "userid": 3, "businessid": 1, "dollars": 2, "stars": 4 });
        assert!(Review::check(&body).is_ok());
    }

    #[test]
    fn stars_are_required() {
        let body = json!({ "userid": 3, "businessid": 1, "dollars": 2, "review": "ok" });
        let err = Review::check(&body).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields {
                resource: "review",
                fields: vec!["stars".into()],
            }
        );
    }
}
