//! Business rows and schema

use bizdir_core::Schema;
use once_cell::sync::Lazy;
use serde::Serialize;
use sqlx::FromRow;

use super::Resource;

/// Required and optional fields of a business
pub static BUSINESS_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .required("ownerid")
        .required("name")
        .required("address")
        .required("city")
        .required("state")
        .required("zip")
        .required("phone")
        .required("category")
        .required("subcategory")
        .optional("website")
        .optional("email")
});

/// Business record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Business {
    pub id: i32,
    pub ownerid: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub category: String,
    pub subcategory: String,
    pub website: Option<String>,
    pub email: Option<String>,
}

impl Resource for Business {
    const NAME: &'static str = "business";
    const TABLE: &'static str = "businesses";

    fn schema() -> &'static Schema {
        &BUSINESS_SCHEMA
    }
}
