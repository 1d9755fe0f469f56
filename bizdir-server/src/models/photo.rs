//! Photo rows and schema

use bizdir_core::Schema;
use once_cell::sync::Lazy;
use serde::Serialize;
use sqlx::FromRow;

use super::Resource;

/// Required and optional fields of a photo
pub static PHOTO_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .required("userid")
        .required("businessid")
        .optional("caption")
});

/// Photo record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: i32,
    pub userid: i32,
    pub businessid: i32,
    pub caption: Option<String>,
}

impl Resource for Photo {
    const NAME: &'static str = "photo";
    const TABLE: &'static str = "photos";

    fn schema() -> &'static Schema {
        &PHOTO_SCHEMA
    }
}
