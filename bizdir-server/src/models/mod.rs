//! Resource models and request-body validation
//!
//! Each resource owns an immutable field schema. Request bodies are
//! checked against it before any database work; invalid input returns
//! ValidationError, not panic.

pub mod validation;
pub mod pagination;
pub mod resource;
pub mod business;
pub mod review;
pub mod photo;

pub use validation::{check_body, ValidationError};
pub use pagination::{PageMeta, PageRequest, Paginated, PaginationParams, PAGE_SIZE};
pub use resource::Resource;
pub use business::{Business, BUSINESS_SCHEMA};
pub use review::{Review, REVIEW_SCHEMA};
pub use photo::{Photo, PHOTO_SCHEMA};
