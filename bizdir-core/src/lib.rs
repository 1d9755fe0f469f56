//! bizdir-core: declarative field schemas for untyped request payloads
//!
//! A [`Schema`] maps field names to a [`FieldSpec`]. Two pure operations are
//! built on it:
//!
//! - [`validate_against_schema`] answers "is this acceptable as input": the
//!   candidate must be a JSON object carrying every required key.
//! - [`extract_valid_fields`] answers "what subset is safe to persist": only
//!   declared keys survive, everything else is dropped.
//!
//! Neither operation fails, allocates shared state, or performs I/O, so both
//! are safe to call from any number of concurrent requests.

pub mod schema;

pub use schema::{extract_valid_fields, validate_against_schema, FieldSpec, Schema};
