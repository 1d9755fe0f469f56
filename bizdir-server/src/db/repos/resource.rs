//! Generic resource repository
//!
//! Handles CRUD for any [`Resource`] with these patterns:
//! - insert/update: extract schema fields, bind them as one JSONB parameter,
//!   let `jsonb_populate_record` coerce values into the row type
//! - get/update/delete: zero rows is `DbError::NotFound`
//! - page: COUNT first so the requested page can be clamped

use std::marker::PhantomData;

use bizdir_core::Schema;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{PageRequest, Paginated, Resource};
use super::DbError;

/// Repository for one resource table
pub struct ResourceRepo<'a, R> {
    pool: &'a PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> ResourceRepo<'a, R> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }

    /// Insert the schema fields of `candidate`, returning the new id.
    pub async fn insert(&self, candidate: &Value) -> Result<i32, DbError> {
        let fields = R::schema().extract(candidate);
        let mut query = insert_query(R::TABLE, fields, None);

        let id: i32 = query.build_query_scalar().fetch_one(self.pool).await?;
        tracing::debug!(resource = R::NAME, id, "Inserted row");
        Ok(id)
    }

    /// Insert unless a row with the same `conflict_columns` exists.
    ///
    /// Returns `None` when the insert was skipped.
    pub async fn insert_unless_exists(
        &self,
        candidate: &Value,
        conflict_columns: &[&str],
    ) -> Result<Option<i32>, DbError> {
        let fields = R::schema().extract(candidate);
        let mut query = insert_query(R::TABLE, fields, Some(conflict_columns));

        let id: Option<i32> = query.build_query_scalar().fetch_optional(self.pool).await?;
        Ok(id)
    }

    /// Get a single row by id.
    pub async fn get(&self, id: i32) -> Result<R, DbError> {
        let sql = format!("{} WHERE id = $1", select_sql(R::TABLE, R::schema()));

        sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(R::NAME, id))
    }

    /// Overwrite the schema fields of `candidate` on row `id`.
    ///
    /// Declared fields absent from `candidate` keep their stored values.
    pub async fn update(&self, id: i32, candidate: &Value) -> Result<(), DbError> {
        let fields = R::schema().extract(candidate);

        let found = if fields.is_empty() {
            self.exists(id).await?
        } else {
            let mut query = update_query(R::TABLE, id, fields);
            query.build().execute(self.pool).await?.rows_affected() > 0
        };

        if found {
            Ok(())
        } else {
            Err(DbError::not_found(R::NAME, id))
        }
    }

    /// Delete row `id`.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", quote_ident(R::TABLE));

        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found(R::NAME, id));
        }
        Ok(())
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            quote_ident(R::TABLE)
        );

        let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(self.pool).await?;
        Ok(exists)
    }

    /// Total number of rows.
    pub async fn count(&self) -> Result<i64, DbError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(R::TABLE));

        let count: i64 = sqlx::query_scalar(&sql).fetch_one(self.pool).await?;
        Ok(count)
    }

    /// List one page of rows ordered by id.
    ///
    /// The requested page is clamped against the current row count.
    pub async fn page(&self, request: PageRequest) -> Result<Paginated<R>, DbError> {
        let count = self.count().await?;
        let meta = request.window(count);

        let sql = format!(
            "{} ORDER BY id LIMIT $1 OFFSET $2",
            select_sql(R::TABLE, R::schema())
        );
        let items = sqlx::query_as::<_, R>(&sql)
            .bind(meta.limit())
            .bind(meta.offset())
            .fetch_all(self.pool)
            .await?;

        Ok(Paginated { items, meta })
    }

    /// All rows whose `column` equals `value`, ordered by id.
    ///
    /// `column` must be declared in the resource schema.
    pub async fn list_by(&self, column: &'static str, value: i32) -> Result<Vec<R>, DbError> {
        debug_assert!(R::schema().contains(column), "undeclared column {column}");

        let sql = format!(
            "{} WHERE {} = $1 ORDER BY id",
            select_sql(R::TABLE, R::schema()),
            quote_ident(column)
        );
        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(value)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}

/// Quote an identifier for Postgres.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_list<'n>(names: impl Iterator<Item = &'n str>) -> String {
    names.map(quote_ident).collect::<Vec<_>>().join(", ")
}

/// `SELECT id, <schema columns> FROM <table>`
fn select_sql(table: &str, schema: &Schema) -> String {
    format!(
        "SELECT {} FROM {}",
        column_list(std::iter::once("id").chain(schema.names())),
        quote_ident(table)
    )
}

fn insert_query(
    table: &str,
    fields: Map<String, Value>,
    conflict_columns: Option<&[&str]>,
) -> QueryBuilder<'static, Postgres> {
    let table = quote_ident(table);

    let mut query = if fields.is_empty() {
        QueryBuilder::new(format!("INSERT INTO {table} DEFAULT VALUES"))
    } else {
        let columns = column_list(fields.keys().map(String::as_str));
        let mut query = QueryBuilder::new(format!(
            "INSERT INTO {table} ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, "
        ));
        query.push_bind(Json(fields)).push(")");
        query
    };

    if let Some(columns) = conflict_columns {
        query.push(format!(
            " ON CONFLICT ({}) DO NOTHING",
            column_list(columns.iter().copied())
        ));
    }

    query.push(" RETURNING id");
    query
}

/// Caller guarantees `fields` is non-empty.
fn update_query(table: &str, id: i32, fields: Map<String, Value>) -> QueryBuilder<'static, Postgres> {
    let table = quote_ident(table);
    let assignments = fields
        .keys()
        .map(|key| {
            let column = quote_ident(key);
            format!("{column} = r.{column}")
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut query = QueryBuilder::new(format!(
        "UPDATE {table} SET {assignments} FROM jsonb_populate_record(NULL::{table}, "
    ));
    query
        .push_bind(Json(fields))
        .push(format!(") AS r WHERE {table}.id = "))
        .push_bind(id);
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Business, Photo, PHOTO_SCHEMA};
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("stars"), "\"stars\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn select_lists_id_then_schema_columns() {
        assert_eq!(
            select_sql("photos", &PHOTO_SCHEMA),
            r#"SELECT "id", "userid", "businessid", "caption" FROM "photos""#
        );
    }

    #[test]
    fn insert_binds_one_jsonb_record() {
        let query = insert_query("photos", fields(json!({ "userid": 1, "caption": "hi" })), None);
        assert_eq!(
            query.sql(),
            r#"INSERT INTO "photos" ("caption", "userid") SELECT "caption", "userid" FROM jsonb_populate_record(NULL::"photos", $1) RETURNING id"#
        );
    }

    #[test]
    fn insert_with_conflict_target() {
        let query = insert_query(
            "reviews",
            fields(json!({ "userid": 1 })),
            Some(&["userid", "businessid"]),
        );
        assert!(query
            .sql()
            .ends_with(r#"ON CONFLICT ("userid", "businessid") DO NOTHING RETURNING id"#));
    }

    #[test]
    fn insert_without_fields_uses_defaults() {
        let query = insert_query("photos", Map::new(), None);
        assert_eq!(query.sql(), r#"INSERT INTO "photos" DEFAULT VALUES RETURNING id"#);
    }

    #[test]
    fn update_assigns_from_record() {
        let query = update_query("photos", 4, fields(json!({ "caption": null })));
        assert_eq!(
            query.sql(),
            r#"UPDATE "photos" SET "caption" = r."caption" FROM jsonb_populate_record(NULL::"photos", $1) AS r WHERE "photos".id = $2"#
        );
    }

    #[test]
    fn writes_never_carry_undeclared_columns() {
        let candidate = json!({ "userid": 1, "businessid": 2, "id": 5, "owner; DROP TABLE photos": 1 });
        let query = insert_query("photos", Photo::schema().extract(&candidate), None);
        assert!(!query.sql().contains("DROP"));
        assert!(!query.sql().contains(r#""id""#));
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p bizdir-server -- --ignored

    fn business_body() -> Value {
        json!({
            "ownerid": "7",
            "name": "Interzone",
            "address": "1563 NW Monroe Ave.",
            "city": "Corvallis",
            "state": "OR",
            "zip": 97330,
            "phone": "541-754-5965",
            "category": "Restaurant",
            "subcategory": "Coffee Shop",
            "unknown": "dropped"
        })
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_coerces_and_round_trips() {
        let pool = crate::db::test_pool().await;
        let repo = ResourceRepo::<Business>::new(&pool);

        let id = repo.insert(&business_body()).await.expect("insert failed");
        let business = repo.get(id).await.expect("get failed");

        assert_eq!(business.ownerid, 7);
        assert_eq!(business.zip, "97330");
        assert_eq!(business.website, None);

        repo.delete(id).await.expect("delete failed");
        assert!(matches!(repo.get(id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_row_is_not_found() {
        let pool = crate::db::test_pool().await;
        let repo = ResourceRepo::<Business>::new(&pool);

        let err = repo.update(i32::MAX, &business_body()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "business", .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn null_in_required_column_is_rejected() {
        let pool = crate::db::test_pool().await;
        let repo = ResourceRepo::<Business>::new(&pool);

        let mut body = business_body();
        body["name"] = Value::Null;
        let err = repo.insert(&body).await.unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));
    }
}
