use serde::Serialize;
use serde_json::Value;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use super::models::User;
use super::DatabaseError;

/// Result of an unconditional document insert.
#[derive(Debug, Serialize)]
pub struct InsertResult {
    pub inserted_id: Uuid,
}

/// Result of an upserting quantity update. `upserted_id` is set when the
/// identifier did not exist and a fresh document was created.
#[derive(Debug, Serialize)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
}

/// Result of a delete-by-id. Zero deleted is a normal outcome.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Data access for the inventory collection. Documents are opaque JSONB;
/// the only field this layer ever inspects is the owner email.
pub struct InventoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Full collection scan, no filter.
    pub async fn find_all(&self) -> Result<Vec<Value>, DatabaseError> {
        let rows = sqlx::query("SELECT id, doc FROM inventory")
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(row_to_document).collect()
    }

    /// Documents whose embedded email matches the given owner.
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Value>, DatabaseError> {
        let rows = sqlx::query("SELECT id, doc FROM inventory WHERE doc->>'email' = $1")
            .bind(email)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(row_to_document).collect()
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Option<Value>, DatabaseError> {
        let row = sqlx::query("SELECT id, doc FROM inventory WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(row_to_document).transpose()
    }

    /// Insert a caller-supplied document as-is under a fresh identifier.
    pub async fn insert(&self, doc: &Value) -> Result<InsertResult, DatabaseError> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO inventory (id, doc) VALUES ($1, $2)")
            .bind(id)
            .bind(doc)
            .execute(self.pool)
            .await?;

        Ok(InsertResult { inserted_id: id })
    }

    /// Set the quantity field, upserting: an unknown id creates a document
    /// holding only `quantity`. Other fields of an existing document are
    /// left untouched.
    pub async fn update_quantity(
        &self,
        id: Uuid,
        quantity: &Value,
    ) -> Result<UpdateResult, DatabaseError> {
        // xmax = 0 distinguishes a fresh insert from a conflict update
        let row = sqlx::query(
            "INSERT INTO inventory (id, doc)
             VALUES ($1, jsonb_build_object('quantity', $2::jsonb))
             ON CONFLICT (id)
             DO UPDATE SET doc = inventory.doc || jsonb_build_object('quantity', $2::jsonb)
             RETURNING (xmax = 0) AS inserted",
        )
        .bind(id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        let inserted: bool = row.try_get("inserted")?;
        Ok(if inserted {
            UpdateResult {
                matched_count: 0,
                modified_count: 0,
                upserted_id: Some(id),
            }
        } else {
            UpdateResult {
                matched_count: 1,
                modified_count: 1,
                upserted_id: None,
            }
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DatabaseError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(DeleteResult {
            deleted_count: result.rows_affected(),
        })
    }
}

/// Merge the row id into the stored document so responses carry the
/// identifier the way a document store would return it.
fn row_to_document(row: PgRow) -> Result<Value, DatabaseError> {
    let id: Uuid = row.try_get("id")?;
    let doc: Value = row.try_get("doc")?;

    Ok(match doc {
        Value::Object(mut map) => {
            map.insert("id".to_string(), Value::String(id.to_string()));
            Value::Object(map)
        }
        other => other,
    })
}

/// Data access for stored login credentials.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn insert(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let id = Uuid::new_v4();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, email, password_hash, created_at",
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                DatabaseError::Conflict("email already registered".to_string())
            }
            _ => DatabaseError::Sqlx(e),
        })?;

        Ok(user)
    }
}
