//! PostgreSQL user repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use super::{UserChanges, UserStore};
use crate::models::User;

/// User repository backed by the `users` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a `users` row; a row counts as deleted once `deleted_at` is set
fn row_to_user(row: &PgRow) -> DatabaseResult<User> {
    let deleted_at: Option<i64> = row.try_get("deleted_at").map_err(DatabaseError::Query)?;

    Ok(User {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        name: row.try_get("name").map_err(DatabaseError::Query)?,
        email: row.try_get("email").map_err(DatabaseError::Query)?,
        password_hash: row.try_get("password_hash").map_err(DatabaseError::Query)?,
        created_at: row.try_get("created_at").map_err(DatabaseError::Query)?,
        updated_at: row.try_get("updated_at").map_err(DatabaseError::Query)?,
        is_deleted: deleted_at.is_some(),
        deleted_at,
    })
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn email_exists(&self, email: &str) -> DatabaseResult<bool> {
        let row = sqlx::query("SELECT email FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.is_some())
    }

    async fn insert(&self, user: &User) -> DatabaseResult<User> {
        info!("Creating new user: {}", user.email);

        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DatabaseError::Conflict(format!(
                "email '{}' already registered",
                user.email
            ))),
        }
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let users = rows
            .iter()
            .map(row_to_user)
            .collect::<DatabaseResult<Vec<_>>>()?;

        info!("Found {} users", users.len());
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn update(&self, id: i64, changes: &UserChanges, updated_at: i64) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, password_hash = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, id: i64, deleted_at: i64) -> DatabaseResult<()> {
        sqlx::query("UPDATE users SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL")
            .bind(deleted_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }

    async fn hard_delete(&self, id: i64) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }
}
